//! API configuration parsed from environment variables.

use crate::error::ApiError;

pub const DEFAULT_API_URL: &str = "https://notpx.app";
pub const DEFAULT_PAGE_URL: &str = "https://plausible.joincommunity.xyz";
pub const DEFAULT_WS_URL: &str = "wss://notpx.app/api/v2/image/ws";
pub const DEFAULT_PAGE_HOST: &str = "https://app.notpx.app";
pub const DEFAULT_PAGE_DOMAIN: &str = "notpx.app";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// How the first WebSocket message is turned into a [`PixelSnapshot`](crate::pixels::PixelSnapshot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotDecode {
    /// Always split the raw text into lines.
    #[default]
    Lines,
    /// Use the JSON `data` field when present, lines otherwise.
    Structured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Game API base URL, without a trailing slash.
    pub api_url: String,
    /// Analytics base URL, without a trailing slash.
    pub page_url: String,
    pub ws_url: String,
    /// Prefix of the `u` field in pageview events.
    pub page_host: String,
    /// The `d` field in pageview events.
    pub page_domain: String,
    pub timeouts: HttpTimeouts,
    pub snapshot_decode: SnapshotDecode,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_url: DEFAULT_PAGE_URL.to_string(),
            ws_url: DEFAULT_WS_URL.to_string(),
            page_host: DEFAULT_PAGE_HOST.to_string(),
            page_domain: DEFAULT_PAGE_DOMAIN.to_string(),
            timeouts: HttpTimeouts::default(),
            snapshot_decode: SnapshotDecode::default(),
        }
    }
}

impl ApiConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `NOTPX_API_URL`: game API base URL
    /// - `NOTPX_PAGE_URL`: analytics base URL
    /// - `NOTPX_WS_URL`: pixel snapshot WebSocket URL
    /// - `NOTPX_PAGE_HOST`, `NOTPX_PAGE_DOMAIN`: pageview event fields
    /// - `NOTPX_REQUEST_TIMEOUT_SECS`: default 30
    /// - `NOTPX_CONNECT_TIMEOUT_SECS`: default 10
    /// - `NOTPX_SNAPSHOT_DECODE`: `lines` (default) or `structured`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ConfigParse`] for an unknown snapshot decode mode.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ConfigParse`] for an unknown snapshot decode mode.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let url = |key: &str, default: &str| {
            lookup(key)
                .unwrap_or_else(|| default.to_string())
                .trim_end_matches('/')
                .to_string()
        };
        let number = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let snapshot_decode = parse_snapshot_decode(lookup("NOTPX_SNAPSHOT_DECODE").as_deref())?;

        Ok(Self {
            api_url: url("NOTPX_API_URL", DEFAULT_API_URL),
            page_url: url("NOTPX_PAGE_URL", DEFAULT_PAGE_URL),
            ws_url: lookup("NOTPX_WS_URL").unwrap_or_else(|| DEFAULT_WS_URL.to_string()),
            page_host: url("NOTPX_PAGE_HOST", DEFAULT_PAGE_HOST),
            page_domain: lookup("NOTPX_PAGE_DOMAIN").unwrap_or_else(|| DEFAULT_PAGE_DOMAIN.to_string()),
            timeouts: HttpTimeouts {
                request_secs: number("NOTPX_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: number("NOTPX_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
            snapshot_decode,
        })
    }
}

fn parse_snapshot_decode(raw: Option<&str>) -> Result<SnapshotDecode, ApiError> {
    match raw.unwrap_or("lines") {
        "lines" => Ok(SnapshotDecode::Lines),
        "structured" => Ok(SnapshotDecode::Structured),
        other => Err(ApiError::ConfigParse(format!(
            "unsupported snapshot decode '{other}' (expected 'lines' or 'structured')"
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
