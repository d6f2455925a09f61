//! API request adapter — one method per game endpoint.
//!
//! DESIGN
//! ======
//! Every HTTP operation issues exactly one request through the injected
//! [`HttpClient`] and hands the result to [`ApiRequest::classify`]:
//!
//! - 2xx → `Success` with the response data, verbatim.
//! - status 500..=599 → `Transient`, silently. The bot retries on its next
//!   cycle.
//! - body with a truthy `error` field → `Application`, logged at WARN.
//! - anything else → `Transport`, logged at ERROR with the raw error text.
//!
//! A payload that fails to serialize never reaches the client; it is
//! `Encode`, logged at ERROR.
//!
//! No HTTP operation returns `Err`. The session and bot names are only used
//! to attribute log lines.

use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpClient, HttpError, HttpResponse};
use crate::outcome::Outcome;
use crate::pixels::{self, PixelSnapshot};

// =============================================================================
// PAYLOADS
// =============================================================================

/// A single pixel repaint. Serialized as `{"pixelId":..,"newColor":".."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintCommand {
    pub pixel_id: u64,
    pub new_color: String,
}

impl PaintCommand {
    #[must_use]
    pub fn new(pixel_id: u64, new_color: impl Into<String>) -> Self {
        Self { pixel_id, new_color: new_color.into() }
    }
}

/// Analytics pageview event posted to `{page_url}/api/event`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageviewEvent {
    /// Event name, always `"pageview"`.
    pub n: &'static str,
    /// Page URL: configured host followed by the page path.
    pub u: String,
    /// Domain.
    pub d: String,
    /// Referrer, always null.
    pub r: Option<String>,
}

impl PageviewEvent {
    #[must_use]
    pub fn new(config: &ApiConfig, page: &str) -> Self {
        Self {
            n: "pageview",
            u: format!("{}{page}", config.page_host),
            d: config.page_domain.clone(),
            r: None,
        }
    }
}

// =============================================================================
// ADAPTER
// =============================================================================

/// Request adapter bound to one bot session.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    session_name: String,
    bot_name: String,
    config: ApiConfig,
}

impl ApiRequest {
    #[must_use]
    pub fn new(session_name: impl Into<String>, bot_name: impl Into<String>) -> Self {
        Self { session_name: session_name.into(), bot_name: bot_name.into(), config: ApiConfig::default() }
    }

    /// Replace the default endpoints.
    #[must_use]
    pub fn with_config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    #[must_use]
    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetch the current user's profile.
    pub async fn get_user_info(&self, http: &dyn HttpClient) -> Outcome<Option<Value>> {
        let result = http.get(&self.api_url("/api/v1/users/me")).await;
        self.classify("getting user info", result)
    }

    /// Probe the profile endpoint to check the session credential.
    ///
    /// `true` only when the request succeeds; any failure, including a 5xx,
    /// is `false`. Never logs.
    pub async fn validate_query_id(&self, http: &dyn HttpClient) -> bool {
        http.get(&self.api_url("/api/v1/users/me")).await.is_ok()
    }

    /// Fetch the mining status (balance, charges, speed levels).
    pub async fn get_mine_info(&self, http: &dyn HttpClient) -> Outcome<Option<Value>> {
        let result = http.get(&self.api_url("/api/v1/mining/status")).await;
        self.classify("getting mine info", result)
    }

    /// Claim the accumulated mining reward.
    pub async fn claim_mine(&self, http: &dyn HttpClient) -> Outcome<Option<Value>> {
        let result = http.get(&self.api_url("/api/v1/mining/claim")).await;
        self.classify("claiming mine", result)
    }

    /// Check and claim the task named `task` (e.g. `x:notpixel`, `paint20pixels`).
    pub async fn claim_task(&self, http: &dyn HttpClient, task: &str) -> Outcome<Option<Value>> {
        let result = http
            .get(&self.api_url(&format!("/api/v1/mining/task/check/{task}")))
            .await;
        self.classify("claiming task", result)
    }

    /// Submit a paint command. The payload is serialized as-is.
    pub async fn repaint<P>(&self, http: &dyn HttpClient, paint: &P) -> Outcome<Option<Value>>
    where
        P: Serialize + Sync + ?Sized,
    {
        let body = match serde_json::to_string(paint) {
            Ok(body) => body,
            Err(e) => return self.encode_failure("painting", &e),
        };
        let result = http.post(&self.api_url("/api/v1/repaint/start"), body).await;
        self.classify("painting", result)
    }

    /// Record a pageview of `page` (a path such as `/claiming`).
    pub async fn go_to_page(&self, http: &dyn HttpClient, page: &str) -> Outcome<Option<Value>> {
        let event = PageviewEvent::new(&self.config, page);
        let body = match serde_json::to_string(&event) {
            Ok(body) => body,
            Err(e) => return self.encode_failure("viewing page", &e),
        };
        let result = http
            .post(&format!("{}/api/event", self.config.page_url), body)
            .await;
        self.classify("viewing page", result)
    }

    /// Read one pixel snapshot over a dedicated WebSocket connection.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::WebSocket`] on a transport failure and
    /// [`ApiError::ClosedBeforeMessage`] if the server hangs up first.
    pub async fn get_pixels_info(&self) -> Result<PixelSnapshot, ApiError> {
        pixels::fetch_snapshot(&self.config.ws_url, self.config.snapshot_decode).await
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url)
    }

    fn encode_failure(&self, action: &str, err: &serde_json::Error) -> Outcome<Option<Value>> {
        error!(
            bot = %self.bot_name,
            session = %self.session_name,
            error = %err,
            "error while {action}: payload not serializable"
        );
        Outcome::Encode { message: err.to_string() }
    }

    fn classify(&self, action: &str, result: Result<HttpResponse, HttpError>) -> Outcome<Option<Value>> {
        let err = match result {
            Ok(response) => return Outcome::Success { data: response.data },
            Err(err) => err,
        };

        if let Some(status @ 500..=599) = err.status {
            return Outcome::Transient { status };
        }

        if let Some(message) = err.server_message() {
            warn!(
                bot = %self.bot_name,
                session = %self.session_name,
                error = %message,
                "error while {action}"
            );
            return Outcome::Application { message };
        }

        error!(
            bot = %self.bot_name,
            session = %self.session_name,
            error = %err.message,
            "error while {action}"
        );
        Outcome::Transport { message: err.message }
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
