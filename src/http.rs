//! HTTP capability injected into every adapter call.
//!
//! DESIGN
//! ======
//! The adapter does not own an HTTP client. Callers hand one in per call so
//! a bot can share a single authenticated client across operations. The
//! [`HttpClient`] trait is the seam: [`ReqwestHttp`] in production, scripted
//! mocks in tests.
//!
//! A non-2xx response is an [`HttpError`] carrying the status and the
//! parsed body, so the adapter can classify it. Transport failures carry no
//! status.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::config::HttpTimeouts;
use crate::error::ApiError;

// =============================================================================
// TYPES
// =============================================================================

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed body. `None` for an empty body; non-JSON text becomes a string.
    pub data: Option<Value>,
}

/// A failed exchange: either a non-2xx response or no response at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct HttpError {
    /// HTTP status, `None` when no response was received.
    pub status: Option<u16>,
    /// Parsed response body, when there was one.
    pub body: Option<Value>,
    pub message: String,
}

impl HttpError {
    /// A failure with no response object (connect, timeout, decode).
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self { status: None, body: None, message: message.into() }
    }

    /// A response with a non-success status.
    #[must_use]
    pub fn from_status(status: u16, body: Option<Value>) -> Self {
        Self { status: Some(status), body, message: format!("request failed with status code {status}") }
    }

    /// The server's structured error message, if the body carries a truthy
    /// `error` field.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        match self.body.as_ref()?.get("error").filter(|v| is_truthy(v))? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

// =============================================================================
// CLIENT TRAIT
// =============================================================================

/// Minimal HTTP surface the adapter needs. Enables mocking in tests.
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET request.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] for a non-2xx status or a transport failure.
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError>;

    /// Issue a POST request with a JSON text body.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] for a non-2xx status or a transport failure.
    async fn post(&self, url: &str, body: String) -> Result<HttpResponse, HttpError>;
}

// =============================================================================
// REQWEST IMPLEMENTATION
// =============================================================================

/// [`HttpClient`] backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestHttp {
    http: reqwest::Client,
}

impl ReqwestHttp {
    /// Build a client with the given timeouts. When `init_data` is set, every
    /// request carries `Authorization: initData <init_data>`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the header value is invalid or
    /// the client fails to build.
    pub fn new(timeouts: HttpTimeouts, init_data: Option<&str>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(init_data) = init_data {
            let value = HeaderValue::from_str(&format!("initData {init_data}"))
                .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }

    /// Wrap an already configured `reqwest::Client`.
    #[must_use]
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    async fn finish(response: reqwest::Response) -> Result<HttpResponse, HttpError> {
        let status = response.status().as_u16();
        let success = (200..300).contains(&status);
        let text = match response.text().await {
            Ok(text) => text,
            // The status line already arrived; keep it so a 5xx stays transient.
            Err(_) if !success => return Err(HttpError::from_status(status, None)),
            Err(e) => return Err(HttpError::transport(e.to_string())),
        };
        let data = parse_body(&text);

        if !success {
            return Err(HttpError::from_status(status, data));
        }
        Ok(HttpResponse { status, data })
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| HttpError::transport(e.to_string()))?;
        Self::finish(response).await
    }

    async fn post(&self, url: &str, body: String) -> Result<HttpResponse, HttpError> {
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| HttpError::transport(e.to_string()))?;
        Self::finish(response).await
    }
}

/// JavaScript-style truthiness, which is how the server's optional fields
/// are meant to be read.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => true,
    }
}

fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
