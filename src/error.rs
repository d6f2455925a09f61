//! Errors that escape the adapter.
//!
//! HTTP operations never return these; they classify every failure into an
//! [`Outcome`](crate::outcome::Outcome). `ApiError` covers setup failures and
//! the pixel snapshot, which fails explicitly.

/// Errors produced while configuring the client or fetching a pixel snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The WebSocket transport failed before a message arrived.
    #[error("websocket error: {0}")]
    WebSocket(String),

    /// The server closed the WebSocket without sending a data message.
    #[error("websocket closed before the first message")]
    ClosedBeforeMessage,
}

impl From<tokio_tungstenite::tungstenite::Error> for ApiError {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WebSocket(error.to_string())
    }
}
