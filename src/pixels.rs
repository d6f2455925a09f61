//! Pixel snapshot — one message over a short-lived WebSocket.
//!
//! DESIGN
//! ======
//! Each call opens its own connection, waits for the first data message,
//! decodes it and closes the connection. Nothing is pooled or reused.
//! Returning from [`fetch_snapshot`] settles the operation, so anything the
//! server sends afterwards is never read.
//!
//! There is no timeout: the call waits until a message arrives or the
//! transport fails.

use futures_util::StreamExt;
use serde::Serialize;
use serde_json::Value;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use crate::config::SnapshotDecode;
use crate::error::ApiError;
use crate::http::is_truthy;

/// Decoded content of the first WebSocket message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PixelSnapshot {
    /// Raw text split on `\n`.
    Lines(Vec<String>),
    /// The `data` field of a JSON message.
    Structured(Value),
}

/// Connect to `url`, read the first data message and close.
///
/// # Errors
///
/// Returns [`ApiError::WebSocket`] if the connection fails or the transport
/// errors before a message, and [`ApiError::ClosedBeforeMessage`] if the
/// server closes first.
pub async fn fetch_snapshot(url: &str, mode: SnapshotDecode) -> Result<PixelSnapshot, ApiError> {
    let (mut stream, _) = connect_async(url).await?;

    let result = loop {
        let Some(message) = stream.next().await else {
            break Err(ApiError::ClosedBeforeMessage);
        };
        match message {
            Ok(Message::Text(text)) => break Ok(decode_snapshot(text.as_str(), mode)),
            Ok(Message::Binary(bytes)) => break Ok(decode_snapshot(&String::from_utf8_lossy(&bytes), mode)),
            Ok(Message::Close(_)) => break Err(ApiError::ClosedBeforeMessage),
            Ok(_) => {}
            Err(e) => break Err(ApiError::from(e)),
        }
    };

    if let Err(e) = stream.close(None).await {
        debug!(error = %e, "websocket close after snapshot failed");
    }
    result
}

/// Decode one message body according to `mode`.
#[must_use]
pub fn decode_snapshot(text: &str, mode: SnapshotDecode) -> PixelSnapshot {
    if mode == SnapshotDecode::Structured {
        if let Ok(Value::Object(mut map)) = serde_json::from_str::<Value>(text) {
            if let Some(data) = map.remove("data").filter(is_truthy) {
                return PixelSnapshot::Structured(data);
            }
        }
    }
    PixelSnapshot::Lines(text.split('\n').map(str::to_owned).collect())
}

#[cfg(test)]
#[path = "pixels_test.rs"]
mod tests;
