//! Tagged result of one HTTP operation.
//!
//! DESIGN
//! ======
//! The adapter never lets an error escape an HTTP operation. Instead of
//! collapsing every failure into "no result", the classification is kept:
//! callers that only care about the payload use [`Outcome::ok`], callers
//! that retry can tell a transient 5xx from a rejected request.

use serde::Serialize;

/// Classified result of a single request/response exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// The request succeeded and carried this payload.
    Success { data: T },
    /// The server answered with a 5xx status. Not logged; retry later.
    Transient { status: u16 },
    /// The server rejected the request with a structured error message.
    Application { message: String },
    /// Network failure, malformed response, or an unclassified status.
    Transport { message: String },
    /// The request payload could not be serialized. Nothing was sent, and
    /// resending the same payload fails the same way.
    Encode { message: String },
}

impl<T> Outcome<T> {
    /// Collapse to the payload, or `None` for any failure.
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success { data } => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// `true` for failures a caller may reasonably retry unchanged.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. } | Self::Transport { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success { data } => Outcome::Success { data: f(data) },
            Self::Transient { status } => Outcome::Transient { status },
            Self::Application { message } => Outcome::Application { message },
            Self::Transport { message } => Outcome::Transport { message },
            Self::Encode { message } => Outcome::Encode { message },
        }
    }
}

#[cfg(test)]
#[path = "outcome_test.rs"]
mod tests;
