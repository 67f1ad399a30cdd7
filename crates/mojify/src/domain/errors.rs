//! Domain Errors
//!
//! Every failure talking to the Mojify API collapses into [`DomainError`].
//! Callers that only need something to show a person use
//! [`DomainError::message`].

use serde::Deserialize;
use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// The request never produced an HTTP response (DNS, refused, reset...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    /// The server answered 2xx but the body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Rejected locally before any request was made
    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl DomainError {
    /// Build an [`DomainError::Http`] from a failed response.
    ///
    /// `detail` comes from the JSON `detail` field when the body parses.
    /// An unparseable body falls back to the reason phrase; a parseable body
    /// without `detail` falls back to `HTTP {status}`.
    pub fn from_response(status: u16, body: &str, reason: Option<&str>) -> Self {
        let detail = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                detail: Some(serde_json::Value::String(detail)),
            }) => detail,
            Ok(ErrorBody { detail: None }) => format!("HTTP {}", status),
            Ok(ErrorBody {
                detail: Some(other),
            }) => other.to_string(),
            Err(_) => match reason {
                Some(reason) if !reason.is_empty() => reason.to_string(),
                _ => format!("HTTP {}", status),
            },
        };

        Self::Http { status, detail }
    }

    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// The single string surfaced to a person
    pub fn message(&self) -> &str {
        match self {
            Self::Transport(msg) | Self::Decode(msg) | Self::Validation(msg) => msg,
            Self::Http { detail, .. } => detail,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
