//! Error type shared by every model, union, and resource client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed JSON text or a malformed date-time.
    Parse,
    /// A field or union value did not match its declared type.
    Validation,
    /// The server answered with a non-success status.
    Http,
    /// The request never produced a response.
    Transport,
    /// Client configuration was incomplete or invalid.
    Config,
    /// The background task running an async call failed to join.
    Task,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed date-time for field {field}: {source}")]
    DateTime {
        field: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("passed value for field {field} is not the expected type ({expected}), validation failed")]
    Validation { field: String, expected: &'static str },

    #[error("passed value matched no type within the union {union}, validation failed")]
    NoMatchingCandidate { union: &'static str },

    #[error("http {status}: {body}")]
    Http { status: u16, body: String },

    #[error("send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid header {name}")]
    InvalidHeader { name: String },

    #[error("{0}")]
    Config(String),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    pub(crate) fn validation(field: impl Into<String>, expected: &'static str) -> Self {
        Self::Validation {
            field: field.into(),
            expected,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Json(_) | Self::DateTime { .. } => ErrorKind::Parse,
            Self::Validation { .. } | Self::NoMatchingCandidate { .. } => ErrorKind::Validation,
            Self::Http { .. } => ErrorKind::Http,
            Self::Transport(_) | Self::InvalidHeader { .. } => ErrorKind::Transport,
            Self::Config(_) => ErrorKind::Config,
            Self::Task(_) => ErrorKind::Task,
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_names_field() {
        let err = Error::validation("Issue.error_description", "string");
        assert_eq!(
            err.to_string(),
            "passed value for field Issue.error_description is not the expected type (string), validation failed"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_json_error_is_parse_kind() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_http_error_keeps_status() {
        let err = Error::Http {
            status: 404,
            body: "{\"detail\":\"Not found.\"}".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Http);
        assert_eq!(err.status(), Some(404));
    }
}
