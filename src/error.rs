// src/error.rs
use thiserror::Error;

/// Failure classes for a transport round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    /// Non-2xx HTTP status whose body was not an API envelope.
    Status(u16),
    Other,
}

/// The server could not be reached, or answered with something other than the API.
#[derive(Debug, Error)]
#[error("transport error ({kind:?}): {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        TransportError {
            kind,
            message: message.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if let Some(status) = err.status() {
            TransportErrorKind::Status(status.as_u16())
        } else {
            TransportErrorKind::Other
        };
        TransportError::new(kind, err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("server error: {message}")]
    Api {
        message: String,
        inner: Option<String>,
        stack_trace: Option<String>,
    },

    #[error("session token rejected by server")]
    InvalidToken,

    #[error("no session token available")]
    Unauthenticated,

    #[error("encode error: {0}")]
    Encode(String),
}

impl Error {
    pub fn decode(msg: impl Into<String>) -> Self {
        Error::Decode(msg.into())
    }

    pub fn api(msg: impl Into<String>) -> Self {
        Error::Api {
            message: msg.into(),
            inner: None,
            stack_trace: None,
        }
    }

    /// True when the caller's session layer should re-authenticate.
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, Error::InvalidToken)
    }

    /// True when the server was never reached or never answered the API.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<crate::permissions::PermissionError> for Error {
    fn from(err: crate::permissions::PermissionError) -> Self {
        Error::Encode(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_token_is_not_an_api_error() {
        let err = Error::InvalidToken;
        assert!(err.is_invalid_token());
        assert!(!matches!(err, Error::Api { .. }));
        assert!(!Error::api("Invalid token.").is_invalid_token());
    }

    #[test]
    fn serde_errors_become_decode_errors() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, Error::Decode(_)));
        assert!(!err.is_transport());
    }

    #[test]
    fn api_error_displays_server_message() {
        assert_eq!(
            Error::api("Zone was not found: example.com").to_string(),
            "server error: Zone was not found: example.com"
        );
    }
}
