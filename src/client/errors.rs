use thiserror::Error;

use crate::domain::state::ErrorInfo;

/// Failure of a single remote call. Nothing is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The service answered with a non-success status.
    #[error("remote service returned {code}: {reason}")]
    Status { code: u16, reason: String },

    /// No answer within the timeout ceiling.
    #[error("request timed out")]
    Timeout,

    /// Connection, TLS or protocol failure before a status was received.
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

pub type TransportResult<T> = Result<T, TransportError>;

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if let Some(status) = err.status() {
            TransportError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            }
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(err.to_string())
    }
}

impl From<&TransportError> for ErrorInfo {
    fn from(err: &TransportError) -> Self {
        match err {
            TransportError::Status { code, reason } => ErrorInfo::new(*code, reason.clone()),
            TransportError::Timeout => ErrorInfo::new(504, "Gateway Timeout"),
            TransportError::Network(_) | TransportError::Decode(_) => {
                ErrorInfo::new(502, "Bad Gateway")
            }
        }
    }
}

impl From<TransportError> for ErrorInfo {
    fn from(err: TransportError) -> Self {
        ErrorInfo::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_keep_remote_code_and_reason() {
        let info = ErrorInfo::from(TransportError::Status {
            code: 429,
            reason: "Too Many Requests".to_string(),
        });

        assert_eq!(info, ErrorInfo::new(429, "Too Many Requests"));
    }

    #[test]
    fn failures_without_status_get_generic_codes() {
        assert_eq!(ErrorInfo::from(TransportError::Timeout).code, 504);
        assert_eq!(
            ErrorInfo::from(TransportError::Network("refused".into())),
            ErrorInfo::new(502, "Bad Gateway")
        );
    }
}
