//! Gateway failure taxonomy

use crate::models::market::FailureKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("API reported an error: {0}")]
    Api(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }

    /// Timeouts, transport failures, 5xx and 429 are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Timeout | GatewayError::Transport(_) => true,
            GatewayError::Status { status } => *status >= 500 || *status == 429,
            GatewayError::Decode(_) | GatewayError::Api(_) | GatewayError::InvalidUrl(_) => false,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            GatewayError::Timeout => FailureKind::Timeout,
            GatewayError::Transport(_) | GatewayError::InvalidUrl(_) => FailureKind::Transport,
            GatewayError::Status { .. } => FailureKind::HttpStatus,
            GatewayError::Decode(_) => FailureKind::Malformed,
            GatewayError::Api(_) => FailureKind::ApiError,
        }
    }
}
