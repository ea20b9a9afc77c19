//! Error types
//!
//! `Display` output of these errors is what the toast shows.

use thiserror::Error;

/// Failure talking to the REST backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response (offline, CORS, DNS)
    #[error("network error: {0}")]
    Network(String),
    /// Backend answered with a non-2xx status or `success: false`
    #[error("{message} ({status})")]
    Rejected { status: u16, message: String },
    /// Body did not match the `{success, message, data}` envelope
    #[error("unexpected response from server: {0}")]
    Shape(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::Rejected { status, .. } if (400..500).contains(status))
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Encode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
