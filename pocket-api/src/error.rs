use serde::{Deserialize, Serialize};
use tower_api_client::{Error as TransportError, StatusCode};

#[derive(Debug)]
pub enum ApiError {
    /// The server answered with a 4xx/5xx status
    Http(StatusCode, ErrorDetail),
    /// The server answered 2xx but flagged the call as failed
    Unsuccessful { message: String },
    Internal(TransportError),
}

impl From<TransportError> for ApiError {
    fn from(value: TransportError) -> Self {
        match value {
            TransportError::ClientError(status, body) | TransportError::ServerError(status, body) => {
                let detail = serde_json::from_str::<ErrorDetail>(&body).unwrap_or(ErrorDetail {
                    success: false,
                    message: Some(body),
                });
                ApiError::Http(status, detail)
            }
            e => ApiError::Internal(e),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
            ApiError::Http(status, detail) => match &detail.message {
                Some(message) => write!(f, "({}) {}", status, message),
                None => write!(f, "({}) request failed", status),
            },
            ApiError::Unsuccessful { message } => write!(f, "Request unsuccessful: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error body returned alongside non-2xx statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}
