use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;

/// Failure of a single REST call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx answer; `message` is the `{ message }` body when present.
    Status { status: u16, message: Option<String> },
    Unauthorized { message: Option<String> },
    /// The request never got an answer (timeout, refused, DNS, ...).
    Transport(String),
    Decode(String),
    MissingField(&'static str),
}

impl ApiError {
    /// The message the server asked to show, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } | ApiError::Unauthorized { message } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Status {
                status: status.as_u16(),
                message,
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status { status, message } => match message {
                Some(msg) => write!(f, "HTTP {}: {}", status, msg),
                None => write!(f, "HTTP {} error", status),
            },
            ApiError::Unauthorized { .. } => write!(f, "Unauthorized"),
            ApiError::Transport(msg) => write!(f, "Network error: {}", msg),
            ApiError::Decode(msg) => write!(f, "Invalid response: {}", msg),
            ApiError::MissingField(field) => write!(f, "Response is missing '{}'", field),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport(format!("Connection timeout: {}", err))
        } else if err.is_connect() {
            ApiError::Transport(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::from_status(status, None)
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Error body the API sends with failed requests.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

pub type ApiResult<T> = Result<T, ApiError>;
