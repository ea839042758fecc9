use spin_sdk::http::Response;
use std::fmt;

use crate::templates;

/// Why a backend read did not produce data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request to {path} failed: {reason}")]
    Transport { path: String, reason: String },

    #[error("{path} answered {status} {reason}: {message}")]
    Status {
        path: String,
        status: u16,
        reason: String,
        message: String,
    },

    #[error("{path} returned an unreadable body: {reason}")]
    Payload { path: String, reason: String },

    #[error("no {what} matched `{key}`")]
    NotFound { what: String, key: String },
}

impl FetchError {
    pub fn transport(path: &str, reason: impl fmt::Display) -> Self {
        FetchError::Transport {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn payload(path: &str, reason: impl fmt::Display) -> Self {
        FetchError::Payload {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn not_found(what: &str, key: &str) -> Self {
        FetchError::NotFound {
            what: what.to_string(),
            key: key.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::InternalError(_) => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        let message = match &err {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg.clone(),
            // Details stay in the logs.
            ApiError::InternalError(_) => "Something went wrong. Please try again later.".to_string(),
        };
        let html = templates::error_page(err.status(), &message);

        Response::builder()
            .status(err.status())
            .header("Content-Type", "text/html; charset=utf-8")
            .body(html.into_bytes())
            .build()
    }
}

impl std::error::Error for ApiError {}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}
