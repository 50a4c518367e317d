use axum::http::StatusCode;
use std::fmt;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<axum::http::header::InvalidHeaderValue> for AppError {
    fn from(err: axum::http::header::InvalidHeaderValue) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// A write the backing store refused to accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Rejected { key: String, reason: String },
}

impl StoreError {
    pub fn rejected(key: &str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { key, reason } => write!(f, "store rejected '{key}': {reason}"),
        }
    }
}

impl std::error::Error for StoreError {}
