use std::io;

use thiserror::Error;

use crate::compose::ComposeState;

pub type AppResult<T> = Result<T, AppError>;

const FALLBACK_DETAIL: &str = "an unexpected error occurred";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    Validation(String),
    #[error("cannot {action} while {state}")]
    InvalidState {
        state: ComposeState,
        action: &'static str,
    },
    #[error("{0}")]
    Service(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("api error: {0}")]
    Api(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl AppError {
    /// Collapses any failure of a remote call into a single service message
    /// prefixed with `context`. Already-normalized errors pass through.
    pub fn into_service(self, context: &str) -> AppError {
        let detail = match self {
            AppError::Service(message) => return AppError::Service(message),
            AppError::Api(message) => message,
            AppError::Http(err) if err.is_timeout() => "request timed out".to_string(),
            AppError::Http(err) if err.is_connect() => "could not reach the backend".to_string(),
            other => other.to_string(),
        };

        let detail = detail.trim();
        let detail = if detail.is_empty() {
            FALLBACK_DETAIL
        } else {
            detail
        };

        AppError::Service(format!("{context}: {detail}"))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}
