use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between a form submission and its banner.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    /// Server answered with a non-2xx status
    #[error("{}", .detail.as_deref().unwrap_or("request failed"))]
    Http {
        status: StatusCode,
        detail: Option<String>,
    },

    /// Connection, protocol or body decoding failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP 200 but the body carried `success: false`
    #[error("{0}")]
    Rejected(String),

    /// A selected file could not be read from disk
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid server address: {0}")]
    BadUrl(#[from] url::ParseError),

    /// Superseded by a newer request, or the task died before answering
    #[error("the request was interrupted")]
    Interrupted,
}

impl ApiError {
    /// Message for a banner, substituting `fallback` when the server gave no detail.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Http {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            ApiError::Http { .. } | ApiError::Transport(_) => fallback.to_string(),
            other => other.to_string(),
        }
    }
}
