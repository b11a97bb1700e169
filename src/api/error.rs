use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("login failed ({status}): {body}")]
    AuthFailed { status: StatusCode, body: String },
    #[error("reading rejected ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
}
