use sift_core::DecodeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid search endpoint {0}")]
    InvalidEndpoint(String),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
