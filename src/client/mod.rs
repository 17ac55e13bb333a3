mod cache;
mod http;
mod source;
mod tmdb;
mod url;


pub use cache::{CacheStats, DocumentCache};
pub use http::HttpClient;
pub use source::DocumentSource;
pub use tmdb::{SearchOptions, TmdbClient};
pub use url::{ApiUrl, AppendToResponse};

use crate::mapper::PopulateError;
use std::time::Duration;

/// Client result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client error types
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limit exceeded. Retry after: {0:?}")]
    RateLimit(Duration),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Populate(#[from] PopulateError),
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
