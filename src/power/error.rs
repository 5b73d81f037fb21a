use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Request to {0} failed")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("POWER returned {status} for {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON response from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response from {url} has no 'properties.parameter' block")]
    MissingParameters { url: String },

    #[error("Only {usable} usable years of data for the event date, at least {required} are required")]
    InsufficientSample { usable: usize, required: usize },

    #[error("Cannot create response cache directory '{0}'")]
    CacheDir(PathBuf, #[source] std::io::Error),

    #[error("Cannot read cached response '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Cannot write cached response '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Cached response '{0}' is corrupt")]
    CacheDecode(PathBuf, #[source] bincode::error::DecodeError),

    #[error("Cannot encode parameter table for the response cache")]
    CacheEncode(#[source] bincode::error::EncodeError),

    #[error("Cache I/O task panicked or was cancelled")]
    TaskJoin(#[from] tokio::task::JoinError),
}
