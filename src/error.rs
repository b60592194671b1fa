use thiserror::Error;

/// Invalid or missing settings. Always raised before any network call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("owner cannot be empty")]
    MissingOwner,
    #[error("repo cannot be empty")]
    MissingRepo,
    #[error("per-page should be positive, got {0}")]
    InvalidPerPage(i64),
    #[error("max-concurrency should be positive, got {0}")]
    InvalidMaxConcurrency(usize),
    #[error("{0} must be provided")]
    MissingToken(String),
    #[error("api token contains characters not allowed in a header")]
    InvalidToken,
    #[error("unknown format: {0}")]
    UnknownFormat(String),
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("--base-url is required for {0}")]
    MissingBaseUrl(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} responded with {status}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("api error: {0}")]
    Api(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("could not write output: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
