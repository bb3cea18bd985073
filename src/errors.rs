//! Error taxonomy for fetching, parsing, extraction and persistence.
//!
//! - [`FetchError`]: network or HTTP status failure while retrieving a page
//! - [`ParseError`]: a document that cannot be read as a page at all
//! - [`ExtractError`]: why one article's details could not be produced
//! - [`StoreError`]: the document collection was unreachable or refused an operation
//! - [`ConfigError`]: the crawl configuration file could not be loaded
//!
//! Individual missing fields are never errors; extractors degrade them to
//! their default values.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("body error: {0}")]
    Body(String),
}

impl FetchError {
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("document is empty")]
    EmptyDocument,

    #[error("invalid selector `{0}`")]
    Selector(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("operation rejected: {0}")]
    Rejected(String),

    #[error("no document with id {0}")]
    MissingDocument(u64),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("config lists no categories")]
    NoCategories,
}
