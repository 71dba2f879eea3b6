//! Error types.
//!
//! [`NewsError`] covers failures that stop a whole call. [`ItemError`] covers a
//! single list item that could not be turned into a record; those never leave
//! the extraction loop and end up in the report instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("YAML deserialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("listing markup is empty")]
    EmptyDocument,
}

pub type Result<T> = std::result::Result<T, NewsError>;

/// Why one list item produced no record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("node not found: {0}")]
    MissingNode(&'static str),

    #[error("{node} has no {attr} attribute")]
    MissingAttribute {
        node: &'static str,
        attr: &'static str,
    },

    #[error("date {raw:?} does not match dd.mm.yyyy: {reason}")]
    BadDate { raw: String, reason: String },

    #[error("article page {url} unavailable: {reason}")]
    ArticleUnavailable { url: String, reason: String },
}
