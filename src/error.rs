//! Error types for search execution

use crate::results::Category;
use thiserror::Error;

/// Errors surfaced by the search client.
///
/// Transport and HTTP status failures abort the whole query. A response whose
/// JSON lacks the expected result container is not an error; the category
/// simply yields no results.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Missing credential or otherwise unusable settings
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provider answered with a non-2xx status
    #[error("{endpoint} search endpoint returned HTTP {status}")]
    UpstreamRequest { endpoint: Category, status: u16 },

    /// The request never produced a response (connect failure, timeout, ...)
    #[error("request to {endpoint} search endpoint failed: {source}")]
    Transport {
        endpoint: Category,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not JSON at all
    #[error("{endpoint} search endpoint returned a body that is not JSON: {source}")]
    Decode {
        endpoint: Category,
        #[source]
        source: serde_json::Error,
    },

    /// Tool input rejected before any request was made
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl SearchError {
    /// Whether this error was caused by the per-request timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }

    /// HTTP status of an upstream failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamRequest { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SearchError>;
