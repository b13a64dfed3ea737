//! Engine traits and types

use crate::error::{Result, SearchError};
use crate::results::{Category, SearchResult};
use crate::search::{Freshness, SearchQuery};
use serde_json::value::RawValue;
use std::collections::HashMap;

/// Parameters for building a search request
#[derive(Debug, Clone)]
pub struct RequestParams {
    /// Search query string
    pub query: String,
    /// Number of results to request
    pub count: u32,
    /// Market code
    pub market: String,
    /// News freshness window
    pub freshness: Option<Freshness>,
}

impl RequestParams {
    /// Create new request parameters
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            count: crate::DEFAULT_MAX_RESULTS,
            market: crate::DEFAULT_LOCALE.to_string(),
            freshness: None,
        }
    }

    /// Parameters shared by every category of a query
    pub fn from_query(query: &SearchQuery) -> Self {
        Self {
            query: query.query.clone(),
            count: query.max_results,
            market: query.locale.clone(),
            freshness: query.news_freshness,
        }
    }
}

/// HTTP GET request to be made for an engine
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// URL to request
    pub url: String,
    /// Query parameters
    pub params: HashMap<String, String>,
}

impl EngineRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: HashMap::new(),
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// HTTP response from engine request
#[derive(Debug)]
pub struct EngineResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl EngineResponse {
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }

    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.text)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait implemented by each category endpoint
pub trait Engine: Send + Sync {
    /// Engine name
    fn name(&self) -> &str;

    /// Category of the results this engine produces
    fn category(&self) -> Category;

    /// Endpoint URL
    fn endpoint(&self) -> &str;

    /// Build the HTTP request for a search
    fn request(&self, params: &RequestParams) -> EngineRequest;

    /// Normalize the HTTP response into results, in provider order
    fn response(&self, response: EngineResponse) -> Result<Vec<SearchResult>>;

    /// Fail with the engine's category on a non-2xx status
    fn check_status(&self, response: &EngineResponse) -> Result<()> {
        if response.is_success() {
            Ok(())
        } else {
            Err(SearchError::UpstreamRequest {
                endpoint: self.category(),
                status: response.status,
            })
        }
    }

    /// Check that the body is JSON, failing with the engine's category.
    /// The body stays unparsed text so payloads can be kept verbatim.
    fn parse_body(&self, response: &EngineResponse) -> Result<Box<RawValue>> {
        response.json().map_err(|source| SearchError::Decode {
            endpoint: self.category(),
            source,
        })
    }
}
