//! Tool-call adapter
//!
//! Exposes the search as a single named tool that takes a JSON argument
//! object, for agent frameworks that hand tool calls over as JSON.

use crate::config::Settings;
use crate::error::{Result, SearchError};
use crate::results::SearchOutput;
use crate::search::Search;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Tool name advertised to the caller
pub const TOOL_NAME: &str = "bing_search_results";

/// Tool description advertised to the caller
pub const TOOL_DESCRIPTION: &str = "A wrapper around Bing Search. \
    Useful for when you need to answer questions about current events. \
    Input should be a search query. [IMPORTANT] Input(query) should be over 5 characters.";

/// Shortest query the tool accepts, in characters
pub const MIN_QUERY_CHARS: usize = 5;

/// Arguments of a tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchInput {
    /// Search query
    pub query: String,
}

impl SearchInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// Reject queries the provider tends to answer poorly
    pub fn validate(&self) -> Result<()> {
        let chars = self.query.trim().chars().count();
        if chars < MIN_QUERY_CHARS {
            return Err(SearchError::InvalidInput(format!(
                "query must be at least {} characters, got {}",
                MIN_QUERY_CHARS, chars
            )));
        }
        Ok(())
    }
}

/// The search exposed as a tool
#[derive(Clone)]
pub struct SearchTool {
    search: Search,
}

impl SearchTool {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self::from_search(Search::new(settings)?))
    }

    pub fn from_search(search: Search) -> Self {
        Self { search }
    }

    pub fn name(&self) -> &'static str {
        TOOL_NAME
    }

    pub fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    /// JSON schema of the tool arguments
    pub fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query",
                    "minLength": MIN_QUERY_CHARS
                }
            },
            "required": ["query"]
        })
    }

    /// Run a tool call given its raw JSON arguments
    pub async fn invoke(&self, arguments: serde_json::Value) -> Result<SearchOutput> {
        let input: SearchInput = serde_json::from_value(arguments)
            .map_err(|e| SearchError::InvalidInput(e.to_string()))?;
        self.run(input).await
    }

    /// Run a tool call
    pub async fn run(&self, input: SearchInput) -> Result<SearchOutput> {
        input.validate()?;
        // Length is checked on the trimmed text, the query goes out as given
        self.search.execute(&input.query).await
    }
}
