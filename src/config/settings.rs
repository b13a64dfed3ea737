//! Settings structures for bing-search-rs configuration

use crate::error::{self, SearchError};
use crate::search::Freshness;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

/// Environment variable holding the subscription key
pub const API_KEY_ENV: &str = "BING_SUBSCRIPTION_KEY";

/// Default web search endpoint
pub const DEFAULT_WEB_ENDPOINT: &str = "https://api.bing.microsoft.com/v7.0/search";
/// Default news search endpoint
pub const DEFAULT_NEWS_ENDPOINT: &str = "https://api.bing.microsoft.com/v7.0/news/search";
/// Default entity search endpoint
pub const DEFAULT_ENTITY_ENDPOINT: &str = "https://api.bing.microsoft.com/v7.0/entities";

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Default settings with an explicit subscription key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        let mut settings = Self::default();
        settings.search.api_key = Some(api_key.into());
        settings
    }

    /// Merge with environment variables (`BING_*` prefix)
    pub fn merge_env(&mut self) -> error::Result<()> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge values from a variable lookup. An explicit API key already in
    /// the settings wins over the environment. A value that does not parse
    /// is a configuration error and leaves the setting untouched.
    pub fn merge_vars<F>(&mut self, lookup: F) -> error::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.search.api_key.is_none() {
            self.search.api_key = lookup(API_KEY_ENV);
        }
        if let Some(val) = lookup("BING_SEARCH_MAX_RESULTS") {
            self.search.max_results = parse_var("BING_SEARCH_MAX_RESULTS", &val)?;
        }
        if let Some(val) = lookup("BING_SEARCH_LOCALE") {
            self.search.locale = val;
        }
        if let Some(val) = lookup("BING_SEARCH_INCLUDE_NEWS") {
            self.search.include_news = parse_var("BING_SEARCH_INCLUDE_NEWS", &val)?;
        }
        if let Some(val) = lookup("BING_SEARCH_INCLUDE_ENTITY") {
            self.search.include_entity = parse_var("BING_SEARCH_INCLUDE_ENTITY", &val)?;
        }
        if let Some(val) = lookup("BING_SEARCH_NEWS_FRESHNESS") {
            self.search.news_freshness =
                Some(parse_var("BING_SEARCH_NEWS_FRESHNESS", &val)?);
        }
        if let Some(val) = lookup("BING_SEARCH_FORMAT_OUTPUT") {
            self.search.format_output = parse_var("BING_SEARCH_FORMAT_OUTPUT", &val)?;
        }
        Ok(())
    }

    /// Check that the settings can be used to issue requests
    pub fn validate(&self) -> error::Result<()> {
        self.search.api_key()?;

        if self.search.max_results == 0 {
            return Err(SearchError::Configuration(
                "max_results must be at least 1".to_string(),
            ));
        }

        let timeout = self.outgoing.request_timeout;
        if !timeout.is_finite() || timeout <= 0.0 {
            return Err(SearchError::Configuration(format!(
                "request_timeout must be positive, got {}",
                timeout
            )));
        }

        let endpoints = &self.outgoing.endpoints;
        for (name, endpoint) in [
            ("web", &endpoints.web),
            ("news", &endpoints.news),
            ("entity", &endpoints.entity),
        ] {
            url::Url::parse(endpoint).map_err(|e| {
                SearchError::Configuration(format!(
                    "invalid {} endpoint '{}': {}",
                    name, endpoint, e
                ))
            })?;
        }

        Ok(())
    }
}

fn parse_var<T>(key: &str, val: &str) -> error::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    val.trim().parse().map_err(|e| {
        SearchError::Configuration(format!("invalid {} '{}': {}", key, val, e))
    })
}

/// Query options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Subscription key; falls back to `BING_SUBSCRIPTION_KEY`
    pub api_key: Option<String>,
    /// Results requested per category
    pub max_results: u32,
    /// Market code for web and news search
    pub locale: String,
    /// Also query the news endpoint
    pub include_news: bool,
    /// Also query the entity endpoint
    pub include_entity: bool,
    /// Freshness window for news search
    pub news_freshness: Option<Freshness>,
    /// Return tagged strings instead of records
    pub format_output: bool,
}

impl SearchSettings {
    /// The configured subscription key, if usable
    pub fn api_key(&self) -> error::Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(SearchError::Configuration(
                "bing_subscription_key is not set".to_string(),
            )),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            max_results: crate::DEFAULT_MAX_RESULTS,
            locale: crate::DEFAULT_LOCALE.to_string(),
            include_news: false,
            include_entity: false,
            news_freshness: None,
            format_output: false,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Per-request timeout in seconds
    pub request_timeout: f64,
    /// Provider endpoints
    pub endpoints: EndpointSettings,
    /// User agent string (none = crate default)
    pub user_agent: Option<String>,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::DEFAULT_TIMEOUT as f64,
            endpoints: EndpointSettings::default(),
            user_agent: None,
            proxies: ProxySettings::default(),
        }
    }
}

/// Provider endpoint URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    pub web: String,
    pub news: String,
    pub entity: String,
}

impl EndpointSettings {
    /// Endpoints rooted at another host, keeping the provider's paths
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            web: format!("{}/v7.0/search", base),
            news: format!("{}/v7.0/news/search", base),
            entity: format!("{}/v7.0/entities", base),
        }
    }
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            web: DEFAULT_WEB_ENDPOINT.to_string(),
            news: DEFAULT_NEWS_ENDPOINT.to_string(),
            entity: DEFAULT_ENTITY_ENDPOINT.to_string(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}
