//! Search query and related data models

use crate::config::SearchSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// News freshness window, applied provider-side
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Freshness {
    Day,
    Week,
    Month,
}

impl Freshness {
    /// Value of the provider's `freshness` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Freshness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(format!("unknown news freshness: {}", other)),
        }
    }
}

/// A single search invocation with everything needed to build requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The search query string
    pub query: String,
    /// Results requested per category
    pub max_results: u32,
    /// Market code, e.g. `en-US`
    pub locale: String,
    pub include_news: bool,
    pub include_entity: bool,
    pub news_freshness: Option<Freshness>,
}

impl SearchQuery {
    /// Create a query with default options
    pub fn simple(query: impl Into<String>) -> Self {
        Self::from_settings(query, &SearchSettings::default())
    }

    /// Create a query using the options from settings
    pub fn from_settings(query: impl Into<String>, settings: &SearchSettings) -> Self {
        Self {
            query: query.into(),
            max_results: settings.max_results,
            locale: settings.locale.clone(),
            include_news: settings.include_news,
            include_entity: settings.include_entity,
            news_freshness: settings.news_freshness,
        }
    }

    /// Set result count
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set market code
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Enable news search, optionally limited to a freshness window
    pub fn with_news(mut self, freshness: Option<Freshness>) -> Self {
        self.include_news = true;
        self.news_freshness = freshness;
        self
    }

    /// Enable entity search
    pub fn with_entities(mut self) -> Self {
        self.include_entity = true;
        self
    }

    /// Check if the query is empty
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_parse() {
        assert_eq!("Day".parse::<Freshness>(), Ok(Freshness::Day));
        assert_eq!("week".parse::<Freshness>(), Ok(Freshness::Week));
        assert_eq!("MONTH".parse::<Freshness>(), Ok(Freshness::Month));
        assert!("year".parse::<Freshness>().is_err());
    }

    #[test]
    fn test_simple_query_defaults() {
        let query = SearchQuery::simple("weather forecast");
        assert_eq!(query.max_results, 3);
        assert_eq!(query.locale, "en-US");
        assert!(!query.include_news);
        assert!(!query.include_entity);
        assert!(query.news_freshness.is_none());
    }

    #[test]
    fn test_builders() {
        let query = SearchQuery::simple("rust")
            .with_max_results(5)
            .with_locale("de-DE")
            .with_news(Some(Freshness::Week))
            .with_entities();

        assert_eq!(query.max_results, 5);
        assert_eq!(query.locale, "de-DE");
        assert!(query.include_news);
        assert_eq!(query.news_freshness, Some(Freshness::Week));
        assert!(query.include_entity);
        assert!(!query.is_empty());
        assert!(SearchQuery::simple("   ").is_empty());
    }
}
