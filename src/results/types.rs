//! Result type definitions

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fmt;

/// Search category, one per provider endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Web,
    News,
    Entity,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::News => "news",
            Self::Entity => "entity",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider sub-object carried as serialized JSON text.
///
/// The payload is the provider's own text for the value, captured without
/// parsing it, so numbers and key order survive exactly as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPayload(String);

impl JsonPayload {
    /// Capture a provider value as the exact text it arrived in
    pub fn from_raw(raw: &RawValue) -> Self {
        Self(raw.get().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for JsonPayload {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for JsonPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A web page result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebResult {
    pub title: String,
    pub content: String,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Site name reported by the provider
    pub source: Option<String>,
}

/// A news article result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsResult {
    pub title: String,
    pub content: String,
    pub url: Option<String>,
    pub image: Option<JsonPayload>,
}

/// An entity (person, place, thing) result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityResult {
    pub name: String,
    pub content: String,
    pub url: Option<String>,
    pub image: Option<JsonPayload>,
    /// The provider's `entityPresentationInfo` object
    pub info: Option<JsonPayload>,
}

/// A normalized search result.
///
/// Serializes as a flat object discriminated by `kind`. Absent optional
/// fields serialize as `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchResult {
    Web(WebResult),
    News(NewsResult),
    Entity(EntityResult),
}

impl SearchResult {
    /// Category this result came from
    pub fn category(&self) -> Category {
        match self {
            Self::Web(_) => Category::Web,
            Self::News(_) => Category::News,
            Self::Entity(_) => Category::Entity,
        }
    }

    /// Title for web and news results, name for entities
    pub fn title(&self) -> &str {
        match self {
            Self::Web(r) => &r.title,
            Self::News(r) => &r.title,
            Self::Entity(r) => &r.name,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Web(r) => r.url.as_deref(),
            Self::News(r) => r.url.as_deref(),
            Self::Entity(r) => r.url.as_deref(),
        }
    }
}

impl From<WebResult> for SearchResult {
    fn from(result: WebResult) -> Self {
        Self::Web(result)
    }
}

impl From<NewsResult> for SearchResult {
    fn from(result: NewsResult) -> Self {
        Self::News(result)
    }
}

impl From<EntityResult> for SearchResult {
    fn from(result: EntityResult) -> Self {
        Self::Entity(result)
    }
}

/// What a query hands back: raw records or one tagged string per record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchOutput {
    Records(Vec<SearchResult>),
    Tagged(Vec<String>),
}

impl SearchOutput {
    pub fn len(&self) -> usize {
        match self {
            Self::Records(records) => records.len(),
            Self::Tagged(tagged) => tagged.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
