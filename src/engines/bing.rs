//! Bing Web, News and Entity search engine implementations
//!
//! All three talk to the official v7.0 JSON API and share the same base
//! query parameters. Each one digs its result array out of a different
//! container and maps the provider's field names onto a uniform record.

use super::traits::*;
use crate::config::{DEFAULT_ENTITY_ENDPOINT, DEFAULT_NEWS_ENDPOINT, DEFAULT_WEB_ENDPOINT};
use crate::error::Result;
use crate::results::{Category, EntityResult, JsonPayload, NewsResult, SearchResult, WebResult};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::value::RawValue;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Market used for entity search regardless of the configured locale.
/// Entity search is only reliable in this market.
pub const ENTITY_MARKET: &str = "en-US";

/// Build a GET with the parameters every Bing endpoint takes
fn base_request(url: &str, params: &RequestParams, market: &str) -> EngineRequest {
    EngineRequest::get(url)
        .param("q", params.query.clone())
        .param("count", params.count.to_string())
        .param("textDecorations", "true")
        .param("textFormat", "HTML")
        .param("mkt", market)
}

/// Member `key` of a JSON object; none if `raw` is not an object
fn member(raw: &RawValue, key: &str) -> Option<Box<RawValue>> {
    serde_json::from_str::<HashMap<String, Box<RawValue>>>(raw.get())
        .ok()?
        .remove(key)
}

/// Items of the array under `path`, or none if the container is missing
/// or is not an array
fn container_items(body: Box<RawValue>, path: &[&str]) -> Vec<Box<RawValue>> {
    let mut current = body;
    for key in path {
        match member(&current, key) {
            Some(next) => current = next,
            None => return Vec::new(),
        }
    }
    serde_json::from_str(current.get()).unwrap_or_default()
}

/// Deserialize each item, skipping the ones that don't fit
fn parse_items<T: DeserializeOwned>(engine: &str, items: &[Box<RawValue>]) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter_map(|(position, item)| match serde_json::from_str(item.get()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("{}: skipping item {}: {}", engine, position, e);
                None
            }
        })
        .collect()
}

/// A member that is present is captured even when it is `null`
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Box<RawValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    Box::<RawValue>::deserialize(deserializer).map(Some)
}

fn payload(raw: Option<Box<RawValue>>) -> Option<JsonPayload> {
    raw.as_deref().map(JsonPayload::from_raw)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebPage {
    name: Option<String>,
    snippet: Option<String>,
    url: Option<String>,
    thumbnail_url: Option<String>,
    site_name: Option<String>,
}

impl From<WebPage> for SearchResult {
    fn from(page: WebPage) -> Self {
        SearchResult::Web(WebResult {
            title: page.name.unwrap_or_default(),
            content: page.snippet.unwrap_or_default(),
            url: page.url,
            thumbnail_url: page.thumbnail_url,
            source: page.site_name,
        })
    }
}

#[derive(Debug, Deserialize)]
struct NewsArticle {
    name: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(default, deserialize_with = "present")]
    image: Option<Box<RawValue>>,
}

impl From<NewsArticle> for SearchResult {
    fn from(article: NewsArticle) -> Self {
        SearchResult::News(NewsResult {
            title: article.name.unwrap_or_default(),
            content: article.description.unwrap_or_default(),
            url: article.url,
            image: payload(article.image),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Entity {
    name: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(default, deserialize_with = "present")]
    image: Option<Box<RawValue>>,
    #[serde(default, deserialize_with = "present")]
    entity_presentation_info: Option<Box<RawValue>>,
}

impl From<Entity> for SearchResult {
    fn from(entity: Entity) -> Self {
        SearchResult::Entity(EntityResult {
            name: entity.name.unwrap_or_default(),
            content: entity.description.unwrap_or_default(),
            url: entity.url,
            image: payload(entity.image),
            info: payload(entity.entity_presentation_info),
        })
    }
}

/// Bing web search engine
#[derive(Debug, Clone)]
pub struct BingWeb {
    base_url: String,
}

impl BingWeb {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for BingWeb {
    fn default() -> Self {
        Self::new(DEFAULT_WEB_ENDPOINT)
    }
}

impl Engine for BingWeb {
    fn name(&self) -> &str {
        "bing_web"
    }

    fn category(&self) -> Category {
        Category::Web
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }

    fn request(&self, params: &RequestParams) -> EngineRequest {
        base_request(&self.base_url, params, &params.market)
    }

    fn response(&self, response: EngineResponse) -> Result<Vec<SearchResult>> {
        self.check_status(&response)?;
        let body = self.parse_body(&response)?;

        let items = container_items(body, &["webPages", "value"]);
        Ok(parse_items::<WebPage>(self.name(), &items)
            .into_iter()
            .map(SearchResult::from)
            .collect())
    }
}

/// Bing news search engine
#[derive(Debug, Clone)]
pub struct BingNews {
    base_url: String,
}

impl BingNews {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for BingNews {
    fn default() -> Self {
        Self::new(DEFAULT_NEWS_ENDPOINT)
    }
}

impl Engine for BingNews {
    fn name(&self) -> &str {
        "bing_news"
    }

    fn category(&self) -> Category {
        Category::News
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }

    fn request(&self, params: &RequestParams) -> EngineRequest {
        let request = base_request(&self.base_url, params, &params.market);

        // Left out entirely when unset
        match params.freshness {
            Some(freshness) => request.param("freshness", freshness.as_str()),
            None => request,
        }
    }

    fn response(&self, response: EngineResponse) -> Result<Vec<SearchResult>> {
        self.check_status(&response)?;
        let body = self.parse_body(&response)?;

        let items = container_items(body, &["value"]);
        Ok(parse_items::<NewsArticle>(self.name(), &items)
            .into_iter()
            .map(SearchResult::from)
            .collect())
    }
}

/// Bing entity search engine
#[derive(Debug, Clone)]
pub struct BingEntities {
    base_url: String,
}

impl BingEntities {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for BingEntities {
    fn default() -> Self {
        Self::new(DEFAULT_ENTITY_ENDPOINT)
    }
}

impl Engine for BingEntities {
    fn name(&self) -> &str {
        "bing_entities"
    }

    fn category(&self) -> Category {
        Category::Entity
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }

    fn request(&self, params: &RequestParams) -> EngineRequest {
        base_request(&self.base_url, params, ENTITY_MARKET)
    }

    fn response(&self, response: EngineResponse) -> Result<Vec<SearchResult>> {
        self.check_status(&response)?;
        let body = self.parse_body(&response)?;

        let items = container_items(body, &["entities", "value"]);
        let results: Vec<SearchResult> = parse_items::<Entity>(self.name(), &items)
            .into_iter()
            .map(SearchResult::from)
            .collect();

        debug!("{} results: {:?}", self.name(), results);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::search::Freshness;
    use serde_json::json;

    fn ok(body: serde_json::Value) -> EngineResponse {
        EngineResponse::new(200, body.to_string())
    }

    #[test]
    fn test_web_request() {
        let web = BingWeb::default();
        let mut params = RequestParams::new("weather forecast");
        params.count = 2;
        params.market = "de-DE".to_string();
        let request = web.request(&params);

        assert_eq!(request.url, DEFAULT_WEB_ENDPOINT);
        assert_eq!(request.params["q"], "weather forecast");
        assert_eq!(request.params["count"], "2");
        assert_eq!(request.params["mkt"], "de-DE");
        assert_eq!(request.params["textDecorations"], "true");
        assert_eq!(request.params["textFormat"], "HTML");
        assert!(!request.params.contains_key("freshness"));
    }

    #[test]
    fn test_news_request_freshness() {
        let news = BingNews::default();
        let mut params = RequestParams::new("election");

        let request = news.request(&params);
        assert!(!request.params.contains_key("freshness"));

        params.freshness = Some(Freshness::Week);
        let request = news.request(&params);
        assert_eq!(request.params["freshness"], "Week");
    }

    #[test]
    fn test_entity_request_forces_market() {
        let entities = BingEntities::default();
        let mut params = RequestParams::new("space needle");
        params.market = "ja-JP".to_string();
        let request = entities.request(&params);

        assert_eq!(request.url, DEFAULT_ENTITY_ENDPOINT);
        assert_eq!(request.params["mkt"], ENTITY_MARKET);
    }

    #[test]
    fn test_web_response_maps_fields() {
        let body = json!({
            "_type": "SearchResponse",
            "webPages": {
                "value": [
                    {"name": "A", "snippet": "a snippet", "url": "https://a.example",
                     "thumbnailUrl": "https://a.example/t.jpg", "siteName": "A Site"},
                    {"name": "B", "snippet": "b snippet"}
                ]
            }
        });

        let results = BingWeb::default().response(ok(body)).unwrap();
        assert_eq!(
            results,
            vec![
                SearchResult::Web(WebResult {
                    title: "A".to_string(),
                    content: "a snippet".to_string(),
                    url: Some("https://a.example".to_string()),
                    thumbnail_url: Some("https://a.example/t.jpg".to_string()),
                    source: Some("A Site".to_string()),
                }),
                SearchResult::Web(WebResult {
                    title: "B".to_string(),
                    content: "b snippet".to_string(),
                    url: None,
                    thumbnail_url: None,
                    source: None,
                }),
            ]
        );
    }

    #[test]
    fn test_missing_container_is_empty() {
        let body = json!({"_type": "SearchResponse", "rankingResponse": {}});
        assert!(BingWeb::default().response(ok(body.clone())).unwrap().is_empty());
        assert!(BingNews::default().response(ok(body.clone())).unwrap().is_empty());
        assert!(BingEntities::default().response(ok(body)).unwrap().is_empty());

        let wrong_shape = json!({"webPages": {"value": "nope"}});
        assert!(BingWeb::default().response(ok(wrong_shape)).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_items_are_skipped() {
        let body = json!({"value": [42, {"name": "Kept", "description": "d"}]});
        let results = BingNews::default().response(ok(body)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title(), "Kept");
    }

    #[test]
    fn test_news_response_serializes_image() {
        let body = json!({
            "value": [{
                "name": "Headline",
                "description": "Body",
                "url": "https://news.example/1",
                "image": {"thumbnail": {"contentUrl": "https://img.example/1", "width": 700}}
            }]
        });

        let results = BingNews::default().response(ok(body)).unwrap();
        match &results[0] {
            SearchResult::News(news) => {
                assert_eq!(news.title, "Headline");
                assert_eq!(news.content, "Body");
                assert_eq!(
                    news.image.as_ref().unwrap().as_str(),
                    r#"{"thumbnail":{"contentUrl":"https://img.example/1","width":700}}"#
                );
            }
            other => panic!("expected news result, got {other:?}"),
        }
    }

    #[test]
    fn test_entity_response_serializes_info() {
        let body = json!({
            "entities": {
                "value": [{
                    "name": "Space Needle",
                    "description": "Observation tower",
                    "url": "https://www.spaceneedle.com",
                    "entityPresentationInfo": {"entityScenario": "DominantEntity"}
                }]
            }
        });

        let results = BingEntities::default().response(ok(body)).unwrap();
        match &results[0] {
            SearchResult::Entity(entity) => {
                assert_eq!(entity.name, "Space Needle");
                assert_eq!(entity.content, "Observation tower");
                assert!(entity.image.is_none());
                assert_eq!(
                    entity.info.as_ref().unwrap().as_str(),
                    r#"{"entityScenario":"DominantEntity"}"#
                );
            }
            other => panic!("expected entity result, got {other:?}"),
        }
    }

    #[test]
    fn test_non_success_status_is_upstream_error() {
        let response = EngineResponse::new(401, r#"{"error": "denied"}"#);
        let err = BingWeb::default().response(response).unwrap_err();
        assert!(matches!(
            err,
            SearchError::UpstreamRequest {
                endpoint: Category::Web,
                status: 401
            }
        ));
    }

    #[test]
    fn test_non_json_body_is_decode_error() {
        let response = EngineResponse::new(200, "<html>maintenance</html>");
        let err = BingNews::default().response(response).unwrap_err();
        assert!(matches!(
            err,
            SearchError::Decode {
                endpoint: Category::News,
                ..
            }
        ));
    }

    #[test]
    fn test_payloads_keep_provider_text() {
        let body = r#"{"value": [{
            "name": "Big numbers",
            "image": {"id": 12345678901234567890123, "w": 1.50}
        }]}"#;

        let results = BingNews::default()
            .response(EngineResponse::new(200, body))
            .unwrap();
        match &results[0] {
            SearchResult::News(news) => assert_eq!(
                news.image.as_ref().unwrap().as_str(),
                r#"{"id": 12345678901234567890123, "w": 1.50}"#
            ),
            other => panic!("expected news result, got {other:?}"),
        }
    }

    #[test]
    fn test_null_payload_is_kept_as_null_text() {
        let body = r#"{"entities": {"value": [
            {"name": "No picture", "image": null},
            {"name": "No fields"}
        ]}}"#;

        let results = BingEntities::default()
            .response(EngineResponse::new(200, body))
            .unwrap();
        match (&results[0], &results[1]) {
            (SearchResult::Entity(with_null), SearchResult::Entity(absent)) => {
                assert_eq!(
                    with_null.image.as_ref().map(JsonPayload::as_str),
                    Some("null")
                );
                assert!(with_null.info.is_none());
                assert!(absent.image.is_none());
                assert!(absent.info.is_none());
            }
            other => panic!("expected entity results, got {other:?}"),
        }
    }
}
