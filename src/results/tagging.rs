//! Tagged markup rendering for search results
//!
//! Each record becomes one self-contained `<document>` element, ready to be
//! pasted into a language-model prompt. Free text (title, content, name) is
//! escaped like a JSON string literal without its quotes. URLs and JSON
//! payloads come straight from the provider and are embedded as-is.

use super::types::{EntityResult, JsonPayload, NewsResult, SearchOutput, SearchResult, WebResult};
use std::fmt::Write;
use tracing::debug;

/// Render records as-is or as tagged strings, keeping their order
pub fn format_results(results: Vec<SearchResult>, format_output: bool) -> SearchOutput {
    if format_output {
        SearchOutput::Tagged(results.iter().map(tag_result).collect())
    } else {
        SearchOutput::Records(results)
    }
}

/// Render one record as a `<document>` element
pub fn tag_result(result: &SearchResult) -> String {
    match result {
        SearchResult::Web(web) => tag_web(web),
        SearchResult::News(news) => tag_news(news),
        SearchResult::Entity(entity) => tag_entity(entity),
    }
}

/// Render a record held as loose JSON.
///
/// Returns an empty string when `kind` is missing or unknown, or when the
/// object does not have the shape of its kind.
pub fn tag_value(value: &serde_json::Value) -> String {
    match serde_json::from_value::<SearchResult>(value.clone()) {
        Ok(result) => tag_result(&result),
        Err(e) => {
            debug!("Not tagging unrecognized record: {}", e);
            String::new()
        }
    }
}

/// Escape text the way a JSON string literal would, minus the quotes
pub fn escape_text(text: &str) -> String {
    serde_json::to_string(text)
        .ok()
        .and_then(|quoted| {
            quoted
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .map(str::to_owned)
        })
        .unwrap_or_default()
}

fn tag_web(web: &WebResult) -> String {
    let mut out = String::from("<document><kind>web</kind>");
    push_element(&mut out, "title", &escape_text(&web.title));
    push_element(&mut out, "content", &escape_text(&web.content));
    push_element(&mut out, "url", opt(&web.url));
    push_element(&mut out, "thumbnail_url", opt(&web.thumbnail_url));
    push_element(&mut out, "source", opt(&web.source));
    out.push_str("</document>");
    out
}

fn tag_news(news: &NewsResult) -> String {
    let mut out = String::from("<document><kind>news</kind>");
    push_element(&mut out, "title", &escape_text(&news.title));
    push_element(&mut out, "content", &escape_text(&news.content));
    push_element(&mut out, "url", opt(&news.url));
    push_element(&mut out, "image", payload(&news.image));
    out.push_str("</document>");
    out
}

fn tag_entity(entity: &EntityResult) -> String {
    let mut out = String::from("<document><kind>entity</kind>");
    push_element(&mut out, "name", &escape_text(&entity.name));
    push_element(&mut out, "content", &escape_text(&entity.content));
    push_element(&mut out, "url", opt(&entity.url));
    push_element(&mut out, "image", payload(&entity.image));
    push_element(&mut out, "info", payload(&entity.info));
    out.push_str("</document>");
    out
}

fn push_element(out: &mut String, tag: &str, body: &str) {
    // Writing into a String cannot fail
    let _ = write!(out, "<{tag}>{body}</{tag}>");
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

fn payload(value: &Option<JsonPayload>) -> &str {
    value.as_ref().map(JsonPayload::as_str).unwrap_or_default()
}
