//! Search execution and orchestration

use super::models::SearchQuery;
use crate::config::{SearchSettings, Settings};
use crate::engines::{BingEntities, BingNews, BingWeb, Engine, RequestParams};
use crate::error::{Result, SearchError};
use crate::network::HttpClient;
use crate::results::{format_results, SearchOutput, SearchResult};
use futures::future::try_join_all;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Search executor that queries every enabled category endpoint
#[derive(Clone)]
pub struct Search {
    /// HTTP client for making requests
    client: HttpClient,
    /// Default query options
    options: SearchSettings,
    web: BingWeb,
    news: BingNews,
    entities: BingEntities,
}

impl Search {
    /// Create a new search executor.
    ///
    /// Fails with a configuration error before any request when no
    /// subscription key is available.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = HttpClient::with_settings(settings)?;
        let endpoints = &settings.outgoing.endpoints;

        Ok(Self {
            client,
            options: settings.search.clone(),
            web: BingWeb::new(&endpoints.web),
            news: BingNews::new(&endpoints.news),
            entities: BingEntities::new(&endpoints.entity),
        })
    }

    /// Default query options from settings
    pub fn options(&self) -> &SearchSettings {
        &self.options
    }

    /// Search with the configured options, returning records or tagged
    /// strings depending on `format_output`
    pub async fn execute(&self, query: &str) -> Result<SearchOutput> {
        let search_query = SearchQuery::from_settings(query, &self.options);
        let results = self.search(&search_query).await?;
        Ok(format_results(results, self.options.format_output))
    }

    /// Query every enabled category and return web, news, then entity
    /// results. The first failing category aborts the whole query.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
        let params = RequestParams::from_query(query);

        let mut engines: Vec<&dyn Engine> = vec![&self.web];
        if query.include_news {
            engines.push(&self.news);
        }
        if query.include_entity {
            engines.push(&self.entities);
        }

        info!(
            "Executing search '{}' on {} endpoints",
            query.query,
            engines.len()
        );

        let start = Instant::now();
        let batches = try_join_all(
            engines
                .into_iter()
                .map(|engine| self.search_engine(engine, &params)),
        )
        .await?;

        // try_join_all yields in input order, so the category order holds
        let results: Vec<SearchResult> = batches.into_iter().flatten().collect();
        debug!(
            "Search '{}' returned {} results in {:?}",
            query.query,
            results.len(),
            start.elapsed()
        );

        Ok(results)
    }

    /// Search a single engine
    async fn search_engine(
        &self,
        engine: &dyn Engine,
        params: &RequestParams,
    ) -> Result<Vec<SearchResult>> {
        let start = Instant::now();
        let request = engine.request(params);

        let response = self.client.execute(request).await.map_err(|source| {
            warn!("Request failed for {}: {}", engine.name(), source);
            SearchError::Transport {
                endpoint: engine.category(),
                source,
            }
        })?;

        let results = engine.response(response).map_err(|e| {
            warn!("{} failed: {}", engine.name(), e);
            e
        })?;

        debug!(
            "Engine {} returned {} results in {:?}",
            engine.name(),
            results.len(),
            start.elapsed()
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_requires_key() {
        let result = Search::new(&Settings::default());
        assert!(matches!(result, Err(SearchError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_search_executor_creation() {
        let mut settings = Settings::with_api_key("test-key");
        settings.search.include_news = true;

        let search = Search::new(&settings).unwrap();
        assert!(search.options().include_news);
        assert_eq!(search.web.endpoint(), settings.outgoing.endpoints.web);
        assert_eq!(search.entities.endpoint(), settings.outgoing.endpoints.entity);
    }
}
