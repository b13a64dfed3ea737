//! HTTP client for making requests to the search provider

use crate::config::{OutgoingSettings, Settings};
use crate::engines::{EngineRequest, EngineResponse};
use crate::error::{Result, SearchError};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// Header carrying the provider subscription key
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// HTTP client wrapper that authenticates every request
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    api_key: String,
    timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a client from validated settings
    pub fn with_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let api_key = settings.search.api_key()?.to_string();
        Self::build(api_key, &settings.outgoing)
    }

    fn build(api_key: String, outgoing: &OutgoingSettings) -> Result<Self> {
        let timeout = Duration::from_secs_f64(outgoing.request_timeout);
        let mut builder = Client::builder().timeout(timeout).gzip(true).brotli(true);

        if let Some(ref proxy_url) = outgoing.proxies.all {
            builder = builder.proxy(Self::proxy(reqwest::Proxy::all(proxy_url))?);
        } else {
            if let Some(ref http) = outgoing.proxies.http {
                builder = builder.proxy(Self::proxy(reqwest::Proxy::http(http))?);
            }
            if let Some(ref https) = outgoing.proxies.https {
                builder = builder.proxy(Self::proxy(reqwest::Proxy::https(https))?);
            }
        }

        let client = builder
            .build()
            .map_err(|e| SearchError::Configuration(format!("cannot build HTTP client: {}", e)))?;

        let user_agent = outgoing
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("bing-search-rs/{}", crate::VERSION));

        Ok(Self {
            client,
            api_key,
            timeout,
            user_agent,
        })
    }

    fn proxy(proxy: reqwest::Result<reqwest::Proxy>) -> Result<reqwest::Proxy> {
        proxy.map_err(|e| SearchError::Configuration(format!("invalid proxy: {}", e)))
    }

    /// Execute an engine request
    pub async fn execute(&self, request: EngineRequest) -> reqwest::Result<EngineResponse> {
        let mut req_builder = self
            .client
            .get(&request.url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key);

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        debug!("GET {} with {} params", request.url, request.params.len());
        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Parse response into EngineResponse
    async fn parse_response(response: Response) -> reqwest::Result<EngineResponse> {
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(EngineResponse { status, text })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
