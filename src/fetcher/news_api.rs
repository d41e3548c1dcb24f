use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::app::error::{GazetteError, Result};
use crate::config::{Config, API_KEY_ENV};
use crate::fetcher::{Endpoint, Fetcher};

const API_KEY_HEADER: &str = "X-Api-Key";
const DEFAULT_PAGE_SIZE: &str = "20";

/// HTTP client for the newsapi.org v2 API.
///
/// One `reqwest::Client` built at construction with a fixed timeout.
/// The API key travels in the `X-Api-Key` header so it never shows up
/// in logged URLs. A call is a single attempt; there is no retry or
/// backoff.
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    default_country: String,
}

impl NewsApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        // Fail early on a malformed base URL rather than per request.
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("gazette/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            default_country: config.default_country.clone(),
        })
    }

    /// Endpoint defaults, applied before caller parameters are merged
    /// in. Caller values win on key collision.
    fn default_params(&self, endpoint: Endpoint) -> Vec<(String, String)> {
        match endpoint {
            Endpoint::TopHeadlines => vec![
                ("country".into(), self.default_country.clone()),
                ("pageSize".into(), DEFAULT_PAGE_SIZE.into()),
            ],
            Endpoint::Everything => vec![
                ("sortBy".into(), "publishedAt".into()),
                ("pageSize".into(), DEFAULT_PAGE_SIZE.into()),
            ],
        }
    }

    fn merged_params(
        &self,
        endpoint: Endpoint,
        caller: &[(String, String)],
    ) -> Vec<(String, String)> {
        let mut merged = self.default_params(endpoint);
        for (key, value) in caller {
            merged.retain(|(k, _)| k != key);
            merged.push((key.clone(), value.clone()));
        }
        merged
    }

    async fn request(&self, endpoint: Endpoint, params: &[(String, String)]) -> Result<Value> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GazetteError::Config(format!(
                "no API key configured; set {API_KEY_ENV} or api_key in the config file"
            ))
        })?;

        let url = format!("{}{}", self.base_url, endpoint.path());
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .query(&self.merged_params(endpoint, params))
            .send()
            .await?;

        response.error_for_status_ref()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl Fetcher for NewsApiClient {
    async fn get(&self, endpoint: Endpoint, params: &[(String, String)]) -> Result<Value> {
        match self.request(endpoint, params).await {
            Ok(body) => Ok(body),
            // Configuration problems surface as-is; everything
            // transport-shaped collapses to the opaque message.
            Err(e @ GazetteError::Config(_)) => Err(e),
            Err(e) => {
                tracing::error!(endpoint = endpoint.path(), error = %e, "news api request failed");
                Err(GazetteError::Fetch(endpoint.failure_message().into()))
            }
        }
    }
}
