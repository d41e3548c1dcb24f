pub mod news_api;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::error::Result;

pub use news_api::NewsApiClient;

/// Endpoint selector for the two provider operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    TopHeadlines,
    Everything,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::TopHeadlines => "/top-headlines",
            Endpoint::Everything => "/everything",
        }
    }

    /// The opaque message shown to the user when a call to this
    /// endpoint fails. The real cause only goes to the log.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Endpoint::TopHeadlines => "failed to fetch articles",
            Endpoint::Everything => "failed to search articles",
        }
    }
}

#[async_trait]
pub trait Fetcher {
    /// Perform a GET against `endpoint` with the given query
    /// parameters and return the decoded JSON body.
    async fn get(&self, endpoint: Endpoint, params: &[(String, String)]) -> Result<Value>;
}
