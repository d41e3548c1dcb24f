//! Query-mapping repository over the remote client.
//!
//! Translates typed request parameters into query pairs, hands them to
//! the [`Fetcher`] and normalizes the response body into a list of
//! [`Article`]s. A body without an `articles` field means "no results",
//! not an error; fetcher errors propagate unchanged.

use std::sync::Arc;

use serde_json::Value;

use crate::app::error::Result;
use crate::domain::{Article, SearchParams, TopHeadlinesParams};
use crate::fetcher::{Endpoint, Fetcher};

pub struct NewsRepository {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl NewsRepository {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self { fetcher }
    }

    pub async fn top_headlines(&self, params: &TopHeadlinesParams) -> Result<Vec<Article>> {
        let body = self
            .fetcher
            .get(Endpoint::TopHeadlines, &params.query_pairs())
            .await?;
        Self::extract_articles(body)
    }

    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Article>> {
        let body = self
            .fetcher
            .get(Endpoint::Everything, &params.query_pairs())
            .await?;
        Self::extract_articles(body)
    }

    fn extract_articles(mut body: Value) -> Result<Vec<Article>> {
        match body.get_mut("articles") {
            Some(articles) => Ok(serde_json::from_value(articles.take())?),
            None => Ok(Vec::new()),
        }
    }
}
