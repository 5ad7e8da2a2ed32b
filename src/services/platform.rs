// src/services/platform.rs

//! Publishing platform client.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::PublisherConfig;
use crate::utils::http;

/// An article to create on the platform.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub published: bool,
    pub body_markdown: String,
    pub tags: Vec<String>,
    pub series: String,
    pub canonical_url: Option<String>,
}

#[derive(Serialize)]
struct CreateRequest<'a> {
    article: &'a NewArticle,
}

#[derive(Deserialize)]
struct ArticleSummary {
    #[serde(default)]
    title: Option<String>,
}

/// Operations the publisher needs from a blogging platform.
#[async_trait]
pub trait ArticlePlatform: Send + Sync {
    /// Titles of every article owned by the authenticated user.
    async fn existing_titles(&self) -> Result<HashSet<String>>;

    /// Create and publish an article.
    async fn create_article(&self, article: &NewArticle) -> Result<()>;
}

/// Dev.to (Forem) API client.
pub struct DevToClient {
    client: Client,
    api_key: String,
    config: PublisherConfig,
}

impl DevToClient {
    pub fn new(api_key: impl Into<String>, config: PublisherConfig) -> Result<Self> {
        let client = http::create_async_client(
            concat!("feed-digest/", env!("CARGO_PKG_VERSION")),
            config.create_timeout_secs,
        )?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base.trim_end_matches('/'), path)
    }

    async fn list_page(&self, page: usize) -> Result<Vec<ArticleSummary>> {
        let response = self
            .client
            .get(self.endpoint("articles/me"))
            .header("api-key", &self.api_key)
            .query(&[("per_page", self.config.page_size), ("page", page)])
            .timeout(Duration::from_secs(self.config.list_timeout_secs))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ArticlePlatform for DevToClient {
    async fn existing_titles(&self) -> Result<HashSet<String>> {
        let mut titles = HashSet::new();
        let mut page = 1;
        loop {
            let articles = self.list_page(page).await?;
            if articles.is_empty() {
                break;
            }
            titles.extend(articles.into_iter().filter_map(|a| a.title));
            page += 1;
        }
        log::debug!("Found {} existing articles", titles.len());
        Ok(titles)
    }

    async fn create_article(&self, article: &NewArticle) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("articles"))
            .header("api-key", &self.api_key)
            .json(&CreateRequest { article })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::publish(status.as_u16(), body))
    }
}
