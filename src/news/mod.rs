pub mod types;

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::config::ApiKey;
use crate::topic::Topic;
pub use types::{Article, HeadlineBatch};
use types::EverythingResponse;

const API_BASE: &str = "https://newsapi.org";
const LANGUAGE: &str = "en";
/// Only the first N articles of a response are considered for narration.
pub const MAX_HEADLINES: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    #[error("Error fetching news ({status}): {body}")]
    Fetch { status: u16, body: String },

    #[error("No news articles found for this topic.")]
    NoArticles,

    #[error("Invalid NewsAPI URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Source of headlines for a topic.
/// Implemented by `NewsClient` for production; fakes used in pipeline tests.
pub trait NewsSource {
    async fn headlines(&self, topic: &Topic) -> Result<HeadlineBatch, NewsError>;
}

/// HTTP client for the NewsAPI `everything` endpoint.
#[derive(Clone, Debug)]
pub struct NewsClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
}

impl NewsClient {
    pub fn new(http: Client, api_key: ApiKey) -> Self {
        Self {
            http,
            api_key,
            base_url: API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey::new("test-key"),
            base_url: base_url.to_string(),
        }
    }

    async fn everything(&self, query: &str) -> Result<EverythingResponse, NewsError> {
        let url = Url::parse_with_params(
            &format!("{}/v2/everything", self.base_url),
            &[("q", query), ("language", LANGUAGE)],
        )?;

        // Key goes in a header so it never appears in URLs embedded in reqwest errors.
        let response = self
            .http
            .get(url)
            .header("X-Api-Key", self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "NewsAPI error");
            return Err(NewsError::Fetch {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

impl NewsSource for NewsClient {
    async fn headlines(&self, topic: &Topic) -> Result<HeadlineBatch, NewsError> {
        let response = self.everything(topic.as_str()).await?;
        debug!(articles = response.articles.len(), "news search complete");
        build_batch(&response.articles)
    }
}

/// Select narration input from a raw article list.
///
/// `main_topic` is taken from the first article before filtering, so it may name an
/// article that is absent from `headline_text` when that article has no description.
pub fn build_batch(articles: &[Article]) -> Result<HeadlineBatch, NewsError> {
    let Some(first) = articles.first() else {
        return Err(NewsError::NoArticles);
    };

    let headline_text = articles
        .iter()
        .take(MAX_HEADLINES)
        .filter_map(|a| {
            let description = a.description.as_deref().filter(|d| !d.is_empty())?;
            Some(format!(
                "{}. {}",
                a.title.as_deref().unwrap_or_default(),
                description
            ))
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(HeadlineBatch {
        main_topic: first.title.clone().unwrap_or_default(),
        headline_text,
        article_count: articles.len(),
    })
}
