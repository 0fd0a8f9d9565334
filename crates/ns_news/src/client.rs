use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ns_core::{Article, ArticleSource, Error, Notice, NoticeSink, Result, Topic};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::logging::Logger;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";
const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub base_url: String,
    pub country: String,
    pub timeout: Duration,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            country: "us".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Deserialize)]
struct RawSource {
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    source: Option<RawSource>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
}

impl RawArticle {
    fn into_article(self) -> Option<Article> {
        if self.title.is_none() && self.url.is_none() {
            return None;
        }
        let published_at = self
            .published_at
            .as_deref()
            .and_then(|p| DateTime::parse_from_rfc3339(p).ok())
            .map(|p| p.with_timezone(&Utc));
        Some(Article {
            title: self.title.unwrap_or_default(),
            description: self.description,
            source_name: self
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            image_url: self.url_to_image.filter(|u| !u.trim().is_empty()),
            url: self.url.unwrap_or_default(),
            published_at,
        })
    }
}

/// Top-headlines client for NewsAPI.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    config: NewsConfig,
    logger: Logger,
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}

impl NewsApiClient {
    pub fn new(api_key: impl Into<String>, config: NewsConfig) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::MissingSecret("news API key".to_string()));
        }
        Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("Invalid news base URL {}: {}", config.base_url, e)))?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key,
            config,
            logger: Logger::new().with_prefix("📰 newsapi"),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v2/top-headlines", self.config.base_url.trim_end_matches('/'))
    }

    async fn request(&self, topic: &Topic) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[
                ("category", topic.query_value()),
                ("country", self.config.country.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Fetch(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<HeadlinesResponse>()
                .await
                .ok()
                .and_then(|body| body.message)
                .map(|m| format!(": {}", m))
                .unwrap_or_default();
            return Err(Error::Fetch(format!("HTTP {}{}", status.as_u16(), detail)));
        }

        let body: HeadlinesResponse = response
            .json()
            .await
            .map_err(|e| Error::Fetch(format!("malformed response: {}", e.without_url())))?;
        if body.status == "error" {
            return Err(Error::Fetch(
                body.message.unwrap_or_else(|| "unknown API error".to_string()),
            ));
        }

        Ok(body
            .articles
            .into_iter()
            .filter_map(RawArticle::into_article)
            .collect())
    }
}

#[async_trait]
impl ArticleSource for NewsApiClient {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch_top_headlines(&self, topic: &Topic, notices: &dyn NoticeSink) -> Vec<Article> {
        self.logger.debug(&format!("fetching {} headlines", topic));
        match self.request(topic).await {
            Ok(articles) => {
                self.logger
                    .info(&format!("fetched {} {} articles", articles.len(), topic));
                articles
            }
            Err(e) => {
                self.logger
                    .warn(&format!("failed to fetch {} headlines: {}", topic, e));
                notices.notify(Notice::error(format!(
                    "Failed to fetch news for {}: {}",
                    topic.label(),
                    e
                )));
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        let result = NewsApiClient::new("  ", NewsConfig::default());
        assert!(matches!(result, Err(Error::MissingSecret(_))));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let config = NewsConfig {
            base_url: "not a url".to_string(),
            ..NewsConfig::default()
        };
        assert!(matches!(
            NewsApiClient::new("key", config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = NewsApiClient::new("super-secret", NewsConfig::default()).unwrap();
        assert!(!format!("{:?}", client).contains("super-secret"));
    }

    #[test]
    fn test_raw_article_conversion() {
        let raw: RawArticle = serde_json::from_str(
            r#"{"source": {"id": null, "name": "BBC News"}, "title": "Title", "description": null,
                "url": "https://bbc.co.uk/a", "urlToImage": "", "publishedAt": "2024-05-01T10:30:00Z"}"#,
        )
        .unwrap();
        let article = raw.into_article().unwrap();
        assert_eq!(article.source_name, "BBC News");
        assert_eq!(article.description, None);
        assert_eq!(article.image_url, None);
        assert_eq!(
            article.published_at.unwrap().to_rfc3339(),
            "2024-05-01T10:30:00+00:00"
        );

        let empty: RawArticle = serde_json::from_str(r#"{"source": null}"#).unwrap();
        assert!(empty.into_article().is_none());
    }
}
