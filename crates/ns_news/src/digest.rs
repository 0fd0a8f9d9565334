use ns_core::{Article, ArticleSource, Category, Notice, NoticeSink, Result, Topic};
use serde::Serialize;

pub const EMPTY_PREFERENCES: &str = "Select at least one category to get personalized news";

#[derive(Debug, Clone, Serialize)]
pub struct DigestSection {
    pub topic: Topic,
    pub articles: Vec<Article>,
}

/// Parses a comma separated preference list such as `business,health`.
/// Blank entries are ignored; unknown categories are rejected.
pub fn parse_preferences(raw: &str) -> Result<Vec<Category>> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::parse)
        .collect()
}

/// Fetches one section per preferred category, in order, one request at a time.
pub async fn personalized_digest(
    source: &dyn ArticleSource,
    preferences: &[Category],
    notices: &dyn NoticeSink,
) -> Vec<DigestSection> {
    if preferences.is_empty() {
        notices.notify(Notice::warning(EMPTY_PREFERENCES));
        return Vec::new();
    }

    let mut seen = Vec::with_capacity(preferences.len());
    let mut sections = Vec::with_capacity(preferences.len());
    for category in preferences {
        if seen.contains(category) {
            continue;
        }
        seen.push(*category);
        let topic = Topic::Category(*category);
        let articles = source.fetch_top_headlines(&topic, notices).await;
        sections.push(DigestSection { topic, articles });
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ns_core::NoticeBuffer;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSource {
        requested: Mutex<Vec<Topic>>,
    }

    #[async_trait]
    impl ArticleSource for RecordingSource {
        fn name(&self) -> &str {
            "recording"
        }

        async fn fetch_top_headlines(&self, topic: &Topic, _notices: &dyn NoticeSink) -> Vec<Article> {
            self.requested.lock().unwrap().push(*topic);
            vec![Article {
                title: format!("{} headline", topic),
                description: None,
                source_name: "test".to_string(),
                image_url: None,
                url: format!("https://example.com/{}", topic),
                published_at: None,
            }]
        }
    }

    #[test]
    fn test_parse_preferences() {
        assert_eq!(
            parse_preferences("business, health,,").unwrap(),
            vec![Category::Business, Category::Health]
        );
        assert!(parse_preferences("").unwrap().is_empty());
        assert!(parse_preferences("business,weather").is_err());
    }

    #[tokio::test]
    async fn test_digest_sections_in_order() {
        let source = RecordingSource::default();
        let notices = NoticeBuffer::new();
        let sections = personalized_digest(
            &source,
            &[Category::Sports, Category::Business, Category::Sports],
            &notices,
        )
        .await;

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].topic, Topic::Category(Category::Sports));
        assert_eq!(sections[1].articles[0].title, "business headline");
        assert_eq!(source.requested.lock().unwrap().len(), 2);
        assert!(notices.is_empty());
    }

    #[tokio::test]
    async fn test_empty_preferences_warns() {
        let source = RecordingSource::default();
        let notices = NoticeBuffer::new();
        let sections = personalized_digest(&source, &[], &notices).await;

        assert!(sections.is_empty());
        assert!(source.requested.lock().unwrap().is_empty());
        assert_eq!(notices.take(), vec![Notice::warning(EMPTY_PREFERENCES)]);
    }
}
