pub mod client;
pub mod digest;
pub mod logging;

use ns_core::{Article, ArticleSource, NoticeSink, Result, Topic};

pub use client::{NewsApiClient, NewsConfig};
pub use digest::{parse_preferences, personalized_digest, DigestSection};
pub use logging::{init_logging, Logger};

/// Validates the requested category (and technology domain) before any
/// request is made, then fetches its headlines.
pub async fn fetch_category(
    source: &dyn ArticleSource,
    category: &str,
    domain: Option<&str>,
    notices: &dyn NoticeSink,
) -> Result<(Topic, Vec<Article>)> {
    let topic = Topic::resolve(category, domain)?;
    let articles = source.fetch_top_headlines(&topic, notices).await;
    Ok((topic, articles))
}

pub mod prelude {
    pub use super::client::{NewsApiClient, NewsConfig};
    pub use super::digest::{personalized_digest, DigestSection};
    pub use ns_core::{Article, ArticleSource, Error, NoticeBuffer, Result, Topic};
}
