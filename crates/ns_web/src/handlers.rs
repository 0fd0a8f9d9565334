use std::sync::Arc;

use axum::extract::{Query, RawQuery, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use chrono::Local;
use ns_core::{Category, LanguageCode, Notice, NoticeBuffer, NoticeSink, SynthesisRequest, Topic};
use ns_news::{fetch_category, parse_preferences, personalized_digest};
use ns_speech::default_language;
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::render::{self, ArticleCard, DashboardView, TopicSection};
use crate::AppState;

pub const DEFAULT_CATEGORY: &str = "general";

/// Query of the dashboard page. `personalized` may be repeated (one
/// checkbox per category) or carry a comma separated list; it only takes
/// effect with `digest=on`.
#[derive(Debug, Default, PartialEq)]
pub struct DashboardQuery {
    pub category: Option<String>,
    pub domain: Option<String>,
    pub digest: bool,
    pub personalized: Vec<String>,
}

impl DashboardQuery {
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "category" => query.category = Some(value.into_owned()),
                "domain" => query.domain = Some(value.into_owned()),
                "digest" => query.digest = value == "on" || value == "true",
                "personalized" => query.personalized.push(value.into_owned()),
                _ => {}
            }
        }
        query
    }
}

#[derive(Debug, Deserialize)]
pub struct HeadlinesQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HeadlinesResponse {
    pub topic: Topic,
    pub articles: Vec<ArticleCard>,
    pub notices: Vec<Notice>,
}

async fn load_languages(state: &AppState, notices: &dyn NoticeSink) -> Vec<LanguageCode> {
    match state.languages.supported_languages().await {
        Ok(languages) => languages,
        Err(e) => {
            tracing::warn!("⚠️ Language catalog unavailable: {}", e);
            notices.notify(Notice::warning(format!("Audio conversion unavailable: {}", e)));
            Vec::new()
        }
    }
}

fn bad_request_page(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Html(render::error_page(message))).into_response()
}

pub async fn dashboard(State(state): State<Arc<AppState>>, RawQuery(raw): RawQuery) -> Response {
    let query = DashboardQuery::parse(raw.as_deref());
    let category = query.category.as_deref().unwrap_or(DEFAULT_CATEGORY);
    // the sidebar always submits its domain selector
    let domain = query
        .domain
        .as_deref()
        .filter(|_| category.parse::<Category>().ok() == Some(Category::Technology));
    let topic = match Topic::resolve(category, domain) {
        Ok(topic) => topic,
        Err(e) => return bad_request_page(&e.to_string()),
    };
    let preferences: Vec<Category> = match parse_preferences(&query.personalized.join(",")) {
        Ok(preferences) => preferences,
        Err(e) => return bad_request_page(&e.to_string()),
    };

    let notices = NoticeBuffer::new();
    let languages = load_languages(&state, &notices).await;

    let digest = if query.digest {
        let sections = personalized_digest(state.articles.as_ref(), &preferences, &notices).await;
        Some(
            sections
                .into_iter()
                .map(|section| TopicSection {
                    topic: section.topic,
                    cards: ArticleCard::from_articles(section.articles, &state.classifier),
                })
                .collect::<Vec<_>>(),
        )
    } else {
        None
    };

    let articles = state.articles.fetch_top_headlines(&topic, &notices).await;
    let cards = ArticleCard::from_articles(articles, &state.classifier);
    let notices = notices.take();
    let updated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    Html(render::dashboard(&DashboardView {
        topic,
        cards: &cards,
        digest: digest.as_deref(),
        preferences: &preferences,
        languages: &languages,
        notices: &notices,
        updated_at: &updated_at,
    }))
    .into_response()
}

pub async fn headlines(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HeadlinesQuery>,
) -> Result<Json<HeadlinesResponse>, ApiError> {
    let notices = NoticeBuffer::new();
    let category = query.category.as_deref().unwrap_or(DEFAULT_CATEGORY);
    let (topic, articles) = fetch_category(
        state.articles.as_ref(),
        category,
        query.domain.as_deref(),
        &notices,
    )
    .await?;

    Ok(Json(HeadlinesResponse {
        topic,
        articles: ArticleCard::from_articles(articles, &state.classifier),
        notices: notices.take(),
    }))
}

pub async fn languages(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let languages = state.languages.supported_languages().await?;
    let default = default_language(&languages).cloned();
    Ok(Json(json!({ "languages": languages, "default": default })))
}

async fn synthesize(state: &AppState, request: SynthesisRequest) -> Result<Response, ApiError> {
    tracing::info!(
        language = %request.language,
        chars = request.text.chars().count(),
        "🔊 Converting text to audio"
    );
    let audio = state.synthesizer.synthesize(&request).await?;
    Ok(([(header::CONTENT_TYPE, audio.content_type())], audio.bytes).into_response())
}

pub async fn speech(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SynthesisRequest>,
) -> Result<Response, ApiError> {
    synthesize(&state, request).await
}

pub async fn audio_form(
    State(state): State<Arc<AppState>>,
    Form(request): Form<SynthesisRequest>,
) -> Response {
    match synthesize(&state, request).await {
        Ok(response) => response,
        Err(err) => err.into_page(),
    }
}

pub async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dashboard_query() {
        let query = DashboardQuery::parse(Some(
            "category=technology&domain=ai&personalized=business&personalized=health%2Csports",
        ));
        assert_eq!(query.category.as_deref(), Some("technology"));
        assert_eq!(query.domain.as_deref(), Some("ai"));
        assert!(!query.digest);
        assert_eq!(query.personalized, vec!["business", "health,sports"]);
    }

    #[test]
    fn test_parse_empty_query() {
        assert_eq!(DashboardQuery::parse(None), DashboardQuery::default());

        let query = DashboardQuery::parse(Some("digest=on&domain="));
        assert!(query.digest);
        assert!(query.personalized.is_empty());
        assert_eq!(query.domain.as_deref(), Some(""));
    }
}
