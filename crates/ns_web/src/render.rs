//! Server-side HTML for the dashboard.

use std::fmt::Write;

use ns_core::{Article, Category, LanguageCode, Notice, NoticeLevel, SentimentLabel, TechDomain, Topic};
use ns_inference::SentimentClassifier;
use ns_speech::default_language;
use serde::Serialize;

pub const PAGE_TITLE: &str = "📰 NewsSphere - Your Personalized News Experience";

/// An article together with what the dashboard derives from it.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleCard {
    #[serde(flatten)]
    pub article: Article,
    pub display_description: String,
    pub sentiment: SentimentLabel,
}

impl ArticleCard {
    pub fn new(article: Article, classifier: &SentimentClassifier) -> Self {
        let sentiment = classifier.classify_article(&article);
        Self {
            display_description: article.display_description().to_string(),
            article,
            sentiment,
        }
    }

    pub fn from_articles(articles: Vec<Article>, classifier: &SentimentClassifier) -> Vec<Self> {
        articles
            .into_iter()
            .map(|a| Self::new(a, classifier))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicSection {
    pub topic: Topic,
    pub cards: Vec<ArticleCard>,
}

#[derive(Debug)]
pub struct DashboardView<'a> {
    pub topic: Topic,
    pub cards: &'a [ArticleCard],
    pub digest: Option<&'a [TopicSection]>,
    pub preferences: &'a [Category],
    pub languages: &'a [LanguageCode],
    pub notices: &'a [Notice],
    pub updated_at: &'a str,
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn selected(is: bool) -> &'static str {
    if is {
        " selected"
    } else {
        ""
    }
}

fn page(body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n",
            "<title>NewsSphere</title>\n<style>\n",
            "body{{font-family:sans-serif;margin:0;display:flex}}",
            "aside{{width:260px;padding:1rem;background:#f3f4f6;min-height:100vh}}",
            "main{{flex:1;padding:1rem 2rem}}",
            ".card{{display:flex;gap:2rem}}.card .media{{flex:1.5}}.card .body{{flex:3}}",
            ".notice{{padding:.5rem 1rem;border-radius:4px;margin:.5rem 0}}",
            ".notice.error{{background:#fde2e2}}.notice.warning{{background:#fff4d6}}",
            ".caption{{color:#6b7280;font-size:.85rem}}\n",
            "</style>\n</head>\n<body>\n{}</body>\n</html>\n"
        ),
        body
    )
}

fn render_sidebar(out: &mut String, view: &DashboardView<'_>) {
    let (current_category, current_domain) = match view.topic {
        Topic::Category(c) => (c, None),
        Topic::Domain(d) => (Category::Technology, Some(d)),
    };

    out.push_str("<aside>\n<form method=\"get\" action=\"/\">\n<h2>Select Category</h2>\n");
    out.push_str("<select name=\"category\">\n");
    for category in Category::ALL {
        let _ = writeln!(
            out,
            "<option value=\"{}\"{}>{}</option>",
            category,
            selected(category == current_category),
            category
        );
    }
    out.push_str("</select>\n<h3>Select Domain</h3>\n<p class=\"caption\">technology only</p>\n");
    out.push_str("<select name=\"domain\">\n<option value=\"\">(all technology)</option>\n");
    for domain in TechDomain::ALL {
        let _ = writeln!(
            out,
            "<option value=\"{}\"{}>{}</option>",
            domain,
            selected(Some(domain) == current_domain),
            domain
        );
    }
    out.push_str("</select>\n");

    let _ = writeln!(
        out,
        "<p><label><input type=\"checkbox\" name=\"digest\" value=\"on\"{}> Show Personalized News</label></p>",
        if view.digest.is_some() { " checked" } else { "" }
    );
    out.push_str("<fieldset>\n<legend>Select your preferred categories</legend>\n");
    for category in Category::ALL {
        let _ = writeln!(
            out,
            "<label><input type=\"checkbox\" name=\"personalized\" value=\"{}\"{}> {}</label><br>",
            category,
            if view.preferences.contains(&category) { " checked" } else { "" },
            category
        );
    }
    out.push_str("</fieldset>\n<p><button type=\"submit\">Update</button></p>\n</form>\n</aside>\n");
}

fn render_notices(out: &mut String, notices: &[Notice]) {
    for notice in notices {
        let class = match notice.level {
            NoticeLevel::Error => "error",
            NoticeLevel::Warning => "warning",
        };
        let _ = writeln!(
            out,
            "<div class=\"notice {}\">{}</div>",
            class,
            escape(&notice.message)
        );
    }
}

fn render_language_form(out: &mut String, card: &ArticleCard, languages: &[LanguageCode]) {
    if languages.is_empty() {
        return;
    }
    let preferred = default_language(languages);
    out.push_str("<form method=\"post\" action=\"/audio\" target=\"_blank\">\n");
    let _ = writeln!(
        out,
        "<input type=\"hidden\" name=\"text\" value=\"{}\">",
        escape(&card.display_description)
    );
    out.push_str("<label>Select Language <select name=\"language\">\n");
    for language in languages {
        let _ = writeln!(
            out,
            "<option value=\"{0}\"{1}>{0}</option>",
            escape(language.as_str()),
            selected(Some(language) == preferred)
        );
    }
    out.push_str("</select></label>\n<button type=\"submit\">Convert to Audio</button>\n</form>\n");
}

pub fn render_card(out: &mut String, card: &ArticleCard, languages: &[LanguageCode]) {
    let article = &card.article;
    out.push_str("<article class=\"card\">\n<div class=\"media\">\n");
    if let Some(image) = &article.image_url {
        let _ = writeln!(out, "<img src=\"{}\" width=\"250\" alt=\"\">", escape(image));
    }
    let _ = writeln!(
        out,
        "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener\">Read Full Article</a></p>",
        escape(&article.url)
    );
    out.push_str("</div>\n<div class=\"body\">\n");
    let _ = writeln!(out, "<h3>{}</h3>", escape(&article.title));
    let _ = writeln!(out, "<p>{}</p>", escape(&card.display_description));
    let _ = writeln!(
        out,
        "<p><strong>Source</strong>: {}</p>",
        escape(&article.source_name)
    );
    let _ = writeln!(out, "<p><strong>Sentiment</strong>: {}</p>", card.sentiment);
    render_language_form(out, card, languages);
    out.push_str("</div>\n</article>\n<hr>\n");
}

pub fn dashboard(view: &DashboardView<'_>) -> String {
    let mut body = String::new();
    render_sidebar(&mut body, view);

    body.push_str("<main>\n");
    let _ = writeln!(body, "<h1>{}</h1>", PAGE_TITLE);
    render_notices(&mut body, view.notices);

    if let Some(sections) = view.digest {
        body.push_str("<section class=\"digest\">\n<h2>Personalized News Digest</h2>\n");
        for section in sections {
            let _ = writeln!(body, "<h3>{} News</h3>", escape(&section.topic.label()));
            for card in &section.cards {
                render_card(&mut body, card, view.languages);
            }
        }
        body.push_str("</section>\n");
    }

    let _ = writeln!(body, "<h2>📰 {} News</h2>", escape(&view.topic.label()));
    for card in view.cards {
        render_card(&mut body, card, view.languages);
    }
    let _ = writeln!(
        body,
        "<p class=\"caption\">Last updated: {}</p>",
        escape(view.updated_at)
    );
    body.push_str("</main>\n");
    page(&body)
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        "<main>\n<h1>{}</h1>\n<div class=\"notice error\">{}</div>\n<p><a href=\"/\">Back to the dashboard</a></p>\n</main>\n",
        PAGE_TITLE,
        escape(message)
    );
    page(&body)
}
