pub mod auth;
pub mod error;
pub mod models;
pub mod notice;
pub mod types;

pub use auth::{AccessTokenSource, StaticToken};
pub use error::{Error, Result};
pub use models::{ArticleSource, PolarityScorer, SpeechSynthesizer, Thresholds, VoiceCatalog};
pub use notice::{NoticeBuffer, NoticeSink};
pub use types::{
    Article, Audio, Category, LanguageCode, Notice, NoticeLevel, SentimentLabel,
    ServiceAccountKey, SynthesisRequest, TechDomain, Topic, Voice, VoiceGender, NO_DESCRIPTION,
};
