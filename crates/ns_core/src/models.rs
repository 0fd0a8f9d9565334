use std::fmt;

use async_trait::async_trait;

use crate::notice::NoticeSink;
use crate::types::{Article, Audio, SynthesisRequest, Topic, Voice};
use crate::Result;

/// Decision boundaries applied to a compound polarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: 0.05,
            negative: -0.05,
        }
    }
}

pub trait PolarityScorer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Compound score in [-1, 1]. Unknown tokens contribute nothing.
    fn compound(&self, text: &str) -> f64;

    /// Boundaries tuned for this scorer's scale.
    fn thresholds(&self) -> Thresholds {
        Thresholds::default()
    }
}

#[async_trait]
pub trait ArticleSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the top headlines for a topic. Failures never propagate: they
    /// are reported to `notices` and an empty list is returned.
    async fn fetch_top_headlines(&self, topic: &Topic, notices: &dyn NoticeSink) -> Vec<Article>;
}

#[async_trait]
pub trait VoiceCatalog: Send + Sync {
    /// All voices the speech service advertises.
    async fn list_voices(&self) -> Result<Vec<Voice>>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Audio>;
}
