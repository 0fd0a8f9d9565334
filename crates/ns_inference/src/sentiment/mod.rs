use std::sync::Arc;

use ns_core::{Article, PolarityScorer, SentimentLabel};

use crate::models::LexiconScorer;

/// Maps text to a three-way sentiment label using an injected scorer and the
/// scorer's own thresholds.
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    scorer: Arc<dyn PolarityScorer>,
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new(Arc::new(LexiconScorer::new()))
    }
}

impl SentimentClassifier {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    pub fn classify(&self, text: &str) -> SentimentLabel {
        let score = self.scorer.compound(text);
        let thresholds = self.scorer.thresholds();
        let label = if score > thresholds.positive {
            SentimentLabel::Positive
        } else if score < thresholds.negative {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        tracing::trace!(score, %label, "classified text");
        label
    }

    /// Classifies what a reader sees, including the placeholder used for
    /// articles without a description.
    pub fn classify_article(&self, article: &Article) -> SentimentLabel {
        self.classify(article.display_description())
    }
}
