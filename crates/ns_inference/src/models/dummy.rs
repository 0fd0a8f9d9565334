use std::fmt;

use ns_core::{PolarityScorer, Thresholds};

/// Scores every text with the same compound value.
pub struct FixedScorer {
    score: f64,
    thresholds: Thresholds,
}

impl fmt::Debug for FixedScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedScorer").field("score", &self.score).finish()
    }
}

impl FixedScorer {
    pub fn new(score: f64) -> Self {
        Self {
            score: score.clamp(-1.0, 1.0),
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

impl PolarityScorer for FixedScorer {
    fn name(&self) -> &str {
        "fixed"
    }

    fn compound(&self, _text: &str) -> f64 {
        self.score
    }

    fn thresholds(&self) -> Thresholds {
        self.thresholds
    }
}
