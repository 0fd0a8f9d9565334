pub mod models;
pub mod sentiment;

pub use models::create_scorer;
pub use sentiment::SentimentClassifier;

pub mod prelude {
    pub use super::models::{create_scorer, FixedScorer, LexiconScorer};
    pub use super::SentimentClassifier;
    pub use ns_core::{PolarityScorer, Result, SentimentLabel, Thresholds};
}
