use std::sync::Arc;

use ns_core::{ArticleSource, SpeechSynthesizer};
use ns_inference::SentimentClassifier;
use ns_speech::LanguageCatalog;

/// Everything a request handler needs, built once at startup.
pub struct AppState {
    pub articles: Arc<dyn ArticleSource>,
    pub classifier: SentimentClassifier,
    pub languages: LanguageCatalog,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
}
