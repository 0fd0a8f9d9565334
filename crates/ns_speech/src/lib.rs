pub mod catalog;
pub mod google;

use std::sync::Arc;

use ns_core::{Result, ServiceAccountKey};

pub use catalog::{default_language, LanguageCatalog};
pub use google::{GoogleTts, ServiceAccountTokenSource, SpeechConfig};

/// Builds the Google client authorized by a service account.
pub fn create_google_tts(key: ServiceAccountKey, config: SpeechConfig) -> Result<Arc<GoogleTts>> {
    let tokens = ServiceAccountTokenSource::new(key, config.timeout)?;
    Ok(Arc::new(GoogleTts::new(Arc::new(tokens), config)?))
}

pub mod prelude {
    pub use super::catalog::{default_language, LanguageCatalog};
    pub use super::google::{GoogleTts, SpeechConfig};
    pub use ns_core::{Audio, LanguageCode, Result, SpeechSynthesizer, SynthesisRequest, VoiceGender};
}
