use std::collections::BTreeSet;
use std::sync::Arc;

use ns_core::{Error, LanguageCode, Result, VoiceCatalog};

pub const PREFERRED_LANGUAGE: &str = "en-US";

/// Languages the speech service can voice, derived from its voice listing.
#[derive(Clone)]
pub struct LanguageCatalog {
    voices: Arc<dyn VoiceCatalog>,
}

impl std::fmt::Debug for LanguageCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageCatalog").finish_non_exhaustive()
    }
}

impl LanguageCatalog {
    pub fn new(voices: Arc<dyn VoiceCatalog>) -> Self {
        Self { voices }
    }

    /// Every language code advertised by any voice, deduplicated and sorted.
    pub async fn supported_languages(&self) -> Result<Vec<LanguageCode>> {
        let voices = self.voices.list_voices().await.map_err(|e| match e {
            unavailable @ Error::ServiceUnavailable { .. } => unavailable,
            other => Error::unavailable("Voice catalog", other.to_string()),
        })?;
        let languages: BTreeSet<LanguageCode> = voices
            .into_iter()
            .flat_map(|voice| voice.language_codes)
            .collect();
        Ok(languages.into_iter().collect())
    }
}

/// `en-US` when offered, otherwise the first language.
pub fn default_language(languages: &[LanguageCode]) -> Option<&LanguageCode> {
    languages
        .iter()
        .find(|l| l.as_str() == PREFERRED_LANGUAGE)
        .or_else(|| languages.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ns_core::{Voice, VoiceGender};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubVoices {
        voices: Vec<Voice>,
        calls: AtomicUsize,
    }

    fn voice(name: &str, codes: &[&str]) -> Voice {
        Voice {
            name: name.to_string(),
            language_codes: codes.iter().map(|c| LanguageCode::from(*c)).collect(),
            gender: Some(VoiceGender::Neutral),
        }
    }

    #[async_trait]
    impl VoiceCatalog for StubVoices {
        async fn list_voices(&self) -> Result<Vec<Voice>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.voices.clone())
        }
    }

    struct DownVoices;

    #[async_trait]
    impl VoiceCatalog for DownVoices {
        async fn list_voices(&self) -> Result<Vec<Voice>> {
            Err(Error::Fetch("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn test_sorted_and_deduplicated() {
        let stub = Arc::new(StubVoices {
            voices: vec![
                voice("fr-FR-A", &["fr-FR"]),
                voice("en-US-A", &["en-US"]),
                voice("en-US-B", &["en-US"]),
                voice("cmn-A", &["cmn-CN", "zh-CN"]),
                voice("de-DE-A", &["de-DE"]),
            ],
            calls: AtomicUsize::new(0),
        });
        let catalog = LanguageCatalog::new(stub.clone());

        let first = catalog.supported_languages().await.unwrap();
        let codes: Vec<&str> = first.iter().map(LanguageCode::as_str).collect();
        assert_eq!(codes, vec!["cmn-CN", "de-DE", "en-US", "fr-FR", "zh-CN"]);

        let second = catalog.supported_languages().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_an_error() {
        let catalog = LanguageCatalog::new(Arc::new(DownVoices));
        let err = catalog.supported_languages().await.unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_default_language() {
        let languages: Vec<LanguageCode> = vec!["de-DE".into(), "en-US".into(), "fr-FR".into()];
        assert_eq!(default_language(&languages).unwrap().as_str(), "en-US");

        let languages: Vec<LanguageCode> = vec!["de-DE".into(), "fr-FR".into()];
        assert_eq!(default_language(&languages).unwrap().as_str(), "de-DE");

        assert!(default_language(&[]).is_none());
    }
}
