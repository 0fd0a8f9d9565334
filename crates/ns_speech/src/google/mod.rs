//! Google Cloud Text-to-Speech REST client.
//!
//! - `GET  {base}/v1/voices` lists the voice catalog
//! - `POST {base}/v1/text:synthesize` returns base64 MP3 in `audioContent`

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ns_core::{
    AccessTokenSource, Audio, Error, LanguageCode, Result, SpeechSynthesizer, SynthesisRequest,
    Voice, VoiceCatalog, VoiceGender,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

pub mod auth;

pub use auth::ServiceAccountTokenSource;

pub const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com";
const SERVICE: &str = "Text-to-Speech";

#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelectionParams<'a> {
    language_code: &'a str,
    ssml_gender: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeBody<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelectionParams<'a>,
    audio_config: AudioConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[derive(Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<RawVoice>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVoice {
    #[serde(default)]
    name: String,
    #[serde(default)]
    language_codes: Vec<String>,
    #[serde(default)]
    ssml_gender: Option<String>,
}

impl From<RawVoice> for Voice {
    fn from(raw: RawVoice) -> Self {
        Voice {
            name: raw.name,
            language_codes: raw.language_codes.into_iter().map(LanguageCode::new).collect(),
            gender: raw.ssml_gender.and_then(|g| g.parse::<VoiceGender>().ok()),
        }
    }
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Deserialize)]
struct GoogleError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

pub struct GoogleTts {
    client: Client,
    tokens: Arc<dyn AccessTokenSource>,
    config: SpeechConfig,
}

impl fmt::Debug for GoogleTts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleTts")
            .field("client", &"<reqwest::Client>")
            .field("tokens", &self.tokens)
            .field("config", &self.config)
            .finish()
    }
}

impl GoogleTts {
    pub fn new(tokens: Arc<dyn AccessTokenSource>, config: SpeechConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("Invalid speech base URL {}: {}", config.base_url, e)))?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            tokens,
            config,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn error_from(response: reqwest::Response) -> Error {
        let status = response.status();
        let detail = match response.json::<GoogleErrorBody>().await {
            Ok(body) => match body.error.status {
                Some(code) => format!("HTTP {} {}: {}", status.as_u16(), code, body.error.message),
                None => format!("HTTP {}: {}", status.as_u16(), body.error.message),
            },
            Err(_) => format!("HTTP {}", status.as_u16()),
        };
        if status.is_server_error() {
            Error::unavailable(SERVICE, detail)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Error::InvalidCredentials(detail)
        } else {
            Error::Synthesis(detail)
        }
    }
}

fn transport(e: reqwest::Error) -> Error {
    Error::unavailable(SERVICE, e.without_url().to_string())
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Audio> {
        if request.text.trim().is_empty() {
            return Err(Error::Synthesis("nothing to synthesize".to_string()));
        }
        let body = SynthesizeBody {
            input: SynthesisInput {
                text: &request.text,
            },
            voice: VoiceSelectionParams {
                language_code: request.language.as_str(),
                ssml_gender: request.gender.as_str(),
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        };

        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .post(self.url("text:synthesize"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let payload: SynthesizeResponse = response.json().await.map_err(transport)?;
        let bytes = STANDARD
            .decode(payload.audio_content.as_bytes())
            .map_err(|e| Error::Synthesis(format!("undecodable audio content: {}", e)))?;
        tracing::debug!(language = %request.language, bytes = bytes.len(), "synthesized speech");
        Ok(Audio { bytes })
    }
}

#[async_trait]
impl VoiceCatalog for GoogleTts {
    async fn list_voices(&self) -> Result<Vec<Voice>> {
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .get(self.url("voices"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            let err = Self::error_from(response).await;
            return Err(match err {
                Error::Synthesis(detail) => Error::unavailable(SERVICE, detail),
                other => other,
            });
        }
        let payload: VoicesResponse = response.json().await.map_err(transport)?;
        Ok(payload.voices.into_iter().map(Voice::from).collect())
    }
}
