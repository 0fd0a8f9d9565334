use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ns_core::{AccessTokenSource, Error, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::SecretProvider;

pub const DEFAULT_BASE_URL: &str = "https://secretmanager.googleapis.com";
pub const DEFAULT_METADATA_URL: &str = "http://metadata.google.internal";
const SERVICE: &str = "Secret Manager";

#[derive(Deserialize)]
struct AccessResponse {
    payload: Payload,
}

#[derive(Deserialize)]
struct Payload {
    data: String,
}

#[derive(Deserialize)]
struct MetadataToken {
    access_token: String,
}

fn parse_base(url: &str) -> Result<String> {
    Url::parse(url).map_err(|e| Error::Config(format!("Invalid URL {}: {}", url, e)))?;
    Ok(url.trim_end_matches('/').to_string())
}

/// Token of the default service account of the GCE/Cloud Run instance.
#[derive(Debug)]
pub struct MetadataServerToken {
    client: Client,
    base_url: String,
}

impl MetadataServerToken {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: parse_base(base_url)?,
        })
    }
}

#[async_trait]
impl AccessTokenSource for MetadataServerToken {
    async fn access_token(&self) -> Result<String> {
        let url = format!(
            "{}/computeMetadata/v1/instance/service-accounts/default/token",
            self.base_url
        );
        let response = self
            .client
            .get(url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| Error::unavailable("metadata server", e.without_url().to_string()))?;
        if !response.status().is_success() {
            return Err(Error::unavailable(
                "metadata server",
                format!("HTTP {}", response.status().as_u16()),
            ));
        }
        let token: MetadataToken = response
            .json()
            .await
            .map_err(|e| Error::unavailable("metadata server", e.without_url().to_string()))?;
        Ok(token.access_token)
    }
}

/// Latest version of secrets stored in Google Secret Manager.
pub struct SecretManagerSecrets {
    client: Client,
    project: String,
    base_url: String,
    tokens: Arc<dyn AccessTokenSource>,
}

impl fmt::Debug for SecretManagerSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManagerSecrets")
            .field("project", &self.project)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SecretManagerSecrets {
    pub fn new(
        project: impl Into<String>,
        base_url: &str,
        tokens: Arc<dyn AccessTokenSource>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            project: project.into(),
            base_url: parse_base(base_url)?,
            tokens,
        })
    }
}

#[async_trait]
impl SecretProvider for SecretManagerSecrets {
    fn name(&self) -> &str {
        "secret-manager"
    }

    async fn get(&self, name: &str) -> Result<Option<String>> {
        let url = format!(
            "{}/v1/projects/{}/secrets/{}/versions/latest:access",
            self.base_url, self.project, name
        );
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::unavailable(SERVICE, e.without_url().to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(Error::InvalidCredentials(format!(
                    "access to secret {} denied",
                    name
                )))
            }
            status if status.is_server_error() => {
                return Err(Error::unavailable(SERVICE, format!("HTTP {}", status.as_u16())))
            }
            status if !status.is_success() => {
                return Err(Error::Secrets(format!(
                    "reading secret {} failed with HTTP {}",
                    name,
                    status.as_u16()
                )))
            }
            _ => {}
        }

        let body: AccessResponse = response
            .json()
            .await
            .map_err(|e| Error::Secrets(format!("malformed secret payload: {}", e.without_url())))?;
        let bytes = STANDARD
            .decode(body.payload.data.as_bytes())
            .map_err(|e| Error::Secrets(format!("secret {} is not base64: {}", name, e)))?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| Error::Secrets(format!("secret {} is not valid UTF-8", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_core::StaticToken;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn secrets(server: &MockServer) -> SecretManagerSecrets {
        SecretManagerSecrets::new(
            "test-project",
            &server.uri(),
            Arc::new(StaticToken::new("sm-token")),
            Duration::from_millis(500),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_reads_latest_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/projects/test-project/secrets/API_KEY/versions/latest:access"))
            .and(header("Authorization", "Bearer sm-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/1/secrets/API_KEY/versions/3",
                "payload": {"data": STANDARD.encode("news-key")}
            })))
            .mount(&server)
            .await;

        assert_eq!(
            secrets(&server).get("API_KEY").await.unwrap().as_deref(),
            Some("news-key")
        );
    }

    #[tokio::test]
    async fn test_missing_secret_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert_eq!(secrets(&server).get("GCP_SERVICE_ACCOUNT").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_denied_and_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/projects/test-project/secrets/DENIED/versions/latest:access"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/projects/test-project/secrets/DOWN/versions/latest:access"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = secrets(&server);
        assert!(matches!(
            provider.get("DENIED").await,
            Err(Error::InvalidCredentials(_))
        ));
        assert!(provider.get("DOWN").await.unwrap_err().is_unavailable());
    }

    #[tokio::test]
    async fn test_metadata_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/computeMetadata/v1/instance/service-accounts/default/token"))
            .and(header("Metadata-Flavor", "Google"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.metadata",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .mount(&server)
            .await;

        let tokens = MetadataServerToken::new(&server.uri(), Duration::from_millis(500)).unwrap();
        assert_eq!(tokens.access_token().await.unwrap(), "ya29.metadata");
    }
}
