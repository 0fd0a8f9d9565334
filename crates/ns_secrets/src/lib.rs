use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ns_core::Result;

pub mod backends;
pub mod credentials;

pub use backends::*;
pub use credentials::{Credentials, SecretNames};

#[async_trait]
pub trait SecretProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Returns `None` when the secret does not exist in this provider.
    async fn get(&self, name: &str) -> Result<Option<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SecretsKind {
    Env,
    File,
    SecretManager,
}

#[derive(Debug, Clone)]
pub struct SecretsConfig {
    pub kind: SecretsKind,
    pub file: PathBuf,
    pub project: Option<String>,
    pub secret_manager_url: String,
    pub metadata_url: String,
    pub timeout: Duration,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            kind: SecretsKind::Env,
            file: PathBuf::from(backends::file::DEFAULT_SECRETS_FILE),
            project: None,
            secret_manager_url: backends::secret_manager::DEFAULT_BASE_URL.to_string(),
            metadata_url: backends::secret_manager::DEFAULT_METADATA_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

pub fn create_provider(config: &SecretsConfig) -> Result<Arc<dyn SecretProvider>> {
    match config.kind {
        SecretsKind::Env => Ok(Arc::new(EnvSecrets::new())),
        SecretsKind::File => Ok(Arc::new(FileSecrets::from_path(&config.file)?)),
        SecretsKind::SecretManager => {
            let project = config.project.clone().ok_or_else(|| {
                ns_core::Error::Config("Secret Manager needs a GCP project id".to_string())
            })?;
            let tokens = MetadataServerToken::new(&config.metadata_url, config.timeout)?;
            Ok(Arc::new(SecretManagerSecrets::new(
                project,
                &config.secret_manager_url,
                Arc::new(tokens),
                config.timeout,
            )?))
        }
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::credentials::{Credentials, SecretNames};
    pub use super::{create_provider, SecretProvider, SecretsConfig, SecretsKind};
}
