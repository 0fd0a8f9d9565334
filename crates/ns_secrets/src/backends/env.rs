use std::env::VarError;

use async_trait::async_trait;
use ns_core::{Error, Result};

use crate::SecretProvider;

/// Reads secrets from the process environment, optionally under a prefix.
#[derive(Debug, Clone, Default)]
pub struct EnvSecrets {
    prefix: String,
}

impl EnvSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl SecretProvider for EnvSecrets {
    fn name(&self) -> &str {
        "env"
    }

    async fn get(&self, name: &str) -> Result<Option<String>> {
        let key = format!("{}{}", self.prefix, name);
        match std::env::var(&key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => {
                Err(Error::Secrets(format!("{} is not valid unicode", key)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_env_lookup() {
        std::env::set_var("NS_SECRETS_TEST_API_KEY", "from-env");
        let provider = EnvSecrets::with_prefix("NS_SECRETS_TEST_");
        assert_eq!(provider.get("API_KEY").await.unwrap().as_deref(), Some("from-env"));
        assert_eq!(provider.get("ABSENT").await.unwrap(), None);
    }
}
