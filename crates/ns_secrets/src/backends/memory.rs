use std::collections::HashMap;

use async_trait::async_trait;
use ns_core::Result;

use crate::SecretProvider;

#[derive(Debug, Clone, Default)]
pub struct MemorySecrets {
    secrets: HashMap<String, String>,
}

impl MemorySecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(name.into(), value.into());
        self
    }
}

#[async_trait]
impl SecretProvider for MemorySecrets {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, name: &str) -> Result<Option<String>> {
        Ok(self.secrets.get(name).cloned())
    }
}
