use std::fmt;

use async_trait::async_trait;

use crate::Result;

/// Supplies OAuth2 bearer tokens for Google APIs.
#[async_trait]
pub trait AccessTokenSource: Send + Sync + fmt::Debug {
    async fn access_token(&self) -> Result<String>;
}

pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StaticToken").field(&"<redacted>").finish()
    }
}

#[async_trait]
impl AccessTokenSource for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
