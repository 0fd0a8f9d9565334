use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ns_core::{Error, Result};
use toml::{Table, Value};

use crate::SecretProvider;

pub const DEFAULT_SECRETS_FILE: &str = ".streamlit/secrets.toml";

/// Secrets from a TOML file. Tables are handed out as JSON so a service
/// account can be written either as a JSON string or as a TOML table.
pub struct FileSecrets {
    path: PathBuf,
    table: Table,
}

impl fmt::Debug for FileSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSecrets")
            .field("path", &self.path)
            .field("keys", &self.table.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FileSecrets {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Secrets(format!("cannot read secrets file {}: {}", path.display(), e))
        })?;
        let table = Self::parse(&raw)
            .map_err(|e| Error::Secrets(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            path: path.to_path_buf(),
            table,
        })
    }

    fn parse(raw: &str) -> std::result::Result<Table, toml::de::Error> {
        raw.parse::<Table>()
    }

    fn render(value: &Value) -> Result<String> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Table(_) | Value::Array(_) => Ok(serde_json::to_string(value)?),
            other => Ok(other.to_string()),
        }
    }
}

#[async_trait]
impl SecretProvider for FileSecrets {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, name: &str) -> Result<Option<String>> {
        self.table.get(name).map(Self::render).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_string_and_table_values() {
        let file = write(
            r#"
API_KEY = "news-key"
PORT = 8501

[GCP_SERVICE_ACCOUNT]
type = "service_account"
client_email = "svc@test.iam.gserviceaccount.com"
"#,
        );
        let secrets = FileSecrets::from_path(file.path()).unwrap();

        assert_eq!(secrets.get("API_KEY").await.unwrap().as_deref(), Some("news-key"));
        assert_eq!(secrets.get("PORT").await.unwrap().as_deref(), Some("8501"));
        assert_eq!(secrets.get("MISSING").await.unwrap(), None);

        let json = secrets.get("GCP_SERVICE_ACCOUNT").await.unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["client_email"], "svc@test.iam.gserviceaccount.com");
    }

    #[test]
    fn test_missing_file() {
        let result = FileSecrets::from_path("/definitely/not/here/secrets.toml");
        assert!(matches!(result, Err(Error::Secrets(_))));
    }

    #[test]
    fn test_malformed_file() {
        let file = write("API_KEY = ");
        assert!(matches!(
            FileSecrets::from_path(file.path()),
            Err(Error::Secrets(_))
        ));
    }

    #[test]
    fn test_debug_hides_values() {
        let file = write(r#"API_KEY = "news-key""#);
        let secrets = FileSecrets::from_path(file.path()).unwrap();
        let debug = format!("{:?}", secrets);
        assert!(debug.contains("API_KEY"));
        assert!(!debug.contains("news-key"));
    }
}
