use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("Missing secret: {0}")]
    MissingSecret(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Secrets error: {0}")]
    Secrets(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("{service} unavailable: {reason}")]
    ServiceUnavailable {
        service: &'static str,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    pub fn unavailable(service: &'static str, reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            service,
            reason: reason.into(),
        }
    }

    /// Whether the failure came from a remote service being unreachable
    /// rather than from the request itself.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable { .. })
    }

    /// Whether the error was caused by caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidCategory(_) | Self::InvalidTopic(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display() {
        let err = Error::unavailable("Text-to-Speech", "connection refused");
        assert!(err.is_unavailable());
        assert_eq!(err.to_string(), "Text-to-Speech unavailable: connection refused");
    }

    #[test]
    fn test_invalid_input() {
        assert!(Error::InvalidCategory("weather".to_string()).is_invalid_input());
        assert!(!Error::MissingSecret("API_KEY".to_string()).is_invalid_input());
    }
}
