/// Error type for [`crate::config`] module. Captures errors related to loading
/// configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Missing or non-unicode environment variable.
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Environment variable present but unparseable.
    #[error("failed to parse environment variable {key}: {reason}")]
    Parse {
        /// The variable.
        key: String,
        /// Why parsing failed.
        reason: String,
    },
    /// Unknown attestation mode.
    #[error("unknown attestation mode {0:?}, expected \"simulate\" or \"always-ask\"")]
    Mode(String),
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }

    /// Unparseable env var.
    pub fn parse(key: &str, reason: impl core::fmt::Display) -> Self {
        ConfigError::Parse { key: key.to_string(), reason: reason.to_string() }
    }
}
