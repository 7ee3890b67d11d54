use std::path::PathBuf;

use thiserror::Error;

/// Configuration-level failures. These are the only errors that end a run
/// with a non-zero exit code.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("duplicate theme name: {0}")]
    DuplicateTheme(String),

    #[error("no themes configured")]
    NoThemes,

    #[error("missing API key for {0}")]
    MissingApiKey(&'static str),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "config_io",
            Self::Parse { .. } => "config_parse",
            Self::InvalidValue { .. } => "invalid_value",
            Self::DuplicateTheme(_) => "duplicate_theme",
            Self::NoThemes => "no_themes",
            Self::MissingApiKey(_) => "missing_api_key",
        }
    }
}
