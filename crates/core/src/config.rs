//! Run configuration.
//!
//! Loaded from a TOML file (every section optional), then overridden by
//! environment variables:
//!
//! ```toml
//! [ollama]
//! url = "http://localhost:11434"
//! model = "llama3:8b"
//!
//! [collections]
//! target = "ersatztv"
//!
//! [[themes]]
//! name = "Sci-Fi Night"
//! description = "Classic and modern science fiction"
//! duration = 240
//! keywords = ["space", "future"]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::types::{CollectionTarget, ThemeSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
    pub temperature: f64,
    pub num_ctx: u32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434".into(),
            model: "llama3:8b".into(),
            temperature: 0.7,
            num_ctx: 8192,
        }
    }
}

/// Base URL plus API key for the movie catalog provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarrConfig {
    pub url: String,
    pub api_key: String,
}

impl Default for RadarrConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:7878".into(),
            api_key: String::new(),
        }
    }
}

/// Base URL plus API key for the series catalog provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SonarrConfig {
    pub url: String,
    pub api_key: String,
}

impl Default for SonarrConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8989".into(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErsatztvConfig {
    pub url: String,
}

impl Default for ErsatztvConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8409".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunarrConfig {
    pub url: String,
}

impl Default for TunarrConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionsConfig {
    pub target: CollectionTarget,
}

/// Prompt budget for the catalog summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub max_chars: usize,
    pub max_genres: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_chars: 24_000,
            max_genres: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    pub ollama: OllamaConfig,
    pub radarr: RadarrConfig,
    pub sonarr: SonarrConfig,
    pub collections: CollectionsConfig,
    pub ersatztv: ErsatztvConfig,
    pub tunarr: TunarrConfig,
    pub summary: SummaryConfig,
    pub themes: Vec<ThemeSpec>,
}

impl DirectorConfig {
    /// Parse a TOML document.
    pub fn from_toml(source: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Read the config file if present, then apply process environment
    /// overrides and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the file at `path`; a missing file yields the defaults.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(source) => Self::from_toml(&source, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Apply overrides from `lookup`. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get("OLLAMA_URL") {
            self.ollama.url = v;
        }
        if let Some(v) = get("OLLAMA_MODEL") {
            self.ollama.model = v;
        }
        if let Some(v) = get("RADARR_URL") {
            self.radarr.url = v;
        }
        if let Some(v) = get("RADARR_API_KEY") {
            self.radarr.api_key = v;
        }
        if let Some(v) = get("SONARR_URL") {
            self.sonarr.url = v;
        }
        if let Some(v) = get("SONARR_API_KEY") {
            self.sonarr.api_key = v;
        }
        if let Some(v) = get("ERSATZTV_URL") {
            self.ersatztv.url = v;
        }
        if let Some(v) = get("TUNARR_URL") {
            self.tunarr.url = v;
        }
        if let Some(v) = get("COLLECTION_TARGET") {
            self.collections.target = v.parse().map_err(|message| ConfigError::InvalidValue {
                key: "COLLECTION_TARGET".into(),
                message,
            })?;
        }
        Ok(())
    }

    /// Structural checks that hold for every command.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for theme in &self.themes {
            if !seen.insert(theme.name.as_str()) {
                return Err(ConfigError::DuplicateTheme(theme.name.clone()));
            }
        }
        if !(0.0..=2.0).contains(&self.ollama.temperature) {
            return Err(ConfigError::InvalidValue {
                key: "ollama.temperature".into(),
                message: "must be between 0.0 and 2.0".into(),
            });
        }
        Ok(())
    }

    pub fn require_themes(&self) -> Result<(), ConfigError> {
        if self.themes.is_empty() {
            return Err(ConfigError::NoThemes);
        }
        Ok(())
    }

    pub fn require_provider_keys(&self) -> Result<(), ConfigError> {
        if self.radarr.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey("radarr"));
        }
        if self.sonarr.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey("sonarr"));
        }
        Ok(())
    }

    pub fn theme(&self, name: &str) -> Option<&ThemeSpec> {
        self.themes.iter().find(|t| t.name == name)
    }
}
