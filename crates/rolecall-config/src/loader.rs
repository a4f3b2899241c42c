//! Configuration loading with format detection and environment overrides.

use crate::schema::Config;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "ROLECALL_CONFIG_PATH";

/// Files probed in the working directory when no path is given.
const DEFAULT_FILES: [&str; 3] = ["rolecall.yaml", "rolecall.yml", "rolecall.toml"];

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error.
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error.
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing error.
    #[error("Failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension does not name a supported format.
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    /// A field holds a value that fails validation.
    #[error("Invalid configuration at {field}: {message}")]
    Invalid { field: String, message: String },

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),
}

impl ConfigError {
    /// Create a validation error for `field`.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Detects the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Parses configuration text in this format.
    pub fn parse(self, content: &str) -> Result<Config, ConfigError> {
        Ok(match self {
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
        })
    }
}

/// Configuration loader for the application.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads, overrides and validates configuration.
    ///
    /// `explicit` wins over `ROLECALL_CONFIG_PATH`, which wins over the
    /// default file names. Without any file the defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let mut config = match Self::locate(explicit) {
            Some(path) => Self::read_file(&path)?,
            None => {
                info!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_env_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file without overrides or validation.
    pub fn read_file(path: &Path) -> Result<Config, ConfigError> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), ?format, "Loading configuration");
        format.parse(&content)
    }

    fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }

        DEFAULT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists())
    }

    /// Applies environment variable overrides to configuration.
    pub fn apply_env_overrides(config: &mut Config) {
        if let Ok(token) = env::var("DISCORD_TOKEN") {
            debug!("Using Discord token from environment");
            config.discord.token = token;
        }

        if let Ok(prefix) = env::var("ROLECALL_PREFIX") {
            config.discord.prefix = prefix;
        }

        if let Ok(level) = env::var("ROLECALL_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(locale) = env::var("ROLECALL_LOCALE") {
            config.locale = locale;
        }
    }
}
