//! Default values for every configuration section.

use crate::schema::{Config, DiscordConfig, LoggingConfig, LIMIT_KEY};
use std::collections::HashMap;

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Text command prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "!";

impl Default for Config {
    fn default() -> Self {
        let mut defaults = HashMap::new();
        defaults.insert(LIMIT_KEY.to_string(), "0".to_string());

        Self {
            discord: DiscordConfig::default(),
            logging: LoggingConfig::default(),
            locale: DEFAULT_LOCALE.to_string(),
            defaults,
            guilds: Vec::new(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}
