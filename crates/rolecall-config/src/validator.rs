//! Runtime validation of a loaded configuration.

use crate::loader::ConfigError;
use crate::schema::{Config, GuildConfig, EMOJI_LIST_KEY, LIMIT_KEY};
use rolecall_common::{parse_channel_reference, Emoji};
use std::collections::HashSet;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first problem found.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.discord.token.trim().is_empty() {
            return Err(ConfigError::MissingConfig("discord.token".to_string()));
        }

        if config.discord.prefix.trim().is_empty() {
            return Err(ConfigError::invalid(
                "discord.prefix",
                "prefix cannot be empty",
            ));
        }

        if let Some(limit) = config.default_setting(LIMIT_KEY) {
            Self::validate_limit("defaults.limit", limit)?;
        }

        let mut seen_guilds = HashSet::new();
        for guild in &config.guilds {
            if !seen_guilds.insert(guild.id) {
                return Err(ConfigError::invalid(
                    format!("guilds[{}]", guild.id),
                    "guild is configured more than once",
                ));
            }
            Self::validate_guild(guild)?;
        }

        Ok(())
    }

    fn validate_guild(guild: &GuildConfig) -> Result<(), ConfigError> {
        if let Some(limit) = guild.settings.get(LIMIT_KEY) {
            Self::validate_limit(&format!("guilds[{}].settings.limit", guild.id), limit)?;
        }

        if let Some(target) = guild.settings.get(EMOJI_LIST_KEY) {
            if parse_channel_reference(target).is_none() {
                return Err(ConfigError::invalid(
                    format!("guilds[{}].settings.{EMOJI_LIST_KEY}", guild.id),
                    format!("'{target}' is not a channel id or mention"),
                ));
            }
        }

        let mut seen = HashSet::new();
        for (index, mapping) in guild.reaction_roles.iter().enumerate() {
            let field = format!("guilds[{}].reaction_roles[{index}]", guild.id);
            let emoji = Emoji::new(mapping.emoji.as_str());
            if emoji.is_empty() {
                return Err(ConfigError::invalid(field, "emoji cannot be empty"));
            }
            if !seen.insert((mapping.channel, mapping.message, emoji)) {
                return Err(ConfigError::invalid(
                    field,
                    "another reaction role uses the same message and emoji",
                ));
            }
        }

        Ok(())
    }

    fn validate_limit(field: &str, value: &str) -> Result<(), ConfigError> {
        value.trim().parse::<u32>().map(|_| ()).map_err(|_| {
            ConfigError::invalid(field, format!("'{value}' is not a non-negative integer"))
        })
    }
}
