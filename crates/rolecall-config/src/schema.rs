//! Configuration schema definitions using serde.

use rolecall_common::{ChannelId, GuildId, MessageId, RoleId};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Guild setting naming the channel the emoji list is posted to.
pub const EMOJI_LIST_KEY: &str = "emoji-list";

/// Guild setting holding the maximum number of managed roles per member.
pub const LIMIT_KEY: &str = "limit";

/// Main configuration structure for Rolecall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Locale used for replies.
    pub locale: String,
    /// Setting values used when a guild does not override them.
    #[serde(deserialize_with = "scalar_map")]
    pub defaults: HashMap<String, String>,
    /// Per-guild settings and reaction roles.
    pub guilds: Vec<GuildConfig>,
}

/// Discord bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Prefix for text commands.
    pub prefix: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `rolecall_commands=debug,info`.
    pub level: String,
    /// Emit compact machine-oriented output instead of the pretty format.
    pub json: bool,
    /// Directory for a daily rolling log file.
    pub file: Option<PathBuf>,
}

/// Settings and reaction roles of one guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildConfig {
    /// Guild id.
    pub id: GuildId,
    /// Setting overrides, keyed like [`Config::defaults`].
    #[serde(default, deserialize_with = "scalar_map")]
    pub settings: HashMap<String, String>,
    /// Reaction role mappings.
    #[serde(default)]
    pub reaction_roles: Vec<ReactionRoleConfig>,
}

/// A single reaction role mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRoleConfig {
    /// Channel of the message.
    pub channel: ChannelId,
    /// Message users react on.
    pub message: MessageId,
    /// Emoji in raw form: unicode, `<:name:id>` or `<a:name:id>`.
    pub emoji: String,
    /// Role granted for the reaction.
    pub role: RoleId,
    /// Remove the reaction right after granting the role.
    #[serde(default)]
    pub single_use: bool,
}

impl Config {
    /// Finds the configuration of a guild.
    pub fn guild(&self, id: GuildId) -> Option<&GuildConfig> {
        self.guilds.iter().find(|guild| guild.id == id)
    }

    /// The default value of a setting.
    pub fn default_setting(&self, key: &str) -> Option<&str> {
        self.defaults.get(key).map(String::as_str)
    }

    /// The value a guild explicitly sets for `key`, ignoring defaults.
    pub fn guild_setting(&self, guild: GuildId, key: &str) -> Option<&str> {
        self.guild(guild)
            .and_then(|guild| guild.settings.get(key))
            .map(String::as_str)
    }

    /// The effective value of a setting for a guild.
    pub fn setting(&self, guild: GuildId, key: &str) -> Option<&str> {
        self.guild_setting(guild, key)
            .or_else(|| self.default_setting(key))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), crate::ConfigError> {
        crate::validator::ConfigValidator::validate(self)
    }
}

/// Accepts setting values written as strings, integers or booleans.
fn scalar_map<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Flag(bool),
    }

    let raw = HashMap::<String, Scalar>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Scalar::Text(text) => text,
                Scalar::Integer(number) => number.to_string(),
                Scalar::Flag(flag) => flag.to_string(),
            };
            (key, value)
        })
        .collect())
}
