//! Per-guild key/value settings.

use rolecall_common::GuildId;
use rolecall_config::{ConfigCache, LIMIT_KEY};
use std::sync::Arc;
use tracing::warn;

/// Read access to per-guild settings.
pub trait GuildSettings: Send + Sync {
    /// True when the guild set `key` to something other than the default.
    fn is_modified(&self, key: &str, guild: GuildId) -> bool;

    /// The effective value of `key` for the guild.
    fn get(&self, key: &str, guild: GuildId) -> Option<String>;

    /// Maximum number of managed roles a member may hold, 0 for unlimited.
    ///
    /// Returns `None` when the configured value is not a number; such a
    /// limit admits no further roles.
    fn role_limit(&self, guild: GuildId) -> Option<u32> {
        let Some(raw) = self.get(LIMIT_KEY, guild) else {
            return Some(0);
        };

        raw.trim().parse().map_or_else(
            |_| {
                warn!(guild = %guild, value = %raw, "Unparseable role limit, rejecting role requests");
                None
            },
            Some,
        )
    }
}

/// Settings read from the live configuration snapshot.
#[derive(Debug, Clone)]
pub struct ConfigGuildSettings {
    cache: Arc<ConfigCache>,
}

impl ConfigGuildSettings {
    /// Creates settings backed by `cache`.
    pub const fn new(cache: Arc<ConfigCache>) -> Self {
        Self { cache }
    }
}

impl GuildSettings for ConfigGuildSettings {
    fn is_modified(&self, key: &str, guild: GuildId) -> bool {
        let config = self.cache.get();
        match config.guild_setting(guild, key) {
            Some(value) => config
                .default_setting(key)
                .map_or(true, |default| default.trim() != value.trim()),
            None => false,
        }
    }

    fn get(&self, key: &str, guild: GuildId) -> Option<String> {
        self.cache.get().setting(guild, key).map(str::to_string)
    }
}
