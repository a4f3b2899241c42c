//! Emoji list channel resolution and roster rendering.

use crate::settings::GuildSettings;
use async_trait::async_trait;
use rolecall_common::{parse_channel_reference, ChannelId, ChatPlatform, GuildId, PlatformResult};
use rolecall_config::EMOJI_LIST_KEY;
use std::sync::Arc;
use tracing::{debug, warn};

/// Where a guild's emoji list goes and what it says.
#[async_trait]
pub trait EmojiDirectory: Send + Sync {
    /// The configured emoji list channel, if it names a channel of `guild`.
    async fn emoji_list_channel(&self, guild: GuildId) -> Option<ChannelId>;

    /// The guild's custom emoji roster, one line per emoji.
    ///
    /// Returns an empty string when the guild has no custom emojis.
    async fn render_list(&self, guild: GuildId) -> PlatformResult<String>;
}

/// Emoji directory reading the setting and the guild's emoji through the platform.
#[derive(Clone)]
pub struct GuildEmojiDirectory {
    settings: Arc<dyn GuildSettings>,
    platform: Arc<dyn ChatPlatform>,
}

impl GuildEmojiDirectory {
    /// Creates a directory over `settings` and `platform`.
    pub fn new(settings: Arc<dyn GuildSettings>, platform: Arc<dyn ChatPlatform>) -> Self {
        Self { settings, platform }
    }
}

impl std::fmt::Debug for GuildEmojiDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuildEmojiDirectory").finish_non_exhaustive()
    }
}

#[async_trait]
impl EmojiDirectory for GuildEmojiDirectory {
    async fn emoji_list_channel(&self, guild: GuildId) -> Option<ChannelId> {
        let raw = self.settings.get(EMOJI_LIST_KEY, guild)?;
        let Some(channel) = parse_channel_reference(&raw) else {
            warn!(guild = %guild, value = %raw, "Emoji list setting is not a channel");
            return None;
        };

        match self.platform.channel_guild(channel).await {
            Ok(Some(owner)) if owner == guild => Some(channel),
            Ok(owner) => {
                warn!(guild = %guild, channel = %channel, ?owner, "Emoji list channel belongs to another guild");
                None
            }
            Err(e) => {
                warn!(guild = %guild, channel = %channel, error = %e, "Failed to resolve emoji list channel");
                None
            }
        }
    }

    async fn render_list(&self, guild: GuildId) -> PlatformResult<String> {
        let mut emojis = self.platform.guild_emojis(guild).await?;
        emojis.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        debug!(guild = %guild, count = emojis.len(), "Rendering emoji roster");

        Ok(emojis
            .iter()
            .map(|emoji| format!("{emoji} `:{}:`\n", emoji.name))
            .collect())
    }
}
