//! The chat platform seam used by every flow.
//!
//! Handlers never talk to the Discord client directly; they go through
//! [`ChatPlatform`] so tests can substitute an in-memory platform.

use crate::emoji::Emoji;
use crate::error::PlatformResult;
use crate::types::{ChannelId, GuildEmoji, GuildId, MemberSnapshot, MessageId, RoleId, UserId};
use async_trait::async_trait;

/// Operations the bot issues against the chat platform.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Ids of every message currently in the channel, newest first.
    async fn fetch_message_ids(&self, channel: ChannelId) -> PlatformResult<Vec<MessageId>>;

    /// Deletes a single message.
    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> PlatformResult<()>;

    /// Sends one message; `content` must fit within the platform's size limit.
    async fn send_message(&self, channel: ChannelId, content: &str) -> PlatformResult<MessageId>;

    /// The guild a channel belongs to, `None` for channels outside any guild.
    async fn channel_guild(&self, channel: ChannelId) -> PlatformResult<Option<GuildId>>;

    /// Fetches a guild member.
    async fn member(&self, guild: GuildId, user: UserId) -> PlatformResult<MemberSnapshot>;

    /// Custom emojis uploaded to a guild.
    async fn guild_emojis(&self, guild: GuildId) -> PlatformResult<Vec<GuildEmoji>>;

    /// Removes one user's reaction from a message.
    async fn remove_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        user: UserId,
        emoji: &Emoji,
    ) -> PlatformResult<()>;

    /// Grants a role to a guild member.
    async fn add_role(&self, guild: GuildId, user: UserId, role: RoleId) -> PlatformResult<()>;

    /// Revokes a role from a guild member.
    async fn remove_role(&self, guild: GuildId, user: UserId, role: RoleId) -> PlatformResult<()>;
}
