//! [`ChatPlatform`] implementation over the serenity HTTP client.

use async_trait::async_trait;
use rolecall_commands::member_snapshot;
use rolecall_common::{
    ChannelId, ChatPlatform, Emoji, EmojiId, GuildEmoji, GuildId, MemberSnapshot, MessageId,
    PlatformError, PlatformResult, RoleId, UserId,
};
use serenity::builder::GetMessages;
use serenity::http::{Http, HttpError};
use serenity::model::channel::{Channel, ReactionType};
use serenity::model::id as discord;
use std::num::NonZeroU64;
use std::sync::Arc;
use tracing::debug;

/// Page size of a message history request.
const MESSAGE_PAGE: u8 = 100;

/// Audit log reason attached to role changes.
const AUDIT_REASON: &str = "Reaction role";

/// Chat platform backed by Discord's REST API.
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<Http>,
}

impl SerenityPlatform {
    /// Creates a platform issuing requests through `http`.
    pub const fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    fn http(&self) -> &Http {
        &self.http
    }
}

impl std::fmt::Debug for SerenityPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerenityPlatform").finish_non_exhaustive()
    }
}

/// Converts a serenity error, mapping 404 to [`PlatformError::NotFound`] and
/// 403 to [`PlatformError::Forbidden`].
pub fn map_error(what: &'static str, error: &serenity::Error) -> PlatformError {
    if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = error {
        match response.status_code.as_u16() {
            404 => return PlatformError::not_found(what),
            403 => return PlatformError::Forbidden(response.error.message.clone()),
            _ => {}
        }
    }
    PlatformError::request(format!("{what}: {error}"))
}

macro_rules! discord_id {
    ($name:ident, $from:ty => $to:ty, $what:literal) => {
        fn $name(id: $from) -> PlatformResult<$to> {
            NonZeroU64::new(id.get())
                .map(<$to>::from)
                .ok_or_else(|| PlatformError::not_found($what))
        }
    };
}

discord_id!(guild_id, GuildId => discord::GuildId, "guild");
discord_id!(channel_id, ChannelId => discord::ChannelId, "channel");
discord_id!(message_id, MessageId => discord::MessageId, "message");
discord_id!(user_id, UserId => discord::UserId, "user");
discord_id!(role_id, RoleId => discord::RoleId, "role");

#[async_trait]
impl ChatPlatform for SerenityPlatform {
    async fn fetch_message_ids(&self, channel: ChannelId) -> PlatformResult<Vec<MessageId>> {
        let channel = channel_id(channel)?;
        let mut ids = Vec::new();
        let mut before: Option<discord::MessageId> = None;

        loop {
            let mut request = GetMessages::new().limit(MESSAGE_PAGE);
            if let Some(before) = before {
                request = request.before(before);
            }

            let page = channel
                .messages(self.http(), request)
                .await
                .map_err(|e| map_error("channel", &e))?;
            ids.extend(page.iter().map(|message| MessageId(message.id.get())));

            match page.last() {
                Some(oldest) if page.len() == usize::from(MESSAGE_PAGE) => before = Some(oldest.id),
                _ => break,
            }
        }

        debug!(channel = %channel, count = ids.len(), "Fetched channel history");
        Ok(ids)
    }

    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> PlatformResult<()> {
        channel_id(channel)?
            .delete_message(self.http(), message_id(message)?)
            .await
            .map_err(|e| map_error("message", &e))
    }

    async fn send_message(&self, channel: ChannelId, content: &str) -> PlatformResult<MessageId> {
        let sent = channel_id(channel)?
            .say(self.http(), content)
            .await
            .map_err(|e| map_error("channel", &e))?;
        Ok(MessageId(sent.id.get()))
    }

    async fn channel_guild(&self, channel: ChannelId) -> PlatformResult<Option<GuildId>> {
        let channel = channel_id(channel)?
            .to_channel(self.http())
            .await
            .map_err(|e| map_error("channel", &e))?;

        Ok(match channel {
            Channel::Guild(channel) => Some(GuildId(channel.guild_id.get())),
            _ => None,
        })
    }

    async fn member(&self, guild: GuildId, user: UserId) -> PlatformResult<MemberSnapshot> {
        let member = guild_id(guild)?
            .member(self.http(), user_id(user)?)
            .await
            .map_err(|e| map_error("member", &e))?;
        Ok(member_snapshot(&member))
    }

    async fn guild_emojis(&self, guild: GuildId) -> PlatformResult<Vec<GuildEmoji>> {
        let emojis = guild_id(guild)?
            .emojis(self.http())
            .await
            .map_err(|e| map_error("guild", &e))?;

        Ok(emojis
            .into_iter()
            .map(|emoji| GuildEmoji {
                id: EmojiId(emoji.id.get()),
                name: emoji.name,
                animated: emoji.animated,
            })
            .collect())
    }

    async fn remove_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        user: UserId,
        emoji: &Emoji,
    ) -> PlatformResult<()> {
        let reaction = ReactionType::try_from(emoji.raw().trim())
            .map_err(|e| PlatformError::request(format!("unusable emoji {emoji}: {e}")))?;

        channel_id(channel)?
            .delete_reaction(
                self.http(),
                message_id(message)?,
                Some(user_id(user)?),
                reaction,
            )
            .await
            .map_err(|e| map_error("reaction", &e))
    }

    async fn add_role(&self, guild: GuildId, user: UserId, role: RoleId) -> PlatformResult<()> {
        self.http
            .add_member_role(guild_id(guild)?, user_id(user)?, role_id(role)?, Some(AUDIT_REASON))
            .await
            .map_err(|e| map_error("member", &e))
    }

    async fn remove_role(&self, guild: GuildId, user: UserId, role: RoleId) -> PlatformResult<()> {
        self.http
            .remove_member_role(guild_id(guild)?, user_id(user)?, role_id(role)?, Some(AUDIT_REASON))
            .await
            .map_err(|e| map_error("member", &e))
    }
}
