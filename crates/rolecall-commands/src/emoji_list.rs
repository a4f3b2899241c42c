//! Emoji list command implementation using Poise's command macro.

use crate::framework::{Context, Error, Services};
use rolecall_common::{
    split_message, BestEffort, ChannelId, Dispatched, GuildId, MessageId, MESSAGE_LIMIT,
};
use rolecall_config::EMOJI_LIST_KEY;
use rolecall_i18n::MessageKey;
use std::sync::Arc;
use tracing::{debug, error, info, info_span};

/// How an emoji list regeneration ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiListOutcome {
    /// The guild never set an emoji list channel.
    NotConfigured,
    /// The configured channel does not resolve to a channel of the guild.
    InvalidTarget,
    /// The channel could not be read or a chunk could not be sent.
    PostFailed,
    /// The roster was posted.
    Posted {
        /// Ids of the posted chunks, in order.
        messages: Vec<MessageId>,
    },
}

impl EmojiListOutcome {
    /// The reply shown to the invoker.
    pub const fn message_key(&self) -> MessageKey {
        match self {
            Self::NotConfigured => MessageKey::EmojiListNotConfigured,
            Self::InvalidTarget => MessageKey::EmojiListInvalid,
            Self::PostFailed => MessageKey::EmojiListPostFailed,
            Self::Posted { .. } => MessageKey::EmojiListPosted,
        }
    }
}

/// Regenerates the emoji list in the configured channel.
#[poise::command(
    prefix_command,
    slash_command,
    rename = "emojilist",
    aliases("emoji-list"),
    guild_only,
    required_permissions = "MANAGE_GUILD",
    required_bot_permissions = "MANAGE_MESSAGES",
    user_cooldown = 10,
    category = "Emoji"
)]
pub async fn emoji_list(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild) = ctx.guild_id() else {
        return Ok(());
    };

    let services = &ctx.data().services;
    let outcome = publish_emoji_list(services, GuildId(guild.get()))
        .await
        .detach();
    let reply = services.messages.get(outcome.message_key());

    if matches!(outcome, EmojiListOutcome::Posted { .. }) {
        ctx.say(reply).await?;
    } else {
        ctx.reply(reply).await?;
    }
    Ok(())
}

/// Clears the guild's emoji list channel and posts the current roster.
///
/// Deleting the previous messages is best-effort and runs in the background;
/// the fetched ids never include the chunks posted here.
pub async fn publish_emoji_list(services: &Services, guild: GuildId) -> Dispatched<EmojiListOutcome> {
    if !services.settings.is_modified(EMOJI_LIST_KEY, guild) {
        debug!(guild = %guild, "Emoji list not configured");
        return Dispatched::done(EmojiListOutcome::NotConfigured);
    }

    let Some(channel) = services.emojis.emoji_list_channel(guild).await else {
        return Dispatched::done(EmojiListOutcome::InvalidTarget);
    };

    let previous = match services.platform.fetch_message_ids(channel).await {
        Ok(previous) => previous,
        Err(e) => {
            error!(guild = %guild, channel = %channel, error = %e, "Failed to fetch emoji list channel");
            return Dispatched::done(EmojiListOutcome::PostFailed);
        }
    };

    let mut background = BestEffort::new();
    for message in previous {
        delete_previous(services, channel, message, &mut background);
    }

    let roster = match services.emojis.render_list(guild).await {
        Ok(roster) if roster.is_empty() => services.messages.get(MessageKey::EmojiListEmpty),
        Ok(roster) => roster,
        Err(e) => {
            error!(guild = %guild, error = %e, "Failed to render emoji roster");
            return Dispatched::with_background(EmojiListOutcome::PostFailed, background);
        }
    };

    let mut messages = Vec::new();
    for chunk in split_message(&roster, MESSAGE_LIMIT) {
        match services.platform.send_message(channel, &chunk).await {
            Ok(message) => messages.push(message),
            Err(e) => {
                error!(guild = %guild, channel = %channel, sent = messages.len(), error = %e, "Failed to post emoji list");
                return Dispatched::with_background(EmojiListOutcome::PostFailed, background);
            }
        }
    }

    info!(guild = %guild, channel = %channel, chunks = messages.len(), "Emoji list posted");
    Dispatched::with_background(EmojiListOutcome::Posted { messages }, background)
}

fn delete_previous(
    services: &Services,
    channel: ChannelId,
    message: MessageId,
    background: &mut BestEffort,
) {
    let platform = Arc::clone(&services.platform);
    background.spawn_in(
        info_span!("emoji_list", channel = %channel, message = %message),
        "delete_message",
        async move { platform.delete_message(channel, message).await },
    );
}
