//! Gateway event dispatch.

use crate::framework::{Data, Error};
use crate::reaction_add::handle_reaction_add;
use crate::reaction_remove::handle_reaction_remove;
use poise::serenity_prelude as serenity;
use rolecall_common::{
    ChannelId, Emoji, GuildId, MemberSnapshot, MessageId, ReactionSnapshot, RoleId, UserId,
};
use tracing::{debug, info};

/// Central event handler for Discord events.
pub async fn event_handler(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::ReactionAdd { add_reaction } => {
            let outcome = handle_reaction_add(&data.services, snapshot_from_reaction(add_reaction))
                .await
                .detach();
            debug!(message = %add_reaction.message_id, ?outcome, "Reaction add handled");
        }
        serenity::FullEvent::ReactionRemove { removed_reaction } => {
            let outcome =
                handle_reaction_remove(&data.services, snapshot_from_reaction(removed_reaction))
                    .await
                    .detach();
            debug!(message = %removed_reaction.message_id, ?outcome, "Reaction remove handled");
        }
        serenity::FullEvent::Ready { data_about_bot } => {
            info!(
                user = %data_about_bot.user.name,
                guilds = data_about_bot.guilds.len(),
                "Bot ready"
            );
        }
        _ => {}
    }
    Ok(())
}

/// Converts a gateway reaction into a possibly-partial snapshot.
pub fn snapshot_from_reaction(reaction: &serenity::Reaction) -> ReactionSnapshot {
    ReactionSnapshot {
        guild_id: reaction.guild_id.map(|id| GuildId(id.get())),
        channel_id: ChannelId(reaction.channel_id.get()),
        message_id: MessageId(reaction.message_id.get()),
        user_id: reaction.user_id.map(|id| UserId(id.get())),
        emoji: Emoji::new(reaction.emoji.to_string()),
        member: reaction.member.as_ref().map(member_snapshot),
    }
}

/// The parts of a serenity member the reaction flows use.
pub fn member_snapshot(member: &serenity::Member) -> MemberSnapshot {
    MemberSnapshot {
        user_id: UserId(member.user.id.get()),
        bot: member.user.bot,
        roles: member.roles.iter().map(|role| RoleId(role.get())).collect(),
    }
}
