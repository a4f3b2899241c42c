//! Reaction role granting.

use crate::framework::Services;
use crate::role_limit::may_request_role;
use rolecall_common::{BestEffort, Dispatched, ReactionData, ReactionSnapshot, RoleId};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Span};

/// What a reaction handler decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// The reaction came from a bot account.
    SkippedBot,
    /// The event could not be completed into full reaction data.
    SkippedUnresolved,
    /// No role is mapped to the reaction.
    SkippedNotRoleReaction,
    /// The member already holds the guild's maximum of managed roles.
    RejectedLimit,
    /// The role grant was issued.
    Granted {
        /// The granted role.
        role: RoleId,
        /// Whether the reaction was removed again.
        single_use: bool,
    },
    /// The removed reaction belongs to a single-use mapping.
    SkippedSingleUse,
    /// The member does not hold the mapped role.
    SkippedNotHeld,
    /// The role revocation was issued.
    Revoked {
        /// The revoked role.
        role: RoleId,
    },
}

/// Grants the role mapped to a reaction.
///
/// A member who already holds the mapped role is re-granted without a limit
/// check, so their reaction is never removed and the role is never revoked.
///
/// Role and reaction changes are spawned into the returned background set;
/// their failures are logged and never undo one another.
pub async fn handle_reaction_add(
    services: &Services,
    snapshot: ReactionSnapshot,
) -> Dispatched<ReactionOutcome> {
    let (reaction, role) = match resolve_mapped_reaction(services, snapshot).await {
        Ok(resolved) => resolved,
        Err(outcome) => return Dispatched::done(outcome),
    };

    let mut background = BestEffort::new();
    let already_held = reaction.member.has_role(role);
    if !already_held
        && !may_request_role(
            services.settings.as_ref(),
            services.roles.as_ref(),
            reaction.guild_id,
            &reaction.member,
        )
    {
        info!(
            guild = %reaction.guild_id,
            user = %reaction.user_id,
            role = %role,
            "Role limit reached, rejecting reaction"
        );
        remove_reaction(services, &reaction, &mut background);
        return Dispatched::with_background(ReactionOutcome::RejectedLimit, background);
    }

    let single_use = services.roles.is_single_use(reaction.message_id, role);
    if single_use {
        remove_reaction(services, &reaction, &mut background);
    }

    let platform = Arc::clone(&services.platform);
    let (guild, user) = (reaction.guild_id, reaction.user_id);
    background.spawn_in(role_span(&reaction, role), "add_role", async move {
        platform.add_role(guild, user, role).await
    });

    debug!(guild = %guild, user = %user, role = %role, single_use, already_held, "Granting reaction role");
    Dispatched::with_background(ReactionOutcome::Granted { role, single_use }, background)
}

/// Runs the stages shared by both reaction handlers: bot filter, hydration
/// and mapping lookup.
pub(crate) async fn resolve_mapped_reaction(
    services: &Services,
    snapshot: ReactionSnapshot,
) -> Result<(ReactionData, RoleId), ReactionOutcome> {
    if snapshot.is_from_bot() {
        return Err(ReactionOutcome::SkippedBot);
    }

    let channel = snapshot.channel_id;
    let message = snapshot.message_id;
    let reaction = snapshot
        .hydrate(services.platform.as_ref())
        .await
        .map_err(|e| {
            warn!(channel = %channel, message = %message, error = %e, "Failed to resolve reaction");
            ReactionOutcome::SkippedUnresolved
        })?;

    if reaction.member.bot {
        return Err(ReactionOutcome::SkippedBot);
    }

    let role = services
        .roles
        .role_for(&reaction.role_key())
        .ok_or(ReactionOutcome::SkippedNotRoleReaction)?;

    Ok((reaction, role))
}

pub(crate) fn role_span(reaction: &ReactionData, role: RoleId) -> Span {
    info_span!(
        "reaction_role",
        guild = %reaction.guild_id,
        user = %reaction.user_id,
        role = %role
    )
}

fn remove_reaction(services: &Services, reaction: &ReactionData, background: &mut BestEffort) {
    let platform = Arc::clone(&services.platform);
    let (channel, message, user) = (reaction.channel_id, reaction.message_id, reaction.user_id);
    let emoji = reaction.emoji.clone();

    background.spawn_in(
        info_span!("reaction_role", channel = %channel, message = %message, user = %user),
        "remove_reaction",
        async move { platform.remove_reaction(channel, message, user, &emoji).await },
    );
}
