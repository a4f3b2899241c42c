//! Reaction role revocation.

use crate::framework::Services;
use crate::reaction_add::{resolve_mapped_reaction, role_span, ReactionOutcome};
use rolecall_common::{BestEffort, Dispatched, ReactionSnapshot};
use std::sync::Arc;
use tracing::debug;

/// Revokes the role mapped to a removed reaction.
///
/// Single-use mappings are skipped: their reaction is removed by the bot
/// right after the grant, and that removal must not take the role back.
pub async fn handle_reaction_remove(
    services: &Services,
    snapshot: ReactionSnapshot,
) -> Dispatched<ReactionOutcome> {
    let (reaction, role) = match resolve_mapped_reaction(services, snapshot).await {
        Ok(resolved) => resolved,
        Err(outcome) => return Dispatched::done(outcome),
    };

    if services.roles.is_single_use(reaction.message_id, role) {
        return Dispatched::done(ReactionOutcome::SkippedSingleUse);
    }

    if !reaction.member.has_role(role) {
        debug!(guild = %reaction.guild_id, user = %reaction.user_id, role = %role, "Member does not hold role");
        return Dispatched::done(ReactionOutcome::SkippedNotHeld);
    }

    let mut background = BestEffort::new();
    let platform = Arc::clone(&services.platform);
    let (guild, user) = (reaction.guild_id, reaction.user_id);
    background.spawn_in(role_span(&reaction, role), "remove_role", async move {
        platform.remove_role(guild, user, role).await
    });

    Dispatched::with_background(ReactionOutcome::Revoked { role }, background)
}
