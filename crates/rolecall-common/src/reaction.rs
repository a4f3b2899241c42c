//! Two-stage reaction event data: a possibly-partial snapshot and its
//! hydrated form.

use crate::emoji::Emoji;
use crate::error::PlatformError;
use crate::platform::ChatPlatform;
use crate::types::{ChannelId, GuildId, MemberSnapshot, MessageId, ReactionRoleKey, UserId};
use thiserror::Error;
use tracing::debug;

/// Why a reaction snapshot could not be completed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HydrateError {
    /// The event did not name the reacting user.
    #[error("reaction event carries no user")]
    MissingUser,

    /// The reaction was not made inside a guild.
    #[error("channel {0} does not belong to a guild")]
    NotInGuild(ChannelId),

    /// A lookup needed to complete the snapshot failed.
    #[error("failed to fetch {what}: {source}")]
    Fetch {
        /// What was being fetched.
        what: &'static str,
        /// The platform failure.
        #[source]
        source: PlatformError,
    },
}

/// Reaction event data as delivered by the gateway.
///
/// The guild and member may be missing, in which case [`hydrate`](Self::hydrate)
/// fetches them.
#[derive(Debug, Clone)]
pub struct ReactionSnapshot {
    /// Guild the reaction happened in, when the event says so.
    pub guild_id: Option<GuildId>,
    /// Channel of the reacted message.
    pub channel_id: ChannelId,
    /// The reacted message.
    pub message_id: MessageId,
    /// The reacting user, when known.
    pub user_id: Option<UserId>,
    /// The emoji used.
    pub emoji: Emoji,
    /// The reacting member, when the event includes it.
    pub member: Option<MemberSnapshot>,
}

impl ReactionSnapshot {
    /// True when the snapshot already shows the reacting user is a bot.
    pub fn is_from_bot(&self) -> bool {
        self.member.as_ref().is_some_and(|member| member.bot)
    }

    /// Completes the snapshot, fetching whatever the event left out.
    pub async fn hydrate(self, platform: &dyn ChatPlatform) -> Result<ReactionData, HydrateError> {
        let user_id = self
            .user_id
            .or_else(|| self.member.as_ref().map(|member| member.user_id))
            .ok_or(HydrateError::MissingUser)?;

        let guild_id = match self.guild_id {
            Some(guild) => guild,
            None => {
                debug!(channel = %self.channel_id, "resolving guild for partial reaction");
                platform
                    .channel_guild(self.channel_id)
                    .await
                    .map_err(|source| HydrateError::Fetch {
                        what: "channel",
                        source,
                    })?
                    .ok_or(HydrateError::NotInGuild(self.channel_id))?
            }
        };

        let member = match self.member {
            Some(member) => member,
            None => {
                debug!(guild = %guild_id, user = %user_id, "fetching member for partial reaction");
                platform
                    .member(guild_id, user_id)
                    .await
                    .map_err(|source| HydrateError::Fetch {
                        what: "member",
                        source,
                    })?
            }
        };

        Ok(ReactionData {
            guild_id,
            channel_id: self.channel_id,
            message_id: self.message_id,
            user_id,
            emoji: self.emoji,
            member,
        })
    }
}

/// Fully populated reaction event data.
#[derive(Debug, Clone)]
pub struct ReactionData {
    /// Guild the reaction happened in.
    pub guild_id: GuildId,
    /// Channel of the reacted message.
    pub channel_id: ChannelId,
    /// The reacted message.
    pub message_id: MessageId,
    /// The reacting user.
    pub user_id: UserId,
    /// The emoji used.
    pub emoji: Emoji,
    /// The reacting member.
    pub member: MemberSnapshot,
}

impl ReactionData {
    /// The reaction role mapping key for this reaction.
    pub fn role_key(&self) -> ReactionRoleKey {
        ReactionRoleKey {
            guild: self.guild_id,
            channel: self.channel_id,
            message: self.message_id,
            emoji: self.emoji.id().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{discord_fixtures, FakePlatform, PlatformCall};
    use crate::types::RoleId;

    fn snapshot() -> ReactionSnapshot {
        ReactionSnapshot {
            guild_id: None,
            channel_id: discord_fixtures::test_channel_id(),
            message_id: discord_fixtures::test_message_id(),
            user_id: Some(discord_fixtures::test_user_id()),
            emoji: Emoji::new("👍"),
            member: None,
        }
    }

    fn member() -> MemberSnapshot {
        MemberSnapshot {
            user_id: discord_fixtures::test_user_id(),
            bot: false,
            roles: vec![RoleId(5)],
        }
    }

    #[tokio::test]
    async fn test_hydrate_fetches_missing_guild_and_member() {
        let guild = discord_fixtures::test_guild_id();
        let platform = FakePlatform::new()
            .with_channel(guild, discord_fixtures::test_channel_id(), vec![])
            .with_member(guild, member());

        let data = snapshot().hydrate(&platform).await.unwrap();

        assert_eq!(data.guild_id, guild);
        assert_eq!(data.member, member());
        assert_eq!(data.role_key().emoji, "👍");
        assert_eq!(
            platform.calls(),
            vec![
                PlatformCall::ChannelGuild(discord_fixtures::test_channel_id()),
                PlatformCall::Member(guild, discord_fixtures::test_user_id()),
            ]
        );
    }

    #[tokio::test]
    async fn test_hydrate_complete_snapshot_makes_no_calls() {
        let guild = discord_fixtures::test_guild_id();
        let platform = FakePlatform::new();
        let complete = ReactionSnapshot {
            guild_id: Some(guild),
            member: Some(member()),
            ..snapshot()
        };

        let data = complete.hydrate(&platform).await.unwrap();

        assert_eq!(data.guild_id, guild);
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_hydrate_reports_unknown_member() {
        let guild = discord_fixtures::test_guild_id();
        let platform =
            FakePlatform::new().with_channel(guild, discord_fixtures::test_channel_id(), vec![]);

        let err = snapshot().hydrate(&platform).await.unwrap_err();

        assert!(matches!(err, HydrateError::Fetch { what: "member", ref source } if source.is_not_found()));
    }

    #[tokio::test]
    async fn test_hydrate_rejects_reactions_outside_guilds() {
        let platform = FakePlatform::new();

        let err = snapshot().hydrate(&platform).await.unwrap_err();

        assert_eq!(err, HydrateError::NotInGuild(discord_fixtures::test_channel_id()));
    }

    #[tokio::test]
    async fn test_hydrate_requires_a_user() {
        let platform = FakePlatform::new();
        let anonymous = ReactionSnapshot {
            user_id: None,
            ..snapshot()
        };

        assert_eq!(
            anonymous.hydrate(&platform).await.unwrap_err(),
            HydrateError::MissingUser
        );
    }
}
