//! Test utilities and shared test helpers for Rolecall.
//!
//! This module provides logging setup, id fixtures, and an in-memory
//! [`ChatPlatform`] that records every call so tests can assert on the
//! side effects a flow produced.

use crate::emoji::Emoji;
use crate::error::{PlatformError, PlatformResult};
use crate::platform::ChatPlatform;
use crate::types::{ChannelId, GuildEmoji, GuildId, MemberSnapshot, MessageId, RoleId, UserId};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, Once};
use tracing_subscriber::{fmt, EnvFilter};

pub use crate::platform::MockChatPlatform;

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call multiple times.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Discord-related id fixtures.
pub mod discord_fixtures {
    use crate::{ChannelId, GuildId, MessageId, RoleId, UserId};

    /// Create a test guild ID.
    pub fn test_guild_id() -> GuildId {
        GuildId(111_111_111_111_111_111)
    }

    /// Create a test channel ID.
    pub fn test_channel_id() -> ChannelId {
        ChannelId(123_456_789_012_345_678)
    }

    /// Create a test message ID.
    pub fn test_message_id() -> MessageId {
        MessageId(222_222_222_222_222_222)
    }

    /// Create a test user ID.
    pub fn test_user_id() -> UserId {
        UserId(987_654_321_098_765_432)
    }

    /// Create multiple test role IDs.
    pub fn test_role_ids(count: usize) -> Vec<RoleId> {
        (0..count)
            .map(|i| RoleId(300_000_000_000_000_000 + i as u64))
            .collect()
    }
}

/// A platform call recorded by [`FakePlatform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    /// `fetch_message_ids`
    FetchMessages(ChannelId),
    /// `delete_message`
    DeleteMessage(ChannelId, MessageId),
    /// `send_message`
    SendMessage(ChannelId, String),
    /// `channel_guild`
    ChannelGuild(ChannelId),
    /// `member`
    Member(GuildId, UserId),
    /// `guild_emojis`
    GuildEmojis(GuildId),
    /// `remove_reaction`
    RemoveReaction {
        /// Channel of the message.
        channel: ChannelId,
        /// Reacted message.
        message: MessageId,
        /// User whose reaction was removed.
        user: UserId,
        /// Normalized emoji id.
        emoji: String,
    },
    /// `add_role`
    AddRole(GuildId, UserId, RoleId),
    /// `remove_role`
    RemoveRole(GuildId, UserId, RoleId),
}

#[derive(Debug, Default)]
struct FakeState {
    channels: HashMap<ChannelId, GuildId>,
    messages: HashMap<ChannelId, Vec<MessageId>>,
    members: HashMap<(GuildId, UserId), MemberSnapshot>,
    emojis: HashMap<GuildId, Vec<GuildEmoji>>,
    failing_deletes: HashSet<MessageId>,
    fail_fetch: bool,
    fail_sends: bool,
    fail_add_role: bool,
    fail_remove_reaction: bool,
    calls: Vec<PlatformCall>,
    next_message_id: u64,
}

/// An in-memory chat platform.
///
/// Every call is recorded in order. Failures can be injected per operation.
#[derive(Debug, Default)]
pub struct FakePlatform {
    state: Mutex<FakeState>,
}

impl FakePlatform {
    /// Creates an empty platform.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake platform state poisoned")
    }

    /// Registers a guild channel holding the given messages.
    pub fn with_channel(self, guild: GuildId, channel: ChannelId, messages: Vec<MessageId>) -> Self {
        {
            let mut state = self.state();
            state.channels.insert(channel, guild);
            state.messages.insert(channel, messages);
        }
        self
    }

    /// Registers a guild member.
    pub fn with_member(self, guild: GuildId, member: MemberSnapshot) -> Self {
        self.state().members.insert((guild, member.user_id), member);
        self
    }

    /// Registers the custom emojis of a guild.
    pub fn with_emojis(self, guild: GuildId, emojis: Vec<GuildEmoji>) -> Self {
        self.state().emojis.insert(guild, emojis);
        self
    }

    /// Makes deleting `message` fail.
    pub fn failing_delete(self, message: MessageId) -> Self {
        self.state().failing_deletes.insert(message);
        self
    }

    /// Makes fetching channel messages fail.
    pub fn failing_fetch(self) -> Self {
        self.state().fail_fetch = true;
        self
    }

    /// Makes every send fail.
    pub fn failing_sends(self) -> Self {
        self.state().fail_sends = true;
        self
    }

    /// Makes every role grant fail.
    pub fn failing_add_role(self) -> Self {
        self.state().fail_add_role = true;
        self
    }

    /// Makes every reaction removal fail.
    pub fn failing_remove_reaction(self) -> Self {
        self.state().fail_remove_reaction = true;
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.state().calls.clone()
    }

    /// Content sent to a channel, in order.
    pub fn sent_to(&self, channel: ChannelId) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::SendMessage(target, content) if target == channel => Some(content),
                _ => None,
            })
            .collect()
    }

    /// Messages a deletion was attempted for.
    pub fn delete_attempts(&self) -> Vec<MessageId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::DeleteMessage(_, message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Roles a grant was attempted for.
    pub fn role_grants(&self) -> Vec<(GuildId, UserId, RoleId)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::AddRole(guild, user, role) => Some((guild, user, role)),
                _ => None,
            })
            .collect()
    }

    /// Roles a revocation was attempted for.
    pub fn role_revocations(&self) -> Vec<(GuildId, UserId, RoleId)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::RemoveRole(guild, user, role) => Some((guild, user, role)),
                _ => None,
            })
            .collect()
    }

    /// Reaction removals attempted, as (message, user).
    pub fn reaction_removals(&self) -> Vec<(MessageId, UserId)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::RemoveReaction { message, user, .. } => Some((message, user)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: PlatformCall) -> MutexGuard<'_, FakeState> {
        let mut state = self.state();
        state.calls.push(call);
        state
    }
}

#[async_trait]
impl ChatPlatform for FakePlatform {
    async fn fetch_message_ids(&self, channel: ChannelId) -> PlatformResult<Vec<MessageId>> {
        let state = self.record(PlatformCall::FetchMessages(channel));
        if state.fail_fetch {
            return Err(PlatformError::request("fetch failed"));
        }
        state
            .messages
            .get(&channel)
            .cloned()
            .ok_or_else(|| PlatformError::not_found("channel"))
    }

    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> PlatformResult<()> {
        let mut state = self.record(PlatformCall::DeleteMessage(channel, message));
        if state.failing_deletes.contains(&message) {
            return Err(PlatformError::request("delete failed"));
        }
        if let Some(messages) = state.messages.get_mut(&channel) {
            messages.retain(|existing| *existing != message);
        }
        Ok(())
    }

    async fn send_message(&self, channel: ChannelId, content: &str) -> PlatformResult<MessageId> {
        let mut state = self.record(PlatformCall::SendMessage(channel, content.to_string()));
        if state.fail_sends {
            return Err(PlatformError::request("send failed"));
        }
        state.next_message_id += 1;
        Ok(MessageId(900_000 + state.next_message_id))
    }

    async fn channel_guild(&self, channel: ChannelId) -> PlatformResult<Option<GuildId>> {
        let state = self.record(PlatformCall::ChannelGuild(channel));
        Ok(state.channels.get(&channel).copied())
    }

    async fn member(&self, guild: GuildId, user: UserId) -> PlatformResult<MemberSnapshot> {
        let state = self.record(PlatformCall::Member(guild, user));
        state
            .members
            .get(&(guild, user))
            .cloned()
            .ok_or_else(|| PlatformError::not_found("member"))
    }

    async fn guild_emojis(&self, guild: GuildId) -> PlatformResult<Vec<GuildEmoji>> {
        let state = self.record(PlatformCall::GuildEmojis(guild));
        Ok(state.emojis.get(&guild).cloned().unwrap_or_default())
    }

    async fn remove_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        user: UserId,
        emoji: &Emoji,
    ) -> PlatformResult<()> {
        let state = self.record(PlatformCall::RemoveReaction {
            channel,
            message,
            user,
            emoji: emoji.id().to_string(),
        });
        if state.fail_remove_reaction {
            return Err(PlatformError::request("remove reaction failed"));
        }
        Ok(())
    }

    async fn add_role(&self, guild: GuildId, user: UserId, role: RoleId) -> PlatformResult<()> {
        let state = self.record(PlatformCall::AddRole(guild, user, role));
        if state.fail_add_role {
            return Err(PlatformError::request("add role failed"));
        }
        Ok(())
    }

    async fn remove_role(&self, guild: GuildId, user: UserId, role: RoleId) -> PlatformResult<()> {
        let _state = self.record(PlatformCall::RemoveRole(guild, user, role));
        Ok(())
    }
}
