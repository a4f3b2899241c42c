//! Integration tests for rolecall-commands crate.
//!
//! These tests drive the emoji list and reaction role flows against the
//! in-memory platform and assert on the platform calls they produce.

use rolecall_commands::{
    handle_reaction_add, handle_reaction_remove, publish_emoji_list, EmojiListOutcome,
    ReactionOutcome, Services,
};
use rolecall_common::test_utils::{
    discord_fixtures::*, init_test_logging, FakePlatform, MockChatPlatform, PlatformCall,
};
use rolecall_common::{
    ChannelId, ChatPlatform, Emoji, EmojiId, GuildEmoji, GuildId, MemberSnapshot, MessageId,
    ReactionRoleKey, ReactionSnapshot, RoleId, Settled, UserId, MESSAGE_LIMIT,
};
use rolecall_config::{Config, ConfigCache, GuildConfig, ReactionRoleConfig, EMOJI_LIST_KEY, LIMIT_KEY};
use rolecall_i18n::{MessageKey, Messages};
use rolecall_managers::{EmojiDirectory, RoleDirectory};
use std::sync::Arc;

const LIST_CHANNEL: ChannelId = ChannelId(555_555_555_555_555_555);
const ROLE_MESSAGE: MessageId = MessageId(444_444_444_444_444_444);
const THUMBS_ROLE: RoleId = RoleId(10);
const PARTY_ROLE: RoleId = RoleId(11);
const TICKET_ROLE: RoleId = RoleId(12);

fn config(settings: &[(&str, &str)]) -> Arc<ConfigCache> {
    let mapping = |emoji: &str, role: RoleId, single_use: bool| ReactionRoleConfig {
        channel: test_channel_id(),
        message: ROLE_MESSAGE,
        emoji: emoji.to_string(),
        role,
        single_use,
    };

    let mut config = Config::default();
    config.guilds.push(GuildConfig {
        id: test_guild_id(),
        settings: settings
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect(),
        reaction_roles: vec![
            mapping("👍", THUMBS_ROLE, false),
            mapping("<:party:77>", PARTY_ROLE, false),
            mapping("🎟️", TICKET_ROLE, true),
        ],
    });
    Arc::new(ConfigCache::new(config))
}

fn services(settings: &[(&str, &str)], platform: Arc<dyn ChatPlatform>) -> Services {
    init_test_logging();
    Services::from_config(&config(settings), platform).unwrap()
}

fn member(roles: &[RoleId]) -> MemberSnapshot {
    MemberSnapshot {
        user_id: test_user_id(),
        bot: false,
        roles: roles.to_vec(),
    }
}

fn reaction(emoji: &str, member: Option<MemberSnapshot>) -> ReactionSnapshot {
    ReactionSnapshot {
        guild_id: Some(test_guild_id()),
        channel_id: test_channel_id(),
        message_id: ROLE_MESSAGE,
        user_id: Some(test_user_id()),
        emoji: Emoji::new(emoji),
        member,
    }
}

fn emojis(count: u64) -> Vec<GuildEmoji> {
    (1..=count)
        .map(|i| GuildEmoji {
            id: EmojiId(800_000_000_000_000_000 + i),
            name: format!("emoji_number_{i:04}"),
            animated: i % 3 == 0,
        })
        .collect()
}

fn list_platform(previous: Vec<MessageId>) -> FakePlatform {
    FakePlatform::new().with_channel(test_guild_id(), LIST_CHANNEL, previous)
}

fn list_settings() -> Vec<(&'static str, String)> {
    vec![(EMOJI_LIST_KEY, format!("<#{LIST_CHANNEL}>"))]
}

fn as_pairs<'a>(settings: &'a [(&'static str, String)]) -> Vec<(&'static str, &'a str)> {
    settings
        .iter()
        .map(|(key, value)| (*key, value.as_str()))
        .collect()
}

struct NoLookups;

impl RoleDirectory for NoLookups {
    fn role_for(&self, _key: &ReactionRoleKey) -> Option<RoleId> {
        panic!("mapping lookup for a bot reaction")
    }

    fn is_single_use(&self, _message: MessageId, _role: RoleId) -> bool {
        panic!("single-use lookup for a bot reaction")
    }

    fn is_managed(&self, _role: RoleId) -> bool {
        panic!("limit check for a bot reaction")
    }
}

// Emoji list

#[tokio::test]
async fn test_unconfigured_guild_makes_no_platform_calls() {
    let platform = Arc::new(list_platform(vec![MessageId(1), MessageId(2)]));
    let services = services(&[], platform.clone());

    let dispatched = publish_emoji_list(&services, test_guild_id()).await;

    assert_eq!(dispatched.outcome, EmojiListOutcome::NotConfigured);
    assert_eq!(
        dispatched.outcome.message_key(),
        MessageKey::EmojiListNotConfigured
    );
    assert_eq!(dispatched.background.settle().await, Settled::default());
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn test_unconfigured_guild_with_mock_platform() {
    let services = services(&[], Arc::new(MockChatPlatform::new()));

    let outcome = publish_emoji_list(&services, test_guild_id()).await.outcome;
    assert_eq!(outcome, EmojiListOutcome::NotConfigured);
}

#[tokio::test]
async fn test_other_settings_leave_emoji_list_unconfigured() {
    let platform = Arc::new(list_platform(Vec::new()));
    let services = services(&[(LIMIT_KEY, "0")], platform.clone());

    let outcome = publish_emoji_list(&services, test_guild_id()).await.outcome;
    assert_eq!(outcome, EmojiListOutcome::NotConfigured);
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn test_foreign_channel_is_invalid_target() {
    let platform = Arc::new(
        FakePlatform::new()
            .with_channel(GuildId(9), LIST_CHANNEL, vec![MessageId(1)])
            .with_emojis(test_guild_id(), emojis(3)),
    );
    let settings = list_settings();
    let services = services(&as_pairs(&settings), platform.clone());

    let dispatched = publish_emoji_list(&services, test_guild_id()).await;

    assert_eq!(dispatched.outcome, EmojiListOutcome::InvalidTarget);
    assert_eq!(dispatched.outcome.message_key(), MessageKey::EmojiListInvalid);
    dispatched.background.settle().await;
    assert!(platform.delete_attempts().is_empty());
    assert!(platform.sent_to(LIST_CHANNEL).is_empty());
}

#[tokio::test]
async fn test_unparseable_target_is_invalid() {
    let platform = Arc::new(list_platform(vec![MessageId(1)]));
    let services = services(&[(EMOJI_LIST_KEY, "#emojis")], platform.clone());

    let outcome = publish_emoji_list(&services, test_guild_id()).await.outcome;
    assert_eq!(outcome, EmojiListOutcome::InvalidTarget);
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn test_every_previous_message_is_deleted_and_roster_posted() {
    let previous: Vec<_> = (1..=5).map(MessageId).collect();
    let platform = Arc::new(
        list_platform(previous.clone())
            .with_emojis(test_guild_id(), emojis(4))
            .failing_delete(MessageId(3)),
    );
    let settings = list_settings();
    let services = services(&as_pairs(&settings), platform.clone());

    let dispatched = publish_emoji_list(&services, test_guild_id()).await;
    let settled = dispatched.background.settle().await;

    let EmojiListOutcome::Posted { messages } = dispatched.outcome else {
        panic!("expected the list to be posted");
    };
    assert_eq!(messages.len(), 1);
    assert_eq!(
        settled,
        Settled {
            succeeded: 4,
            failed: 1
        }
    );

    let mut attempts = platform.delete_attempts();
    attempts.sort();
    assert_eq!(attempts, previous);

    let roster = services.emojis.render_list(test_guild_id()).await.unwrap();
    assert_eq!(platform.sent_to(LIST_CHANNEL).concat(), roster);
}

#[tokio::test]
async fn test_long_roster_is_split_at_line_boundaries() {
    let platform = Arc::new(list_platform(Vec::new()).with_emojis(test_guild_id(), emojis(300)));
    let settings = list_settings();
    let services = services(&as_pairs(&settings), platform.clone());

    let dispatched = publish_emoji_list(&services, test_guild_id()).await;
    dispatched.background.settle().await;

    let sent = platform.sent_to(LIST_CHANNEL);
    assert!(sent.len() > 1);
    for chunk in &sent {
        assert!(chunk.chars().count() <= MESSAGE_LIMIT);
        assert!(chunk.ends_with('\n'));
    }

    let roster = services.emojis.render_list(test_guild_id()).await.unwrap();
    assert_eq!(sent.concat(), roster);
    assert_eq!(
        dispatched.outcome,
        EmojiListOutcome::Posted {
            messages: (1..=sent.len() as u64).map(|n| MessageId(900_000 + n)).collect()
        }
    );
}

#[tokio::test]
async fn test_guild_without_emojis_posts_placeholder() {
    let platform = Arc::new(list_platform(Vec::new()));
    let settings = list_settings();
    let services = services(&as_pairs(&settings), platform.clone());

    let outcome = publish_emoji_list(&services, test_guild_id()).await.outcome;

    assert!(matches!(outcome, EmojiListOutcome::Posted { .. }));
    let placeholder = Messages::new("en-US").unwrap().get(MessageKey::EmojiListEmpty);
    assert_eq!(platform.sent_to(LIST_CHANNEL), vec![placeholder]);
}

#[tokio::test]
async fn test_fetch_failure_posts_nothing() {
    let platform = Arc::new(
        list_platform(vec![MessageId(1)])
            .with_emojis(test_guild_id(), emojis(2))
            .failing_fetch(),
    );
    let settings = list_settings();
    let services = services(&as_pairs(&settings), platform.clone());

    let dispatched = publish_emoji_list(&services, test_guild_id()).await;

    assert_eq!(dispatched.outcome, EmojiListOutcome::PostFailed);
    dispatched.background.settle().await;
    assert!(platform.delete_attempts().is_empty());
    assert!(platform.sent_to(LIST_CHANNEL).is_empty());
}

#[tokio::test]
async fn test_first_send_failure_stops_posting() {
    let platform = Arc::new(
        list_platform(vec![MessageId(1)])
            .with_emojis(test_guild_id(), emojis(300))
            .failing_sends(),
    );
    let settings = list_settings();
    let services = services(&as_pairs(&settings), platform.clone());

    let dispatched = publish_emoji_list(&services, test_guild_id()).await;

    assert_eq!(dispatched.outcome, EmojiListOutcome::PostFailed);
    assert_eq!(
        dispatched.outcome.message_key(),
        MessageKey::EmojiListPostFailed
    );
    dispatched.background.settle().await;
    assert_eq!(platform.sent_to(LIST_CHANNEL).len(), 1);
    assert_eq!(platform.delete_attempts(), vec![MessageId(1)]);
}

// Reaction add

#[tokio::test]
async fn test_bot_reaction_touches_nothing() {
    let mut services = services(&[(LIMIT_KEY, "1")], Arc::new(MockChatPlatform::new()));
    services.roles = Arc::new(NoLookups);

    let bot = MemberSnapshot {
        bot: true,
        ..member(&[])
    };
    let dispatched = handle_reaction_add(&services, reaction("👍", Some(bot))).await;

    assert_eq!(dispatched.outcome, ReactionOutcome::SkippedBot);
    assert!(dispatched.background.is_empty());
}

#[tokio::test]
async fn test_bot_discovered_by_hydration_is_skipped() {
    let bot = MemberSnapshot {
        bot: true,
        ..member(&[])
    };
    let platform = Arc::new(FakePlatform::new().with_member(test_guild_id(), bot));
    let mut services = services(&[], platform.clone());
    services.roles = Arc::new(NoLookups);

    let dispatched = handle_reaction_add(&services, reaction("👍", None)).await;

    assert_eq!(dispatched.outcome, ReactionOutcome::SkippedBot);
    assert!(platform.role_grants().is_empty());
}

#[tokio::test]
async fn test_unmapped_reaction_is_left_alone() {
    let platform = Arc::new(FakePlatform::new());
    let services = services(&[], platform.clone());

    let dispatched = handle_reaction_add(&services, reaction("🦀", Some(member(&[])))).await;

    assert_eq!(dispatched.outcome, ReactionOutcome::SkippedNotRoleReaction);
    assert_eq!(dispatched.background.settle().await, Settled::default());
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn test_mapping_on_other_message_is_ignored() {
    let platform = Arc::new(FakePlatform::new());
    let services = services(&[], platform.clone());

    let mut snapshot = reaction("👍", Some(member(&[])));
    snapshot.message_id = MessageId(1);
    let outcome = handle_reaction_add(&services, snapshot).await.outcome;

    assert_eq!(outcome, ReactionOutcome::SkippedNotRoleReaction);
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn test_zero_limit_allows_any_number_of_managed_roles() {
    let platform = Arc::new(FakePlatform::new());
    let services = services(&[(LIMIT_KEY, "0")], platform.clone());

    let holder = member(&[THUMBS_ROLE, TICKET_ROLE]);
    let dispatched = handle_reaction_add(&services, reaction("<:party:77>", Some(holder))).await;
    dispatched.background.settle().await;

    assert_eq!(
        dispatched.outcome,
        ReactionOutcome::Granted {
            role: PARTY_ROLE,
            single_use: false
        }
    );
    assert_eq!(
        platform.role_grants(),
        vec![(test_guild_id(), test_user_id(), PARTY_ROLE)]
    );
}

#[tokio::test]
async fn test_member_at_limit_is_rejected_and_reaction_removed() {
    let platform = Arc::new(FakePlatform::new());
    let services = services(&[(LIMIT_KEY, "2")], platform.clone());

    let holder = member(&[THUMBS_ROLE, TICKET_ROLE]);
    let dispatched = handle_reaction_add(&services, reaction("<:party:77>", Some(holder))).await;
    dispatched.background.settle().await;

    assert_eq!(dispatched.outcome, ReactionOutcome::RejectedLimit);
    assert!(platform.role_grants().is_empty());
    assert_eq!(
        platform.calls(),
        vec![PlatformCall::RemoveReaction {
            channel: test_channel_id(),
            message: ROLE_MESSAGE,
            user: test_user_id(),
            emoji: "77".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_single_use_reaction_removed_even_when_grant_fails() {
    let platform = Arc::new(FakePlatform::new().failing_add_role());
    let services = services(&[], platform.clone());

    let dispatched = handle_reaction_add(&services, reaction("🎟", Some(member(&[])))).await;
    let settled = dispatched.background.settle().await;

    assert_eq!(
        dispatched.outcome,
        ReactionOutcome::Granted {
            role: TICKET_ROLE,
            single_use: true
        }
    );
    assert_eq!(
        settled,
        Settled {
            succeeded: 1,
            failed: 1
        }
    );
    assert_eq!(
        platform.reaction_removals(),
        vec![(ROLE_MESSAGE, test_user_id())]
    );
    assert_eq!(
        platform.role_grants(),
        vec![(test_guild_id(), test_user_id(), TICKET_ROLE)]
    );
}

#[tokio::test]
async fn test_failed_reaction_removal_does_not_block_grant() {
    let platform = Arc::new(FakePlatform::new().failing_remove_reaction());
    let services = services(&[], platform.clone());

    let dispatched = handle_reaction_add(&services, reaction("🎟️", Some(member(&[])))).await;
    let settled = dispatched.background.settle().await;

    assert_eq!(settled.failed, 1);
    assert_eq!(platform.role_grants().len(), 1);
}

#[tokio::test]
async fn test_limit_one_first_role_is_granted_and_reaction_kept() {
    let platform = Arc::new(FakePlatform::new());
    let services = services(&[(LIMIT_KEY, "1")], platform.clone());

    let dispatched = handle_reaction_add(&services, reaction("👍", Some(member(&[])))).await;
    dispatched.background.settle().await;

    assert_eq!(
        dispatched.outcome,
        ReactionOutcome::Granted {
            role: THUMBS_ROLE,
            single_use: false
        }
    );
    assert_eq!(
        platform.role_grants(),
        vec![(test_guild_id(), test_user_id(), THUMBS_ROLE)]
    );
    assert!(platform.reaction_removals().is_empty());
}

#[tokio::test]
async fn test_limit_one_second_role_is_rejected() {
    let platform = Arc::new(FakePlatform::new());
    let services = services(&[(LIMIT_KEY, "1")], platform.clone());

    let holder = member(&[THUMBS_ROLE]);
    let dispatched = handle_reaction_add(&services, reaction("<:party:77>", Some(holder))).await;
    dispatched.background.settle().await;

    assert_eq!(dispatched.outcome, ReactionOutcome::RejectedLimit);
    assert!(platform.role_grants().is_empty());
    assert_eq!(
        platform.reaction_removals(),
        vec![(ROLE_MESSAGE, test_user_id())]
    );
}

#[tokio::test]
async fn test_unmanaged_roles_do_not_count_toward_limit() {
    let platform = Arc::new(FakePlatform::new());
    let services = services(&[(LIMIT_KEY, "1")], platform.clone());

    let holder = member(&[RoleId(1), RoleId(2), RoleId(3)]);
    let outcome = handle_reaction_add(&services, reaction("👍", Some(holder)))
        .await
        .outcome;

    assert!(matches!(outcome, ReactionOutcome::Granted { .. }));
}

#[tokio::test]
async fn test_partial_reaction_is_hydrated() {
    let platform = Arc::new(
        FakePlatform::new()
            .with_channel(test_guild_id(), test_channel_id(), Vec::new())
            .with_member(test_guild_id(), member(&[])),
    );
    let services = services(&[], platform.clone());

    let mut snapshot = reaction("👍", None);
    snapshot.guild_id = None;
    let dispatched = handle_reaction_add(&services, snapshot).await;
    dispatched.background.settle().await;

    assert!(matches!(dispatched.outcome, ReactionOutcome::Granted { .. }));
    assert_eq!(
        platform.calls()[..2],
        [
            PlatformCall::ChannelGuild(test_channel_id()),
            PlatformCall::Member(test_guild_id(), test_user_id()),
        ]
    );
}

#[tokio::test]
async fn test_unknown_member_is_unresolved() {
    let platform = Arc::new(FakePlatform::new());
    let services = services(&[], platform.clone());

    let dispatched = handle_reaction_add(&services, reaction("👍", None)).await;

    assert_eq!(dispatched.outcome, ReactionOutcome::SkippedUnresolved);
    assert!(platform.role_grants().is_empty());
}

// Reaction remove

#[tokio::test]
async fn test_removed_reaction_revokes_held_role() {
    let platform = Arc::new(FakePlatform::new().with_member(test_guild_id(), member(&[THUMBS_ROLE])));
    let services = services(&[], platform.clone());

    let dispatched = handle_reaction_remove(&services, reaction("👍", None)).await;
    dispatched.background.settle().await;

    assert_eq!(
        dispatched.outcome,
        ReactionOutcome::Revoked { role: THUMBS_ROLE }
    );
    assert_eq!(
        platform.role_revocations(),
        vec![(test_guild_id(), test_user_id(), THUMBS_ROLE)]
    );
}

#[tokio::test]
async fn test_removed_reaction_without_role_is_skipped() {
    let platform = Arc::new(FakePlatform::new().with_member(test_guild_id(), member(&[])));
    let services = services(&[], platform.clone());

    let outcome = handle_reaction_remove(&services, reaction("👍", None))
        .await
        .outcome;

    assert_eq!(outcome, ReactionOutcome::SkippedNotHeld);
    assert!(platform.role_revocations().is_empty());
}

#[tokio::test]
async fn test_single_use_removal_keeps_role() {
    let platform = Arc::new(FakePlatform::new().with_member(test_guild_id(), member(&[TICKET_ROLE])));
    let services = services(&[], platform.clone());

    let outcome = handle_reaction_remove(&services, reaction("🎟", None))
        .await
        .outcome;

    assert_eq!(outcome, ReactionOutcome::SkippedSingleUse);
    assert!(platform.role_revocations().is_empty());
}

#[tokio::test]
async fn test_bot_reaction_removal_touches_nothing() {
    let mut services = services(&[], Arc::new(MockChatPlatform::new()));
    services.roles = Arc::new(NoLookups);

    let bot = MemberSnapshot {
        user_id: UserId(1),
        bot: true,
        roles: vec![THUMBS_ROLE],
    };
    let outcome = handle_reaction_remove(&services, reaction("👍", Some(bot)))
        .await
        .outcome;

    assert_eq!(outcome, ReactionOutcome::SkippedBot);
}

// Add followed by the removal it causes

#[tokio::test]
async fn test_member_at_limit_keeps_role_they_react_for_again() {
    let holder = member(&[THUMBS_ROLE]);
    let platform = Arc::new(FakePlatform::new().with_member(test_guild_id(), holder.clone()));
    let services = services(&[(LIMIT_KEY, "1")], platform.clone());

    let added = handle_reaction_add(&services, reaction("👍", Some(holder))).await;
    added.background.settle().await;

    assert_eq!(
        added.outcome,
        ReactionOutcome::Granted {
            role: THUMBS_ROLE,
            single_use: false
        }
    );
    assert!(platform.reaction_removals().is_empty());
    assert_eq!(
        platform.role_grants(),
        vec![(test_guild_id(), test_user_id(), THUMBS_ROLE)]
    );
}

#[tokio::test]
async fn test_limit_rejection_removal_does_not_revoke_held_roles() {
    let holder = member(&[THUMBS_ROLE]);
    let platform = Arc::new(FakePlatform::new().with_member(test_guild_id(), holder.clone()));
    let services = services(&[(LIMIT_KEY, "1")], platform.clone());

    let added = handle_reaction_add(&services, reaction("<:party:77>", Some(holder))).await;
    added.background.settle().await;
    assert_eq!(added.outcome, ReactionOutcome::RejectedLimit);
    assert_eq!(
        platform.reaction_removals(),
        vec![(ROLE_MESSAGE, test_user_id())]
    );

    let removed = handle_reaction_remove(&services, reaction("<:party:77>", None)).await;
    removed.background.settle().await;

    assert_eq!(removed.outcome, ReactionOutcome::SkippedNotHeld);
    assert!(platform.role_revocations().is_empty());
}

#[tokio::test]
async fn test_single_use_grant_then_removal_keeps_role() {
    let platform = Arc::new(
        FakePlatform::new().with_member(test_guild_id(), member(&[TICKET_ROLE])),
    );
    let services = services(&[(LIMIT_KEY, "1")], platform.clone());

    let added = handle_reaction_add(&services, reaction("🎟️", Some(member(&[])))).await;
    added.background.settle().await;
    assert_eq!(
        platform.reaction_removals(),
        vec![(ROLE_MESSAGE, test_user_id())]
    );

    let removed = handle_reaction_remove(&services, reaction("🎟️", None)).await;
    removed.background.settle().await;

    assert_eq!(removed.outcome, ReactionOutcome::SkippedSingleUse);
    assert_eq!(
        platform.role_grants(),
        vec![(test_guild_id(), test_user_id(), TICKET_ROLE)]
    );
    assert!(platform.role_revocations().is_empty());
}
