//! Reaction role mapping lookups.

use rolecall_common::{Emoji, MessageId, ReactionRoleKey, RoleId};
use rolecall_config::{ConfigCache, ReactionRoleConfig};
use std::sync::Arc;

/// Lookups over the configured reaction role mappings.
pub trait RoleDirectory: Send + Sync {
    /// The role mapped to a (guild, channel, message, emoji) reaction.
    fn role_for(&self, key: &ReactionRoleKey) -> Option<RoleId>;

    /// True when granting `role` through `message` removes the reaction again.
    fn is_single_use(&self, message: MessageId, role: RoleId) -> bool;

    /// True when `role` is handed out by any reaction role mapping.
    fn is_managed(&self, role: RoleId) -> bool;
}

/// Role directory backed by the live configuration snapshot.
#[derive(Debug, Clone)]
pub struct ConfigRoleDirectory {
    cache: Arc<ConfigCache>,
}

impl ConfigRoleDirectory {
    /// Creates a directory backed by `cache`.
    pub const fn new(cache: Arc<ConfigCache>) -> Self {
        Self { cache }
    }

    fn any_mapping(&self, predicate: impl Fn(&ReactionRoleConfig) -> bool) -> bool {
        self.cache
            .get()
            .guilds
            .iter()
            .flat_map(|guild| guild.reaction_roles.iter())
            .any(predicate)
    }
}

impl RoleDirectory for ConfigRoleDirectory {
    fn role_for(&self, key: &ReactionRoleKey) -> Option<RoleId> {
        let config = self.cache.get();
        config
            .guild(key.guild)?
            .reaction_roles
            .iter()
            .find(|mapping| {
                mapping.channel == key.channel
                    && mapping.message == key.message
                    && Emoji::new(&mapping.emoji).id() == key.emoji
            })
            .map(|mapping| mapping.role)
    }

    fn is_single_use(&self, message: MessageId, role: RoleId) -> bool {
        self.any_mapping(|mapping| {
            mapping.single_use && mapping.message == message && mapping.role == role
        })
    }

    fn is_managed(&self, role: RoleId) -> bool {
        self.any_mapping(|mapping| mapping.role == role)
    }
}
