//! Common type definitions and newtype wrappers for domain modeling.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Returns the raw snowflake value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

snowflake!(
    /// A Discord guild ID.
    GuildId
);
snowflake!(
    /// A Discord channel ID.
    ChannelId
);
snowflake!(
    /// A Discord message ID.
    MessageId
);
snowflake!(
    /// A Discord user ID.
    UserId
);
snowflake!(
    /// A Discord role ID.
    RoleId
);
snowflake!(
    /// A Discord custom emoji ID.
    EmojiId
);

/// Composite key identifying a reaction role mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReactionRoleKey {
    /// Guild the message lives in.
    pub guild: GuildId,
    /// Channel the message lives in.
    pub channel: ChannelId,
    /// Message carrying the reaction.
    pub message: MessageId,
    /// Normalized emoji id, see [`crate::Emoji::id`].
    pub emoji: String,
}

/// The parts of a guild member the reaction flows care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSnapshot {
    /// The member's user.
    pub user_id: UserId,
    /// Whether the user is a bot account.
    pub bot: bool,
    /// Roles the member currently holds.
    pub roles: Vec<RoleId>,
}

impl MemberSnapshot {
    /// Returns true when the member holds the given role.
    pub fn has_role(&self, role: RoleId) -> bool {
        self.roles.contains(&role)
    }
}

/// A custom emoji uploaded to a guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildEmoji {
    /// Emoji id.
    pub id: EmojiId,
    /// Emoji name without colons.
    pub name: String,
    /// Whether the emoji is animated.
    pub animated: bool,
}

impl fmt::Display for GuildEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.animated { "a" } else { "" };
        write!(f, "<{prefix}:{}:{}>", self.name, self.id)
    }
}
