//! Typed access to localized reply messages.

use crate::loader::{FluentLoader, I18nError};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Every message the bot can send to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// The guild never configured an emoji list channel.
    EmojiListNotConfigured,
    /// The configured emoji list channel cannot be used.
    EmojiListInvalid,
    /// Posting the emoji list failed.
    EmojiListPostFailed,
    /// The emoji list was regenerated.
    EmojiListPosted,
    /// Placeholder posted when a guild has no custom emojis.
    EmojiListEmpty,
}

impl MessageKey {
    /// All keys, for completeness checks.
    pub const ALL: [Self; 5] = [
        Self::EmojiListNotConfigured,
        Self::EmojiListInvalid,
        Self::EmojiListPostFailed,
        Self::EmojiListPosted,
        Self::EmojiListEmpty,
    ];

    /// The Fluent message id.
    pub const fn id(self) -> &'static str {
        match self {
            Self::EmojiListNotConfigured => "emoji-list-not-configured",
            Self::EmojiListInvalid => "emoji-list-invalid",
            Self::EmojiListPostFailed => "emoji-list-post-failed",
            Self::EmojiListPosted => "emoji-list-posted",
            Self::EmojiListEmpty => "emoji-list-empty",
        }
    }
}

/// Localized message lookup for one locale.
pub struct Messages {
    locale: LanguageIdentifier,
    bundle: FluentBundle<FluentResource>,
}

impl Messages {
    /// Loads the messages of `locale`, falling back to `en-US`.
    pub fn new(locale: &str) -> Result<Self, I18nError> {
        let (locale, bundle) = FluentLoader::load_bundle(locale)?;
        Ok(Self { locale, bundle })
    }

    /// The locale actually in use.
    pub const fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Gets a localized message. Unknown or broken messages render as their id.
    pub fn get(&self, key: MessageKey) -> String {
        let Some(pattern) = self
            .bundle
            .get_message(key.id())
            .and_then(|message| message.value())
        else {
            warn!(key = key.id(), locale = %self.locale, "Missing localized message");
            return key.id().to_string();
        };

        let mut errors = Vec::new();
        let value = self.bundle.format_pattern(pattern, None, &mut errors);
        if !errors.is_empty() {
            warn!(key = key.id(), ?errors, "Errors while formatting message");
        }
        value.into_owned()
    }
}

impl std::fmt::Debug for Messages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Messages")
            .field("locale", &self.locale.to_string())
            .finish_non_exhaustive()
    }
}
