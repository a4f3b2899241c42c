//! Emoji identity derived from the platform's raw emoji representation.

use crate::types::EmojiId;
use std::fmt;
use std::hash::{Hash, Hasher};
use unicode_normalization::UnicodeNormalization;

const VARIATION_SELECTOR_16: char = '\u{FE0F}';

/// A reaction emoji, either a unicode emoji or a custom guild emoji.
///
/// Two emoji are equal when their normalized [`id`](Self::id) is equal, so
/// `"❤️"` and `"❤"` compare equal and `<:heart:1>` equals `<a:heart2:1>`.
#[derive(Debug, Clone)]
pub struct Emoji {
    raw: String,
    id: String,
    custom: Option<EmojiId>,
}

impl Emoji {
    /// Builds an emoji from its raw form: `<:name:id>`, `<a:name:id>` or a
    /// unicode string.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();

        if let Some(custom) = parse_custom(trimmed) {
            return Self {
                id: custom.to_string(),
                raw,
                custom: Some(custom),
            };
        }

        let id = trimmed
            .nfc()
            .filter(|c| *c != VARIATION_SELECTOR_16)
            .collect();

        Self {
            raw,
            id,
            custom: None,
        }
    }

    /// The normalized lookup key.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The representation the emoji was built from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The custom emoji id, if this is a guild emoji.
    pub const fn custom_id(&self) -> Option<EmojiId> {
        self.custom
    }

    /// True when the emoji carries no content after normalization.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

fn parse_custom(raw: &str) -> Option<EmojiId> {
    let inner = raw.strip_prefix('<')?.strip_suffix('>')?;
    let mut parts = inner.split(':');
    let marker = parts.next()?;
    let _name = parts.next()?;
    let id = parts.next()?;

    if parts.next().is_some() || !(marker.is_empty() || marker == "a") {
        return None;
    }

    id.parse::<u64>().ok().map(EmojiId)
}

impl PartialEq for Emoji {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Emoji {}

impl Hash for Emoji {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Emoji {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_custom_emoji_uses_numeric_id() {
        let emoji = Emoji::new("<:party:123456789>");
        assert_eq!(emoji.id(), "123456789");
        assert_eq!(emoji.custom_id(), Some(EmojiId(123_456_789)));
        assert_eq!(emoji.raw(), "<:party:123456789>");
    }

    #[test]
    fn test_animated_emoji_matches_static_with_same_id() {
        assert_eq!(Emoji::new("<a:dance:42>"), Emoji::new("<:renamed:42>"));
    }

    #[test]
    fn test_unicode_variation_selector_is_ignored() {
        let with_selector = Emoji::new("\u{2764}\u{FE0F}");
        let without = Emoji::new("\u{2764}");
        assert_eq!(with_selector, without);
        assert_eq!(without.id(), "\u{2764}");
        assert!(without.custom_id().is_none());
    }

    #[test]
    fn test_unicode_is_nfc_normalized() {
        // "e" + combining acute accent versus precomposed "é"
        assert_eq!(Emoji::new("e\u{301}"), Emoji::new("\u{e9}"));
    }

    #[test]
    fn test_malformed_custom_falls_back_to_unicode() {
        let emoji = Emoji::new("<:broken:notanumber>");
        assert!(emoji.custom_id().is_none());
        assert_eq!(emoji.id(), "<:broken:notanumber>");

        let emoji = Emoji::new("<b:name:1>");
        assert!(emoji.custom_id().is_none());
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(Emoji::new(" 👍 ").id(), "👍");
        assert!(Emoji::new("   ").is_empty());
    }

    proptest! {
        #[test]
        fn test_custom_identity_ignores_name(name in "[a-zA-Z0-9_]{2,32}", id in 1u64..u64::MAX, animated in any::<bool>()) {
            let prefix = if animated { "a" } else { "" };
            let emoji = Emoji::new(format!("<{prefix}:{name}:{id}>"));
            prop_assert_eq!(emoji.id(), id.to_string());
        }
    }
}
