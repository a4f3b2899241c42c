//! Fluent bundle loading from resources embedded at compile time.

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use thiserror::Error;
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Locale every lookup falls back to.
pub const FALLBACK_LOCALE: &str = "en-US";

/// Fluent sources shipped with the binary, keyed by locale.
const RESOURCES: &[(&str, &str)] = &[("en-US", include_str!("../locales/en-US/main.ftl"))];

/// Errors raised while building a bundle.
#[derive(Debug, Error)]
pub enum I18nError {
    /// The embedded Fluent source does not parse.
    #[error("failed to parse Fluent resource for {locale}: {details}")]
    Parse {
        /// Locale of the resource.
        locale: String,
        /// Parser diagnostics.
        details: String,
    },

    /// The resource defines a message twice or otherwise cannot be added.
    #[error("failed to add Fluent resource for {locale}: {details}")]
    Bundle {
        /// Locale of the resource.
        locale: String,
        /// Bundle diagnostics.
        details: String,
    },
}

/// Fluent bundle loader.
pub struct FluentLoader;

impl FluentLoader {
    /// Locales with an embedded resource.
    pub fn available_locales() -> impl Iterator<Item = &'static str> {
        RESOURCES.iter().map(|(locale, _)| *locale)
    }

    /// Builds the bundle for `requested`, falling back to [`FALLBACK_LOCALE`]
    /// when the locale is malformed or not shipped.
    pub fn load_bundle(
        requested: &str,
    ) -> Result<(LanguageIdentifier, FluentBundle<FluentResource>), I18nError> {
        let (locale, source) = match RESOURCES
            .iter()
            .find(|(locale, _)| locale.eq_ignore_ascii_case(requested))
        {
            Some(&(locale, source)) => (locale, source),
            None => {
                warn!(
                    requested,
                    fallback = FALLBACK_LOCALE,
                    "Locale not available, falling back"
                );
                (FALLBACK_LOCALE, Self::fallback_source())
            }
        };

        let langid = locale
            .parse::<LanguageIdentifier>()
            .map_err(|e| I18nError::Parse {
                locale: locale.to_string(),
                details: e.to_string(),
            })?;

        let resource =
            FluentResource::try_new(source.to_string()).map_err(|(_, errors)| I18nError::Parse {
                locale: locale.to_string(),
                details: format!("{errors:?}"),
            })?;

        let mut bundle = FluentBundle::new_concurrent(vec![langid.clone()]);
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| I18nError::Bundle {
                locale: locale.to_string(),
                details: format!("{errors:?}"),
            })?;

        Ok((langid, bundle))
    }

    fn fallback_source() -> &'static str {
        RESOURCES
            .iter()
            .find(|(locale, _)| *locale == FALLBACK_LOCALE)
            .map_or("", |(_, source)| *source)
    }
}
