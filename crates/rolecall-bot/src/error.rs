//! Application-wide error types using thiserror.

use poise::serenity_prelude as serenity;
use rolecall_config::ConfigError;
use rolecall_i18n::I18nError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// Localization resources failed to load.
    #[error("Localization error: {0}")]
    Localization(#[from] I18nError),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
