//! Poise framework setup and the services shared by every handler.

use rolecall_common::ChatPlatform;
use rolecall_config::ConfigCache;
use rolecall_i18n::{I18nError, Messages};
use rolecall_managers::{
    ConfigGuildSettings, ConfigRoleDirectory, EmojiDirectory, GuildEmojiDirectory, GuildSettings,
    RoleDirectory,
};
use std::sync::Arc;
use tracing::error;

/// Collaborators the command and reaction flows run against.
#[derive(Clone)]
pub struct Services {
    /// Chat platform commands are issued through.
    pub platform: Arc<dyn ChatPlatform>,
    /// Per-guild settings.
    pub settings: Arc<dyn GuildSettings>,
    /// Reaction role mappings.
    pub roles: Arc<dyn RoleDirectory>,
    /// Emoji list channel and roster.
    pub emojis: Arc<dyn EmojiDirectory>,
    /// Localized replies.
    pub messages: Arc<Messages>,
}

impl Services {
    /// Wires the configuration-backed managers around `platform`.
    pub fn from_config(
        config: &Arc<ConfigCache>,
        platform: Arc<dyn ChatPlatform>,
    ) -> Result<Self, I18nError> {
        let messages = Messages::new(&config.get().locale)?;
        let settings: Arc<dyn GuildSettings> = Arc::new(ConfigGuildSettings::new(config.clone()));

        Ok(Self {
            emojis: Arc::new(GuildEmojiDirectory::new(settings.clone(), platform.clone())),
            roles: Arc::new(ConfigRoleDirectory::new(config.clone())),
            settings,
            platform,
            messages: Arc::new(messages),
        })
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

/// Application data accessible in all commands.
#[derive(Debug)]
pub struct Data {
    /// Live configuration snapshot.
    pub config: Arc<ConfigCache>,
    /// Handler collaborators.
    pub services: Services,
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Creates a new Poise framework listening on `prefix` and bot mentions.
pub fn create_framework(prefix: String) -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(poise::FrameworkOptions {
        commands: vec![crate::emoji_list::emoji_list()],
        on_error: |error| Box::pin(on_error(error)),
        event_handler: |ctx, event, framework, data| {
            Box::pin(crate::events::event_handler(ctx, event, framework, data))
        },
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(prefix),
            mention_as_prefix: true,
            ..Default::default()
        },
        ..Default::default()
    })
}

/// Global error handler for the framework.
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!(error = %error, "Failed to start bot");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().name, error = %error, "Error in command");
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!(event = event.snake_case_name(), error = %error, "Error in event handler");
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!(error = %e, "Error while handling error");
            }
        }
    }
}
