//! Core bot logic using the Poise framework.

use crate::error::BotResult;
use crate::platform::SerenityPlatform;
use poise::serenity_prelude as serenity;
use rolecall_commands::{create_framework, Data, Services};
use rolecall_common::ChatPlatform;
use rolecall_config::{Config, ConfigCache};
use std::sync::Arc;
use tracing::{error, info};

/// Main bot structure.
pub struct RolecallBot {
    config: Arc<ConfigCache>,
}

impl RolecallBot {
    /// Creates a new bot instance.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(ConfigCache::new(config)),
        }
    }

    /// Gateway intents the handlers need.
    pub fn intents() -> serenity::GatewayIntents {
        serenity::GatewayIntents::GUILDS
            | serenity::GatewayIntents::GUILD_MESSAGES
            | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS
            | serenity::GatewayIntents::MESSAGE_CONTENT
    }

    /// Starts the bot and runs until the gateway closes or Ctrl-C is received.
    pub async fn start(&self) -> BotResult<()> {
        let config = self.config.get();

        let http = Arc::new(serenity::Http::new(&config.discord.token));
        let platform: Arc<dyn ChatPlatform> = Arc::new(SerenityPlatform::new(http));
        let services = Services::from_config(&self.config, platform)?;
        info!(locale = %services.messages.locale(), "Services initialized");

        let cache = self.config.clone();
        let framework = create_framework(config.discord.prefix.clone())
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!(user = %ready.user.name, guilds = ready.guilds.len(), "Bot connected");
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!("Slash commands registered globally");
                    Ok(Data {
                        config: cache,
                        services,
                    })
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(&config.discord.token, Self::intents())
            .framework(framework)
            .await?;

        let shard_manager = client.shard_manager.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
                return;
            }
            info!("Received shutdown signal, starting graceful shutdown");
            shard_manager.shutdown_all().await;
        });

        client.start().await?;
        Ok(())
    }
}

impl std::fmt::Debug for RolecallBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RolecallBot").finish_non_exhaustive()
    }
}
