//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the panel bot: the slash
//! commands, autocomplete handlers, and the poise framework setup.

/// Discord command implementations (panel, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{cache::PanelCache, errors::Error, i18n::Locales};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info};

/// Shared data available to all bot commands.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Panel summaries used by autocomplete, shared with the admin API
    pub cache: Arc<PanelCache>,
    /// Locale bundles for replies and rendered panels
    pub locales: Arc<Locales>,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(
        database: DatabaseConnection,
        cache: Arc<PanelCache>,
        locales: Arc<Locales>,
    ) -> Self {
        Self {
            database,
            cache,
            locales,
        }
    }
}

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error:?}", ctx.command().name);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Builds the poise framework with every command registered globally on
/// startup.
#[must_use]
pub fn build_framework(data: BotData) -> poise::Framework<BotData, Error> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::panel(), commands::ping()],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build()
}

/// Gateway intents the bot needs; panels only require guild and channel data.
#[must_use]
pub fn intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::GUILDS
}

pub use commands::*;
pub use handlers::*;
