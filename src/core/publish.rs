//! Posting panels - renders a stored panel with the guild's current settings
//! and sends it to a channel.

use crate::{
    core::{
        guild::{GuildSettings, get_settings},
        panel::{category_ids, get_panel},
        panel_message::record_panel_message,
        render::{CategoryResolution, RenderedPanel, render_panel, resolve_categories},
    },
    entities::{category, panel, panel_message},
    errors::{Error, Result},
    i18n::Locales,
    platform::{ChannelRef, ChatPlatform},
};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

/// A panel rendered against the current guild settings.
#[derive(Debug, Clone)]
pub struct PreparedPanel {
    /// Settings the panel was rendered with
    pub settings: GuildSettings,
    /// Categories that were resolved, in panel order
    pub categories: Vec<category::Model>,
    /// The message content
    pub rendered: RenderedPanel,
}

/// Loads the guild settings and renders `panel`.
///
/// # Errors
/// Fails on database errors, unreadable category lists, and (in strict mode)
/// on category IDs the guild no longer defines.
pub async fn prepare_panel(
    db: &DatabaseConnection,
    platform: &dyn ChatPlatform,
    locales: &Locales,
    panel: &panel::Model,
    mode: CategoryResolution,
) -> Result<PreparedPanel> {
    let settings = get_settings(db, &panel.guild_id).await?;
    let categories = resolve_categories(&category_ids(panel)?, &settings, mode)?;
    let icon_url = platform.guild_icon_url(&panel.guild_id);
    let rendered = render_panel(
        panel,
        &categories,
        &settings,
        &locales.get_locale(&settings.locale),
        icon_url.as_deref(),
    )?;
    Ok(PreparedPanel {
        settings,
        categories,
        rendered,
    })
}

/// Sends a rendered panel to `channel` and records the posted message.
///
/// Nothing is stored when the platform refuses the message.
pub async fn post_panel(
    db: &DatabaseConnection,
    platform: &dyn ChatPlatform,
    panel: &panel::Model,
    channel: &ChannelRef,
    rendered: &RenderedPanel,
) -> Result<panel_message::Model> {
    let message = platform.send_panel(channel, rendered).await?;
    let record = record_panel_message(db, panel.id, &message.channel_id, &message.id).await?;
    info!(
        "Posted panel {} ({}) as message {} in channel {}",
        panel.id, panel.name, message.id, message.channel_id
    );
    Ok(record)
}

/// Result of publishing a panel by ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The guild has no panel with that ID
    NotFound,
    /// None of the panel's categories could be shown
    NoCategories,
    /// The platform refused the message; nothing was recorded
    SendFailed(String),
    /// Posted and recorded
    Sent(panel_message::Model),
}

/// Looks up a panel in a guild, renders it and posts it to `channel`.
///
/// # Errors
/// Database errors, and with [`CategoryResolution::Strict`] a category ID the
/// guild no longer defines. A refused send is an outcome, not an error.
pub async fn publish_panel(
    db: &DatabaseConnection,
    platform: &dyn ChatPlatform,
    locales: &Locales,
    guild_id: &str,
    panel_id: i64,
    channel: &ChannelRef,
    mode: CategoryResolution,
) -> Result<PublishOutcome> {
    let Some(panel) = get_panel(db, guild_id, panel_id).await? else {
        return Ok(PublishOutcome::NotFound);
    };
    let prepared = prepare_panel(db, platform, locales, &panel, mode).await?;
    if prepared.categories.is_empty() {
        return Ok(PublishOutcome::NoCategories);
    }
    match post_panel(db, platform, &panel, channel, &prepared.rendered).await {
        Ok(record) => Ok(PublishOutcome::Sent(record)),
        Err(Error::Platform { message }) => {
            warn!("Failed to send panel {} to channel {}: {message}", panel.id, channel.id);
            Ok(PublishOutcome::SendFailed(message))
        }
        Err(e) => Err(e),
    }
}
