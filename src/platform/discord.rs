//! Discord implementation of [`ChatPlatform`] on top of serenity's HTTP client.

use super::{ChannelRef, ChatPlatform, MessageRef, PlatformError};
use crate::core::render::{ButtonStyle, PanelComponents, PanelEmbed, PanelEmoji, RenderedPanel};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::debug;

/// Discord allows at most five buttons in one action row.
const BUTTONS_PER_ROW: usize = 5;

/// Serenity HTTP client and cache, shared with the running bot.
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<serenity::Http>,
    cache: Arc<serenity::Cache>,
}

impl SerenityPlatform {
    /// Wraps an existing HTTP client and cache.
    #[must_use]
    pub const fn new(http: Arc<serenity::Http>, cache: Arc<serenity::Cache>) -> Self {
        Self { http, cache }
    }

    /// Borrows the client and cache of a running bot.
    #[must_use]
    pub fn from_context(ctx: &serenity::Context) -> Self {
        Self::new(Arc::clone(&ctx.http), Arc::clone(&ctx.cache))
    }
}

fn snowflake(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().filter(|id| *id != 0)
}

fn platform_error(err: &serenity::Error) -> PlatformError {
    PlatformError(err.to_string())
}

fn reaction(emoji: &PanelEmoji) -> Option<serenity::ReactionType> {
    match emoji {
        PanelEmoji::Unicode(text) => Some(serenity::ReactionType::Unicode(text.clone())),
        PanelEmoji::Custom(id) => snowflake(id).map(|id| serenity::ReactionType::Custom {
            animated: false,
            id: serenity::EmojiId::new(id),
            name: None,
        }),
    }
}

/// Converts a rendered embed into a serenity builder.
#[must_use]
pub fn create_embed(embed: &PanelEmbed) -> serenity::CreateEmbed {
    let mut builder = serenity::CreateEmbed::new().colour(embed.colour);
    if let Some(footer) = &embed.footer {
        let mut create_footer = serenity::CreateEmbedFooter::new(&footer.text);
        if let Some(icon_url) = &footer.icon_url {
            create_footer = create_footer.icon_url(icon_url);
        }
        builder = builder.footer(create_footer);
    }
    if let Some(title) = &embed.title {
        builder = builder.title(title);
    }
    if let Some(description) = &embed.description {
        builder = builder.description(description);
    }
    if let Some(image) = &embed.image {
        builder = builder.image(image);
    }
    if let Some(thumbnail) = &embed.thumbnail {
        builder = builder.thumbnail(thumbnail);
    }
    builder
}

/// Converts rendered controls into action rows; empty for message-only panels.
#[must_use]
pub fn create_action_rows(components: Option<&PanelComponents>) -> Vec<serenity::CreateActionRow> {
    match components {
        None => Vec::new(),
        Some(PanelComponents::Buttons(buttons)) => buttons
            .chunks(BUTTONS_PER_ROW)
            .map(|row| {
                serenity::CreateActionRow::Buttons(
                    row.iter()
                        .map(|button| {
                            let mut builder = serenity::CreateButton::new(&button.custom_id)
                                .style(match button.style {
                                    ButtonStyle::Primary => serenity::ButtonStyle::Primary,
                                    ButtonStyle::Secondary => serenity::ButtonStyle::Secondary,
                                })
                                .label(&button.label);
                            if let Some(emoji) = button.emoji.as_ref().and_then(reaction) {
                                builder = builder.emoji(emoji);
                            }
                            builder
                        })
                        .collect(),
                )
            })
            .collect(),
        Some(PanelComponents::Menu {
            custom_id,
            placeholder,
            options,
        }) => {
            let options = options
                .iter()
                .map(|option| {
                    let mut builder =
                        serenity::CreateSelectMenuOption::new(&option.label, &option.value);
                    if !option.description.is_empty() {
                        builder = builder.description(&option.description);
                    }
                    if let Some(emoji) = option.emoji.as_ref().and_then(reaction) {
                        builder = builder.emoji(emoji);
                    }
                    builder
                })
                .collect();
            let menu = serenity::CreateSelectMenu::new(
                custom_id,
                serenity::CreateSelectMenuKind::String { options },
            )
            .placeholder(placeholder);
            vec![serenity::CreateActionRow::SelectMenu(menu)]
        }
    }
}

#[async_trait]
impl ChatPlatform for SerenityPlatform {
    async fn fetch_channel(&self, channel_id: &str) -> Option<ChannelRef> {
        let id = serenity::ChannelId::new(snowflake(channel_id)?);
        match self.http.get_channel(id).await {
            Ok(channel) => Some(ChannelRef {
                id: channel.id().to_string(),
            }),
            Err(e) => {
                debug!("Channel {channel_id} unavailable: {e}");
                None
            }
        }
    }

    async fn fetch_message(&self, channel: &ChannelRef, message_id: &str) -> Option<MessageRef> {
        let channel_id = serenity::ChannelId::new(snowflake(&channel.id)?);
        let id = serenity::MessageId::new(snowflake(message_id)?);
        match self.http.get_message(channel_id, id).await {
            Ok(message) => Some(MessageRef {
                channel_id: channel.id.clone(),
                id: message.id.to_string(),
            }),
            Err(e) => {
                debug!("Message {message_id} in {} unavailable: {e}", channel.id);
                None
            }
        }
    }

    async fn send_panel(
        &self,
        channel: &ChannelRef,
        panel: &RenderedPanel,
    ) -> Result<MessageRef, PlatformError> {
        let channel_id = snowflake(&channel.id)
            .map(serenity::ChannelId::new)
            .ok_or_else(|| PlatformError(format!("Invalid channel ID: {}", channel.id)))?;

        let mut builder = serenity::CreateMessage::new().embed(create_embed(&panel.embed));
        if panel.components.is_some() {
            builder = builder.components(create_action_rows(panel.components.as_ref()));
        }

        let message = channel_id
            .send_message(&*self.http, builder)
            .await
            .map_err(|e| platform_error(&e))?;
        Ok(MessageRef {
            channel_id: channel.id.clone(),
            id: message.id.to_string(),
        })
    }

    async fn edit_panel(
        &self,
        message: &MessageRef,
        panel: &RenderedPanel,
    ) -> Result<(), PlatformError> {
        let (Some(channel_id), Some(message_id)) =
            (snowflake(&message.channel_id), snowflake(&message.id))
        else {
            return Err(PlatformError(format!("Invalid message ID: {}", message.id)));
        };

        // Always send the component list so stale controls are removed
        let builder = serenity::EditMessage::new()
            .embed(create_embed(&panel.embed))
            .components(create_action_rows(panel.components.as_ref()));

        serenity::ChannelId::new(channel_id)
            .edit_message(&*self.http, serenity::MessageId::new(message_id), builder)
            .await
            .map(|_| ())
            .map_err(|e| platform_error(&e))
    }

    async fn delete_message(&self, message: &MessageRef) -> Result<(), PlatformError> {
        let (Some(channel_id), Some(message_id)) =
            (snowflake(&message.channel_id), snowflake(&message.id))
        else {
            return Err(PlatformError(format!("Invalid message ID: {}", message.id)));
        };

        serenity::ChannelId::new(channel_id)
            .delete_message(&*self.http, serenity::MessageId::new(message_id))
            .await
            .map_err(|e| platform_error(&e))
    }

    fn guild_icon_url(&self, guild_id: &str) -> Option<String> {
        let guild_id = serenity::GuildId::new(snowflake(guild_id)?);
        guild_id
            .to_guild_cached(&self.cache)
            .and_then(|guild| guild.icon_url())
    }
}
