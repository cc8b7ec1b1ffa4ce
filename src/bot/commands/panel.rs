//! The `/panel` command - posts a ticket panel to a channel.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            guild::get_settings,
            publish::{PublishOutcome, publish_panel},
            render::CategoryResolution,
        },
        errors::{Error, Result},
        i18n::Messages,
        platform::{ChannelRef, SerenityPlatform},
    };
    use poise::serenity_prelude as serenity;

    async fn reply(
        ctx: poise::Context<'_, BotData, Error>,
        messages: &Messages<'_>,
        key: &str,
        colour: u32,
        args: &[(&str, &str)],
    ) -> Result<()> {
        let embed = serenity::CreateEmbed::default()
            .colour(colour)
            .title(messages.get(&format!("{key}.title")))
            .description(messages.get_with(&format!("{key}.description"), args));
        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Sends a panel to a channel.
    ///
    /// Posts the panel to `channel`, or to the current channel when omitted,
    /// and remembers the message so later edits to the panel reach it.
    #[poise::command(
        slash_command,
        guild_only,
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn panel(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The panel to send"]
        #[autocomplete = "autocomplete::autocomplete_panel"]
        panel: i64,
        #[description = "The channel to send the panel to"] channel: Option<
            serenity::GuildChannel,
        >,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;

        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };
        let guild_id = guild_id.to_string();
        let data = ctx.data();
        let db = &data.database;

        let settings = get_settings(db, &guild_id).await?;
        let messages = data.locales.get_locale(&settings.locale);

        let target = ChannelRef {
            id: channel
                .map_or_else(|| ctx.channel_id(), |channel| channel.id)
                .to_string(),
        };
        let platform = SerenityPlatform::from_context(ctx.serenity_context());
        let outcome = publish_panel(
            db,
            &platform,
            &data.locales,
            &guild_id,
            panel,
            &target,
            CategoryResolution::Strict,
        )
        .await?;

        let (key, colour) = match outcome {
            PublishOutcome::NotFound => ("commands.slash.panel.not_found", settings.error_colour),
            PublishOutcome::NoCategories => {
                ("commands.slash.panel.no_categories", settings.error_colour)
            }
            PublishOutcome::SendFailed(_) => {
                ("commands.slash.panel.send_error", settings.error_colour)
            }
            PublishOutcome::Sent(_) => ("commands.slash.panel.success", settings.success_colour),
        };
        let mention = format!("<#{}>", target.id);
        reply(ctx, &messages, key, colour, &[("channel", mention.as_str())]).await
    }
}

// Re-export all commands
pub use inner::*;
