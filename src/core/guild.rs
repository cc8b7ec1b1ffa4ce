//! Guild settings - read access to the colours, footer, locale and categories
//! that panels are rendered with.

use crate::{
    entities::{Category, Guild, category},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};

/// Default embed colour for panels.
pub const DEFAULT_PRIMARY_COLOUR: u32 = 0x0000_9999;
/// Default embed colour for failure replies.
pub const DEFAULT_ERROR_COLOUR: u32 = 0x00EF_4444;
/// Default embed colour for success replies.
pub const DEFAULT_SUCCESS_COLOUR: u32 = 0x0022_C55E;
/// Locale used when a guild has no settings row.
pub const DEFAULT_LOCALE: &str = "en-GB";

/// Settings of one guild, with its full category list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSettings {
    /// Discord guild ID
    pub guild_id: String,
    /// Locale for replies and panel labels
    pub locale: String,
    /// Panel embed colour
    pub primary_colour: u32,
    /// Failure reply colour
    pub error_colour: u32,
    /// Success reply colour
    pub success_colour: u32,
    /// Footer text for panel embeds
    pub footer: Option<String>,
    /// Every category the guild defines, ordered by ID
    pub categories: Vec<category::Model>,
}

impl GuildSettings {
    /// Settings used for a guild that has never been configured.
    #[must_use]
    pub fn defaults(guild_id: &str) -> Self {
        Self {
            guild_id: guild_id.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            primary_colour: DEFAULT_PRIMARY_COLOUR,
            error_colour: DEFAULT_ERROR_COLOUR,
            success_colour: DEFAULT_SUCCESS_COLOUR,
            footer: None,
            categories: Vec::new(),
        }
    }

    /// Looks up a category of this guild by ID.
    #[must_use]
    pub fn category(&self, id: i64) -> Option<&category::Model> {
        self.categories.iter().find(|c| c.id == id)
    }
}

fn colour(value: i64, field: &str) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|c| *c <= 0x00FF_FFFF)
        .ok_or_else(|| Error::Config {
            message: format!("Invalid {field}: {value}"),
        })
}

/// Loads a guild's settings, falling back to defaults when the guild has no row.
///
/// # Errors
/// Returns an error if the database query fails or a stored colour is out of range.
pub async fn get_settings(db: &DatabaseConnection, guild_id: &str) -> Result<GuildSettings> {
    let categories = Category::find()
        .filter(category::Column::GuildId.eq(guild_id))
        .order_by_asc(category::Column::Id)
        .all(db)
        .await?;

    let Some(guild) = Guild::find_by_id(guild_id.to_string()).one(db).await? else {
        return Ok(GuildSettings {
            categories,
            ..GuildSettings::defaults(guild_id)
        });
    };

    Ok(GuildSettings {
        guild_id: guild.id,
        locale: guild.locale,
        primary_colour: colour(guild.primary_colour, "primary colour")?,
        error_colour: colour(guild.error_colour, "error colour")?,
        success_colour: colour(guild.success_colour, "success colour")?,
        footer: guild.footer.filter(|f| !f.is_empty()),
        categories,
    })
}
