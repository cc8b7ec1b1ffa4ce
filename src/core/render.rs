//! Panel rendering - turns a stored panel into a postable message.
//!
//! Everything here is pure: the caller resolves the guild settings, locale and
//! icon URL, and the platform layer converts the result into Discord builders.

use crate::{
    core::guild::GuildSettings,
    entities::{PanelType, category, panel},
    errors::{Error, Result},
    i18n::Messages,
};
use serde::{Deserialize, Serialize};

/// Action name carried by every panel control.
pub const CREATE_ACTION: &str = "create";

/// Payload stored in a control's custom ID and read back by the interaction
/// handler when a user clicks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelAction {
    /// What the control does
    pub action: String,
    /// Category the ticket is opened in; absent for select menus, where the
    /// chosen option carries it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
}

impl PanelAction {
    /// A "create ticket" action, optionally bound to one category.
    #[must_use]
    pub fn create(target: Option<i64>) -> Self {
        Self {
            action: CREATE_ACTION.to_string(),
            target,
        }
    }

    /// Serializes the action as a custom ID.
    pub fn custom_id(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }
}

/// An emoji attached to a button or select option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEmoji {
    /// A standard emoji character
    Unicode(String),
    /// A guild emoji, by ID
    Custom(String),
}

/// Resolves a stored emoji: a unicode emoji or a known shortcode becomes
/// [`PanelEmoji::Unicode`], anything else is taken as a custom emoji ID.
#[must_use]
pub fn resolve_emoji(raw: &str) -> Option<PanelEmoji> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(emoji) = emojis::get(raw) {
        return Some(PanelEmoji::Unicode(emoji.as_str().to_string()));
    }
    if let Some(emoji) = emojis::get_by_shortcode(raw.trim_matches(':')) {
        return Some(PanelEmoji::Unicode(emoji.as_str().to_string()));
    }
    Some(PanelEmoji::Custom(raw.to_string()))
}

/// Footer line of a panel embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: Option<String>,
}

/// The embed part of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEmbed {
    pub colour: u32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub footer: Option<EmbedFooter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelButton {
    pub custom_id: String,
    pub style: ButtonStyle,
    pub label: String,
    pub emoji: Option<PanelEmoji>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub description: String,
    pub emoji: Option<PanelEmoji>,
}

/// The single row of interactive controls under a panel embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelComponents {
    /// One or more buttons
    Buttons(Vec<PanelButton>),
    /// One select menu
    Menu {
        custom_id: String,
        placeholder: String,
        options: Vec<SelectOption>,
    },
}

/// A panel ready to be posted or edited in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPanel {
    pub embed: PanelEmbed,
    /// `None` for [`PanelType::Message`]
    pub components: Option<PanelComponents>,
}

/// How to treat category IDs that the guild no longer defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryResolution {
    /// Any unknown ID is an error
    Strict,
    /// Unknown IDs are dropped
    Lenient,
}

/// Maps category IDs onto the guild's categories, preserving order.
///
/// # Errors
/// In [`CategoryResolution::Strict`] mode, returns `InvalidCategory` for the
/// first ID the guild does not define.
pub fn resolve_categories(
    ids: &[i64],
    settings: &GuildSettings,
    mode: CategoryResolution,
) -> Result<Vec<category::Model>> {
    let mut categories = Vec::with_capacity(ids.len());
    for &id in ids {
        match (settings.category(id), mode) {
            (Some(category), _) => categories.push(category.clone()),
            (None, CategoryResolution::Strict) => return Err(Error::InvalidCategory { id }),
            (None, CategoryResolution::Lenient) => {}
        }
    }
    Ok(categories)
}

/// Builds the embed shared by every panel type.
#[must_use]
pub fn build_embed(
    panel: &panel::Model,
    settings: &GuildSettings,
    guild_icon_url: Option<&str>,
) -> PanelEmbed {
    PanelEmbed {
        colour: settings.primary_colour,
        title: panel.title.clone(),
        description: panel.description.clone(),
        image: panel.image.clone(),
        thumbnail: panel.thumbnail.clone(),
        footer: settings.footer.as_ref().map(|text| EmbedFooter {
            text: text.clone(),
            icon_url: guild_icon_url.map(str::to_string),
        }),
    }
}

/// Builds the controls for a panel, or `None` for message-only panels.
///
/// A panel without any category also gets no controls, since Discord rejects
/// an empty action row.
pub fn build_components(
    panel: &panel::Model,
    categories: &[category::Model],
    messages: &Messages<'_>,
) -> Result<Option<PanelComponents>> {
    if panel.panel_type == PanelType::Message || categories.is_empty() {
        return Ok(None);
    }

    if let [category] = categories {
        return Ok(Some(PanelComponents::Buttons(vec![PanelButton {
            custom_id: PanelAction::create(Some(category.id)).custom_id()?,
            style: ButtonStyle::Primary,
            label: messages.get("buttons.create.text"),
            emoji: resolve_emoji(&messages.get("buttons.create.emoji")),
        }])));
    }

    let components = match panel.panel_type {
        PanelType::Button => PanelComponents::Buttons(
            categories
                .iter()
                .map(|category| {
                    Ok(PanelButton {
                        custom_id: PanelAction::create(Some(category.id)).custom_id()?,
                        style: ButtonStyle::Secondary,
                        label: category.name.clone(),
                        emoji: resolve_emoji(&category.emoji),
                    })
                })
                .collect::<Result<_>>()?,
        ),
        _ => PanelComponents::Menu {
            custom_id: PanelAction::create(None).custom_id()?,
            placeholder: messages.get("menus.category.placeholder"),
            options: categories
                .iter()
                .map(|category| SelectOption {
                    value: category.id.to_string(),
                    label: category.name.clone(),
                    description: category.description.clone(),
                    emoji: resolve_emoji(&category.emoji),
                })
                .collect(),
        },
    };
    Ok(Some(components))
}

/// Renders a panel: embed plus controls.
pub fn render_panel(
    panel: &panel::Model,
    categories: &[category::Model],
    settings: &GuildSettings,
    messages: &Messages<'_>,
    guild_icon_url: Option<&str>,
) -> Result<RenderedPanel> {
    Ok(RenderedPanel {
        embed: build_embed(panel, settings, guild_icon_url),
        components: build_components(panel, categories, messages)?,
    })
}
