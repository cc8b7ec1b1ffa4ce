//! Panel business logic - Handles all panel store operations.
//!
//! Every operation is scoped to the guild that owns the panel: a panel of
//! another guild behaves exactly like a panel that does not exist. Category
//! IDs are stored as JSON text and must go through [`category_ids`] before use.

use crate::{
    entities::{Panel, PanelMessage, PanelType, panel, panel_message},
    errors::{Error, Result},
};
use sea_orm::{
    LoaderTrait, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait, prelude::*,
};
use serde::{Deserialize, Serialize};

/// Fields accepted when creating a panel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPanel {
    /// Unique name within the guild
    pub name: Option<String>,
    /// Ordered category IDs, at least one
    #[serde(default)]
    pub categories: Vec<i64>,
    /// Embed title
    pub title: Option<String>,
    /// Embed description
    pub description: Option<String>,
    /// Embed image URL
    pub image: Option<String>,
    /// Embed thumbnail URL
    pub thumbnail: Option<String>,
    /// Rendering mode, defaults to `BUTTON`
    #[serde(rename = "type")]
    pub panel_type: Option<PanelType>,
}

/// Partial update of a panel. Absent fields keep their value; for the
/// optional text fields an explicit `null` clears the value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PanelChanges {
    /// New name
    pub name: Option<String>,
    /// New title (`Some(None)` clears it)
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    /// New description (`Some(None)` clears it)
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    /// New image URL (`Some(None)` clears it)
    #[serde(default, deserialize_with = "present")]
    pub image: Option<Option<String>>,
    /// New thumbnail URL (`Some(None)` clears it)
    #[serde(default, deserialize_with = "present")]
    pub thumbnail: Option<Option<String>>,
    /// New rendering mode
    #[serde(rename = "type")]
    pub panel_type: Option<PanelType>,
    /// New category list
    pub categories: Option<Vec<i64>>,
}

// Distinguishes `"field": null` from a missing field.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// The reduced projection the autocomplete cache holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSummary {
    /// Panel ID
    pub id: i64,
    /// Panel name
    pub name: String,
    /// Embed title
    pub title: Option<String>,
}

/// Serializes category IDs for storage.
pub fn serialize_category_ids(ids: &[i64]) -> Result<String> {
    serde_json::to_string(ids).map_err(Into::into)
}

/// Reads the category IDs stored on a panel.
///
/// Accepts a JSON array, or a JSON string that itself holds a JSON array
/// (double-encoded rows written by older versions).
pub fn category_ids(panel: &panel::Model) -> Result<Vec<i64>> {
    parse_category_ids(&panel.categories)
}

fn parse_category_ids(raw: &str) -> Result<Vec<i64>> {
    match serde_json::from_str::<serde_json::Value>(raw)? {
        serde_json::Value::String(inner) => serde_json::from_str(&inner).map_err(Into::into),
        value @ serde_json::Value::Array(_) => serde_json::from_value(value).map_err(Into::into),
        other => Err(Error::Config {
            message: format!("Unexpected category list: {other}"),
        }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Lists every panel of a guild with its posted messages, newest first.
pub async fn get_panels_with_messages(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<Vec<(panel::Model, Vec<panel_message::Model>)>> {
    let panels = Panel::find()
        .filter(panel::Column::GuildId.eq(guild_id))
        .order_by_desc(panel::Column::CreatedAt)
        .order_by_desc(panel::Column::Id)
        .all(db)
        .await?;
    let messages = panels.load_many(PanelMessage, db).await?;
    Ok(panels.into_iter().zip(messages).collect())
}

/// Lists the `{id, name, title}` projection of every panel in a guild.
pub async fn get_panel_summaries(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<Vec<PanelSummary>> {
    Panel::find()
        .select_only()
        .column(panel::Column::Id)
        .column(panel::Column::Name)
        .column(panel::Column::Title)
        .filter(panel::Column::GuildId.eq(guild_id))
        .order_by_asc(panel::Column::Id)
        .into_tuple::<(i64, String, Option<String>)>()
        .all(db)
        .await
        .map(|rows| {
            rows.into_iter()
                .map(|(id, name, title)| PanelSummary { id, name, title })
                .collect()
        })
        .map_err(Into::into)
}

/// Finds a panel by ID within a guild.
pub async fn get_panel(
    db: &DatabaseConnection,
    guild_id: &str,
    panel_id: i64,
) -> Result<Option<panel::Model>> {
    Panel::find_by_id(panel_id)
        .filter(panel::Column::GuildId.eq(guild_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a panel by its name within a guild.
pub async fn get_panel_by_name(
    db: &DatabaseConnection,
    guild_id: &str,
    name: &str,
) -> Result<Option<panel::Model>> {
    Panel::find()
        .filter(panel::Column::GuildId.eq(guild_id))
        .filter(panel::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

fn map_unique_violation(err: DbErr) -> Error {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        Error::duplicate_panel_name()
    } else {
        err.into()
    }
}

/// Creates a panel after validating its name, categories and uniqueness.
///
/// # Errors
/// - `Validation` when the name is missing/blank or no category is given
/// - `Conflict` when the guild already has a panel with this name
/// - `Database` when the insert fails
pub async fn create_panel(
    db: &DatabaseConnection,
    guild_id: &str,
    new_panel: NewPanel,
) -> Result<panel::Model> {
    let name = new_panel
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::validation("Panel name is required"))?;

    if new_panel.categories.is_empty() {
        return Err(Error::validation("At least one category is required"));
    }

    if get_panel_by_name(db, guild_id, &name).await?.is_some() {
        return Err(Error::duplicate_panel_name());
    }

    let panel = panel::ActiveModel {
        guild_id: Set(guild_id.to_string()),
        name: Set(name),
        title: Set(non_empty(new_panel.title)),
        description: Set(non_empty(new_panel.description)),
        image: Set(non_empty(new_panel.image)),
        thumbnail: Set(non_empty(new_panel.thumbnail)),
        panel_type: Set(new_panel.panel_type.unwrap_or_default()),
        categories: Set(serialize_category_ids(&new_panel.categories)?),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    panel.insert(db).await.map_err(map_unique_violation)
}

/// Applies a partial update to a panel.
///
/// # Errors
/// - `PanelNotFound` when the guild has no panel with this ID
/// - `Validation` when the new name is blank or the new category list is empty
/// - `Conflict` when renaming onto another panel's name
/// - `Database` when the update fails
pub async fn update_panel(
    db: &DatabaseConnection,
    guild_id: &str,
    panel_id: i64,
    changes: PanelChanges,
) -> Result<panel::Model> {
    let existing = get_panel(db, guild_id, panel_id)
        .await?
        .ok_or(Error::PanelNotFound { id: panel_id })?;

    let name = match changes.name.map(|n| n.trim().to_string()) {
        Some(name) if name.is_empty() => {
            return Err(Error::validation("Panel name cannot be empty"));
        }
        Some(name) if name != existing.name => {
            if get_panel_by_name(db, guild_id, &name).await?.is_some() {
                return Err(Error::duplicate_panel_name());
            }
            Some(name)
        }
        _ => None,
    };

    let mut panel: panel::ActiveModel = existing.clone().into();
    if let Some(name) = name {
        panel.name = Set(name);
    }
    if let Some(title) = changes.title {
        panel.title = Set(non_empty(title));
    }
    if let Some(description) = changes.description {
        panel.description = Set(non_empty(description));
    }
    if let Some(image) = changes.image {
        panel.image = Set(non_empty(image));
    }
    if let Some(thumbnail) = changes.thumbnail {
        panel.thumbnail = Set(non_empty(thumbnail));
    }
    if let Some(panel_type) = changes.panel_type {
        panel.panel_type = Set(panel_type);
    }
    if let Some(categories) = changes.categories {
        if categories.is_empty() {
            return Err(Error::validation("At least one category is required"));
        }
        panel.categories = Set(serialize_category_ids(&categories)?);
    }

    if !panel.is_changed() {
        return Ok(existing);
    }
    panel.update(db).await.map_err(map_unique_violation)
}

/// Deletes a panel and all of its message records in one transaction.
///
/// # Errors
/// Returns `PanelNotFound` when the guild has no panel with this ID.
pub async fn delete_panel(
    db: &DatabaseConnection,
    guild_id: &str,
    panel_id: i64,
) -> Result<panel::Model> {
    let panel = get_panel(db, guild_id, panel_id)
        .await?
        .ok_or(Error::PanelNotFound { id: panel_id })?;

    let txn = db.begin().await?;
    PanelMessage::delete_many()
        .filter(panel_message::Column::PanelId.eq(panel.id))
        .exec(&txn)
        .await?;
    Panel::delete_by_id(panel.id).exec(&txn).await?;
    txn.commit().await?;

    Ok(panel)
}
