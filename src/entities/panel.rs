//! Panel entity - A postable message that lets users pick a ticket category.
//!
//! Each panel belongs to one guild, has a unique name within that guild, and
//! references an ordered list of category IDs stored as JSON text.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How a panel presents its categories
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "UPPERCASE")]
pub enum PanelType {
    /// Embed only, no interactive controls
    #[sea_orm(string_value = "MESSAGE")]
    Message,
    /// One button per category
    #[default]
    #[sea_orm(string_value = "BUTTON")]
    Button,
    /// A single select menu listing every category
    #[sea_orm(string_value = "SELECT")]
    Select,
}

/// Panel database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "panels")]
pub struct Model {
    /// Unique identifier for the panel
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Guild that owns the panel
    pub guild_id: String,
    /// Admin-facing name, unique per guild
    pub name: String,
    /// Embed title
    pub title: Option<String>,
    /// Embed description
    pub description: Option<String>,
    /// Embed image URL
    pub image: Option<String>,
    /// Embed thumbnail URL
    pub thumbnail: Option<String>,
    /// Rendering mode
    #[sea_orm(column_name = "type")]
    pub panel_type: PanelType,
    /// Category IDs serialized as a JSON array (e.g., "[1,2]")
    pub categories: String,
    /// When the panel was created
    pub created_at: DateTime,
}

/// Defines relationships between Panel and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One panel has many posted messages
    #[sea_orm(has_many = "super::panel_message::Entity")]
    Messages,
}

impl Related<super::panel_message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
