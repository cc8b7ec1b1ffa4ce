//! Guild entity - Per-guild settings that panels are rendered with.
//!
//! Rows are owned by the settings side of the bot; this crate only reads them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Guild settings database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guilds")]
pub struct Model {
    /// Discord guild ID
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Locale used for bot replies and panel labels (e.g., "en-GB")
    pub locale: String,
    /// Embed colour for panels and neutral replies
    pub primary_colour: i64,
    /// Embed colour for failure replies
    pub error_colour: i64,
    /// Embed colour for success replies
    pub success_colour: i64,
    /// Footer text shown under panel embeds
    pub footer: Option<String>,
}

/// Defines relationships between Guild and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One guild has many categories
    #[sea_orm(has_many = "super::category::Entity")]
    Categories,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
