//! Panel message entity - One live posted instance of a panel.
//!
//! Rows are created whenever a panel is sent and pruned when the underlying
//! Discord message turns out to be gone.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Panel message database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "panel_messages")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Panel this message was rendered from
    pub panel_id: i64,
    /// Discord channel the message was posted in
    pub channel_id: String,
    /// Discord message ID
    pub message_id: String,
}

/// Defines relationships between `PanelMessage` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each message belongs to one panel
    #[sea_orm(
        belongs_to = "super::panel::Entity",
        from = "Column::PanelId",
        to = "super::panel::Column::Id",
        on_delete = "Cascade"
    )]
    Panel,
}

impl Related<super::panel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Panel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
