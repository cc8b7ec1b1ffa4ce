//! Panel message records - where each panel has been posted.

use crate::{
    entities::{PanelMessage, panel_message},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Records that a panel was posted as `message_id` in `channel_id`.
pub async fn record_panel_message(
    db: &DatabaseConnection,
    panel_id: i64,
    channel_id: &str,
    message_id: &str,
) -> Result<panel_message::Model> {
    panel_message::ActiveModel {
        panel_id: Set(panel_id),
        channel_id: Set(channel_id.to_string()),
        message_id: Set(message_id.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// All posted messages of a panel, oldest first.
pub async fn get_panel_messages(
    db: &DatabaseConnection,
    panel_id: i64,
) -> Result<Vec<panel_message::Model>> {
    PanelMessage::find()
        .filter(panel_message::Column::PanelId.eq(panel_id))
        .order_by_asc(panel_message::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes message records by ID, returning how many rows were removed.
pub async fn delete_panel_messages(db: &DatabaseConnection, ids: &[i64]) -> Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let result = PanelMessage::delete_many()
        .filter(panel_message::Column::Id.is_in(ids.iter().copied()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
