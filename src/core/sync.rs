//! Reconciliation of posted panel messages with the stored panel.
//!
//! Messages are processed one at a time. A missing channel or message marks
//! the record for pruning; a failed edit is reported but never stops the batch.

use crate::{
    core::{panel_message::delete_panel_messages, render::RenderedPanel},
    entities::panel_message,
    errors::Result,
    platform::ChatPlatform,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of editing one posted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Updated,
    Failed,
}

/// Per-message result reported back to the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageUpdate {
    pub channel_id: String,
    pub message_id: String,
    pub status: SyncStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of re-rendering every posted instance of a panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// One entry per message that still exists
    pub updates: Vec<MessageUpdate>,
    /// Number of records pruned because their message is gone
    pub deleted_messages: u64,
}

async fn locate(
    platform: &dyn ChatPlatform,
    record: &panel_message::Model,
) -> Option<crate::platform::MessageRef> {
    let channel = platform.fetch_channel(&record.channel_id).await?;
    platform.fetch_message(&channel, &record.message_id).await
}

/// Edits every posted message to show `rendered`, then prunes the records of
/// messages that no longer exist.
///
/// # Errors
/// Only the final pruning query can fail; platform errors end up in the report.
pub async fn refresh_panel_messages(
    db: &DatabaseConnection,
    platform: &dyn ChatPlatform,
    records: &[panel_message::Model],
    rendered: &RenderedPanel,
) -> Result<SyncReport> {
    let mut updates = Vec::new();
    let mut stale = Vec::new();

    for record in records {
        let Some(message) = locate(platform, record).await else {
            stale.push(record.id);
            continue;
        };

        match platform.edit_panel(&message, rendered).await {
            Ok(()) => updates.push(MessageUpdate {
                channel_id: record.channel_id.clone(),
                message_id: record.message_id.clone(),
                status: SyncStatus::Updated,
                error: None,
            }),
            Err(e) => {
                warn!("Failed to update panel message {}: {e}", record.message_id);
                updates.push(MessageUpdate {
                    channel_id: record.channel_id.clone(),
                    message_id: record.message_id.clone(),
                    status: SyncStatus::Failed,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let deleted_messages = delete_panel_messages(db, &stale).await?;
    if deleted_messages > 0 {
        info!("Pruned {deleted_messages} stale panel message records");
    }

    Ok(SyncReport {
        updates,
        deleted_messages,
    })
}

/// Deletes every posted message that can still be found. Failures are logged
/// and skipped; the records themselves are removed with the panel.
pub async fn remove_panel_messages(platform: &dyn ChatPlatform, records: &[panel_message::Model]) {
    for record in records {
        let Some(message) = locate(platform, record).await else {
            continue;
        };
        if let Err(e) = platform.delete_message(&message).await {
            warn!("Failed to delete panel message {}: {e}", record.message_id);
        }
    }
}
