//! Admin audit events for mutating panel operations.
//!
//! Recording is fire-and-forget: a sink never reports failure back to the
//! operation that emitted the event.

use crate::entities::panel;
use serde::Serialize;
use tracing::info;

/// What an admin did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminAction {
    Create,
    Update,
    Delete,
    Send,
}

/// The object an admin event refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditTarget {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// One audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminEvent {
    pub action: AdminAction,
    pub guild_id: String,
    pub target: AuditTarget,
    pub user_id: String,
}

impl AdminEvent {
    /// An event targeting a panel.
    #[must_use]
    pub fn panel(action: AdminAction, panel: &panel::Model, user_id: &str) -> Self {
        Self {
            action,
            guild_id: panel.guild_id.clone(),
            target: AuditTarget {
                id: panel.id.to_string(),
                name: panel.name.clone(),
                kind: "panel",
            },
            user_id: user_id.to_string(),
        }
    }
}

/// Destination for audit events.
pub trait AuditSink: Send + Sync {
    /// Records an event.
    fn record(&self, event: AdminEvent);
}

/// Writes audit events to the `audit` tracing target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: AdminEvent) {
        info!(
            target: "audit",
            action = ?event.action,
            guild_id = %event.guild_id,
            target_id = %event.target.id,
            target_name = %event.target.name,
            target_type = event.target.kind,
            user_id = %event.user_id,
            "admin event"
        );
    }
}
