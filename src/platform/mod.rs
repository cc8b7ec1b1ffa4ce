//! Chat platform access used by panel publishing and reconciliation.
//!
//! The trait keeps the core logic independent of serenity so it can be
//! exercised against an in-memory platform in tests.

/// Serenity-backed implementation
pub mod discord;

pub use discord::SerenityPlatform;

use crate::core::render::RenderedPanel;
use async_trait::async_trait;
use std::fmt;

/// A channel that was confirmed to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRef {
    /// Discord channel ID
    pub id: String,
}

/// A message that was confirmed to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    /// Channel the message lives in
    pub channel_id: String,
    /// Discord message ID
    pub id: String,
}

/// A failed platform call, carrying the platform's error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError(pub String);

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<PlatformError> for crate::errors::Error {
    fn from(value: PlatformError) -> Self {
        Self::Platform { message: value.0 }
    }
}

/// Operations panels need from the chat platform.
///
/// Fetches return `None` when the channel or message is gone (or cannot be
/// seen); writes return the platform's error so callers can report it.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Looks up a channel.
    async fn fetch_channel(&self, channel_id: &str) -> Option<ChannelRef>;

    /// Looks up a message in a channel.
    async fn fetch_message(&self, channel: &ChannelRef, message_id: &str) -> Option<MessageRef>;

    /// Posts a rendered panel.
    async fn send_panel(
        &self,
        channel: &ChannelRef,
        panel: &RenderedPanel,
    ) -> Result<MessageRef, PlatformError>;

    /// Replaces the content of a posted panel. Controls are cleared when the
    /// panel has none.
    async fn edit_panel(
        &self,
        message: &MessageRef,
        panel: &RenderedPanel,
    ) -> Result<(), PlatformError>;

    /// Deletes a posted message.
    async fn delete_message(&self, message: &MessageRef) -> Result<(), PlatformError>;

    /// Icon URL of a guild, if it has one.
    fn guild_icon_url(&self, guild_id: &str) -> Option<String>;
}
