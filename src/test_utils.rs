//! Shared test utilities.
//!
//! This module provides an in-memory database, helpers that create guilds,
//! categories and panels with sensible defaults, an in-memory chat platform,
//! and an audit sink that remembers what it was given.

#![allow(clippy::unwrap_used)]

use crate::{
    audit::{AdminEvent, AuditSink},
    core::{
        panel::{NewPanel, create_panel},
        render::RenderedPanel,
    },
    entities::{PanelType, category, guild, panel},
    errors::Result,
    i18n::Locales,
    platform::{ChannelRef, ChatPlatform, MessageRef, PlatformError},
};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Guild most tests operate in.
pub const TEST_GUILD: &str = "100000000000000001";
/// A second guild for scoping tests.
pub const OTHER_GUILD: &str = "100000000000000002";

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The builtin English locale bundle.
pub fn test_locales() -> Locales {
    Locales::builtin("en-GB").unwrap()
}

/// Creates a guild settings row with a footer and the default colours.
pub async fn create_test_guild(db: &DatabaseConnection, guild_id: &str) -> Result<guild::Model> {
    guild::ActiveModel {
        id: Set(guild_id.to_string()),
        locale: Set("en-GB".to_string()),
        primary_colour: Set(0x0000_9999),
        error_colour: Set(0x00EF_4444),
        success_colour: Set(0x0022_C55E),
        footer: Set(Some("Support".to_string())),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a category in a guild; the guild row must already exist.
pub async fn create_test_category(
    db: &DatabaseConnection,
    guild_id: &str,
    name: &str,
    emoji: &str,
) -> Result<category::Model> {
    category::ActiveModel {
        guild_id: Set(guild_id.to_string()),
        name: Set(name.to_string()),
        description: Set(format!("{name} questions")),
        emoji: Set(emoji.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a panel with only a name, type and categories.
pub async fn create_test_panel(
    db: &DatabaseConnection,
    guild_id: &str,
    name: &str,
    panel_type: PanelType,
    categories: &[i64],
) -> Result<panel::Model> {
    create_panel(
        db,
        guild_id,
        NewPanel {
            name: Some(name.to_string()),
            categories: categories.to_vec(),
            panel_type: Some(panel_type),
            ..Default::default()
        },
    )
    .await
}

#[derive(Debug, Default)]
struct PlatformState {
    channels: HashSet<String>,
    // message ID -> (channel ID, last rendered content)
    messages: HashMap<String, (String, Option<RenderedPanel>)>,
    failing: HashSet<String>,
    icons: HashMap<String, String>,
    next_id: u64,
}

/// In-memory chat platform.
#[derive(Debug, Default)]
pub struct MockPlatform {
    state: Mutex<PlatformState>,
}

impl MockPlatform {
    pub fn add_channel(&self, channel_id: &str) -> ChannelRef {
        self.state
            .lock()
            .unwrap()
            .channels
            .insert(channel_id.to_string());
        ChannelRef {
            id: channel_id.to_string(),
        }
    }

    pub fn add_message(&self, channel_id: &str, message_id: &str) -> MessageRef {
        self.add_channel(channel_id);
        self.state
            .lock()
            .unwrap()
            .messages
            .insert(message_id.to_string(), (channel_id.to_string(), None));
        MessageRef {
            channel_id: channel_id.to_string(),
            id: message_id.to_string(),
        }
    }

    pub fn remove_channel(&self, channel_id: &str) {
        let mut state = self.state.lock().unwrap();
        state.channels.remove(channel_id);
        state.messages.retain(|_, (channel, _)| channel != channel_id);
    }

    /// Makes every write to this channel or message fail.
    pub fn fail_writes_to(&self, id: &str) {
        self.state.lock().unwrap().failing.insert(id.to_string());
    }

    pub fn set_guild_icon(&self, guild_id: &str, url: &str) {
        self.state
            .lock()
            .unwrap()
            .icons
            .insert(guild_id.to_string(), url.to_string());
    }

    pub fn has_message(&self, message_id: &str) -> bool {
        self.state.lock().unwrap().messages.contains_key(message_id)
    }

    /// Content a message was last sent or edited with.
    pub fn rendered(&self, message_id: &str) -> Option<RenderedPanel> {
        self.state
            .lock()
            .unwrap()
            .messages
            .get(message_id)
            .and_then(|(_, rendered)| rendered.clone())
    }

    pub fn message_count(&self) -> usize {
        self.state.lock().unwrap().messages.len()
    }
}

#[async_trait]
impl ChatPlatform for MockPlatform {
    async fn fetch_channel(&self, channel_id: &str) -> Option<ChannelRef> {
        let state = self.state.lock().unwrap();
        state.channels.contains(channel_id).then(|| ChannelRef {
            id: channel_id.to_string(),
        })
    }

    async fn fetch_message(&self, channel: &ChannelRef, message_id: &str) -> Option<MessageRef> {
        let state = self.state.lock().unwrap();
        state
            .messages
            .get(message_id)
            .filter(|(channel_id, _)| *channel_id == channel.id)
            .map(|_| MessageRef {
                channel_id: channel.id.clone(),
                id: message_id.to_string(),
            })
    }

    async fn send_panel(
        &self,
        channel: &ChannelRef,
        panel: &RenderedPanel,
    ) -> std::result::Result<MessageRef, PlatformError> {
        let mut state = self.state.lock().unwrap();
        if state.failing.contains(&channel.id) {
            return Err(PlatformError("Missing Permissions".to_string()));
        }
        state.next_id += 1;
        let id = format!("9000{}", state.next_id);
        state
            .messages
            .insert(id.clone(), (channel.id.clone(), Some(panel.clone())));
        Ok(MessageRef {
            channel_id: channel.id.clone(),
            id,
        })
    }

    async fn edit_panel(
        &self,
        message: &MessageRef,
        panel: &RenderedPanel,
    ) -> std::result::Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        if state.failing.contains(&message.id) {
            return Err(PlatformError("Missing Access".to_string()));
        }
        match state.messages.get_mut(&message.id) {
            Some((_, rendered)) => {
                *rendered = Some(panel.clone());
                Ok(())
            }
            None => Err(PlatformError("Unknown Message".to_string())),
        }
    }

    async fn delete_message(&self, message: &MessageRef) -> std::result::Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        if state.failing.contains(&message.id) {
            return Err(PlatformError("Missing Access".to_string()));
        }
        state
            .messages
            .remove(&message.id)
            .map(|_| ())
            .ok_or_else(|| PlatformError("Unknown Message".to_string()))
    }

    fn guild_icon_url(&self, guild_id: &str) -> Option<String> {
        self.state.lock().unwrap().icons.get(guild_id).cloned()
    }
}

/// Audit sink that keeps every event.
#[derive(Debug, Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<AdminEvent>>,
}

impl RecordingAuditSink {
    pub fn events(&self) -> Vec<AdminEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AuditSink for RecordingAuditSink {
    fn record(&self, event: AdminEvent) {
        self.events.lock().unwrap().push(event);
    }
}
