//! Per-guild cache of panel summaries for autocomplete.
//!
//! Entries expire after a fixed TTL and are repopulated from the database on
//! the next lookup. Two concurrent misses may both hit the database; the last
//! write wins, which is harmless.

use crate::core::panel::{PanelSummary, get_panel_summaries};
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, trace};

/// Default lifetime of a cached guild entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    panels: Vec<PanelSummary>,
    expires_at: Instant,
}

/// Expiring map of guild ID -> panel summaries.
#[derive(Debug)]
pub struct PanelCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl Default for PanelCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

fn cache_key(guild_id: &str) -> String {
    format!("cache/guild-panels:{guild_id}")
}

impl PanelCache {
    /// Creates an empty cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached panels of a guild if the entry is still fresh.
    pub async fn get(&self, guild_id: &str) -> Option<Vec<PanelSummary>> {
        let entries = self.entries.read().await;
        entries
            .get(&cache_key(guild_id))
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.panels.clone())
    }

    /// Stores the panels of a guild, resetting its expiry. Expired entries of
    /// other guilds are dropped.
    pub async fn insert(&self, guild_id: &str, panels: Vec<PanelSummary>) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            cache_key(guild_id),
            CacheEntry {
                panels,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Drops the entry of a guild so the next lookup reloads it.
    pub async fn invalidate(&self, guild_id: &str) {
        if self.entries.write().await.remove(&cache_key(guild_id)).is_some() {
            debug!("Invalidated panel cache for guild {guild_id}");
        }
    }

    /// Returns the panels of a guild, loading and caching them on a miss.
    pub async fn get_or_refresh(
        &self,
        db: &DatabaseConnection,
        guild_id: &str,
    ) -> Result<Vec<PanelSummary>> {
        if let Some(panels) = self.get(guild_id).await {
            trace!("Panel cache hit for guild {guild_id}");
            return Ok(panels);
        }

        let panels = get_panel_summaries(db, guild_id).await?;
        info!(
            "Panel cache for guild {guild_id} refreshed with {} items.",
            panels.len()
        );
        self.insert(guild_id, panels.clone()).await;
        Ok(panels)
    }
}
