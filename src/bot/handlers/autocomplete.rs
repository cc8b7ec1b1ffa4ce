//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come from the per-guild [`PanelCache`](crate::cache::PanelCache)
//! so typing in the `panel` option does not hit the database on every key.

use crate::{bot::BotData, core::panel::PanelSummary, errors::Error};
use poise::serenity_prelude as serenity;
use regex::{Regex, RegexBuilder};
use tracing::error;

/// Discord shows at most 25 choices.
pub const MAX_CHOICES: usize = 25;
/// Discord rejects choice names longer than 100 characters.
pub const MAX_CHOICE_NAME: usize = 100;

fn query_pattern(query: &str) -> Option<Regex> {
    RegexBuilder::new(query)
        .case_insensitive(true)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(query))
                .case_insensitive(true)
                .build()
        })
        .ok()
}

fn choice_name(panel: &PanelSummary) -> String {
    let name = match &panel.title {
        Some(title) => format!("#{} - {} ({title})", panel.id, panel.name),
        None => format!("#{} - {}", panel.id, panel.name),
    };
    name.chars().take(MAX_CHOICE_NAME).collect()
}

/// Filters panels against what the user typed.
///
/// A panel matches when its name or title matches `query` as a
/// case-insensitive regular expression, or when its ID contains `query`. An
/// empty query matches everything. Returns `(name, panel id)` pairs.
#[must_use]
pub fn panel_choices(panels: &[PanelSummary], query: &str) -> Vec<(String, i64)> {
    let pattern = if query.is_empty() {
        None
    } else {
        query_pattern(query)
    };

    panels
        .iter()
        .filter(|panel| {
            let Some(pattern) = &pattern else {
                return true;
            };
            pattern.is_match(&panel.name)
                || panel.title.as_deref().is_some_and(|t| pattern.is_match(t))
                || panel.id.to_string().contains(query)
        })
        .take(MAX_CHOICES)
        .map(|panel| (choice_name(panel), panel.id))
        .collect()
}

/// Provides autocomplete suggestions for the panel option of `/panel`.
pub async fn autocomplete_panel(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let Some(guild_id) = ctx.guild_id() else {
        return Vec::new();
    };
    let data = ctx.data();

    let panels = match data
        .cache
        .get_or_refresh(&data.database, &guild_id.to_string())
        .await
    {
        Ok(panels) => panels,
        Err(e) => {
            error!("Failed to load panels for autocomplete in guild {guild_id}: {e}");
            return Vec::new();
        }
    };

    panel_choices(&panels, partial)
        .into_iter()
        .map(|(name, id)| serenity::AutocompleteChoice::new(name, id))
        .collect()
}
