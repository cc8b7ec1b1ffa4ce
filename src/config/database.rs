//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the database schema always matches the Rust structs without hand-written SQL.
//! The only addition is the unique `(guild_id, name)` index on panels.

use crate::entities::{Category, Guild, Panel, PanelMessage, panel};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/panels.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(&get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all tables (if missing) from the entity definitions.
///
/// Order matters: guilds before categories, panels before panel messages,
/// because of the foreign keys between them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut guild_table = schema.create_table_from_entity(Guild);
    let mut category_table = schema.create_table_from_entity(Category);
    let mut panel_table = schema.create_table_from_entity(Panel);
    let mut panel_message_table = schema.create_table_from_entity(PanelMessage);

    for table in [
        guild_table.if_not_exists(),
        category_table.if_not_exists(),
        panel_table.if_not_exists(),
        panel_message_table.if_not_exists(),
    ] {
        db.execute(builder.build(&*table)).await?;
    }

    let panel_name_index = Index::create()
        .name("idx_panels_guild_id_name")
        .table(Panel)
        .col(panel::Column::GuildId)
        .col(panel::Column::Name)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&panel_name_index)).await?;

    Ok(())
}
