use dotenvy::dotenv;
use panel_buddy::{
    api::{ApiState, create_router},
    audit::TracingAuditSink,
    bot::{self, BotData},
    cache::PanelCache,
    config::{app::load_default_config, database},
    errors::{Error, Result},
    i18n::Locales,
    platform::SerenityPlatform,
};
use poise::serenity_prelude as serenity;
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = load_default_config()?;
    info!("Successfully processed application configuration.");

    // 4. Connect to the database and create missing tables
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;

    let locales = Arc::new(Locales::builtin(app_config.locale.default.clone())?);
    let cache = Arc::new(PanelCache::new(app_config.autocomplete.ttl()));

    // 5. Build the bot client; the token is read directly before use
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;
    let framework = bot::build_framework(BotData::new(
        db.clone(),
        Arc::clone(&cache),
        Arc::clone(&locales),
    ));
    let mut client = serenity::Client::builder(&token, bot::intents())
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    // 6. Serve the admin API on the bot's HTTP client and cache
    let state = ApiState {
        database: db,
        platform: Arc::new(SerenityPlatform::new(
            Arc::clone(&client.http),
            Arc::clone(&client.cache),
        )),
        cache,
        locales,
        audit: Arc::new(TracingAuditSink),
    };
    let listener = tokio::net::TcpListener::bind(&app_config.http.bind).await?;
    info!("Admin API listening on {}", app_config.http.bind);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, create_router(state)).await {
            error!("Admin API server stopped: {e}");
        }
    });

    // 7. Run the bot
    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;
    Ok(())
}
