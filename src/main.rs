//! # Timetable Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database and the
//! group catalog, notifies operators, and runs the Telegram dispatcher next
//! to the health check server.

use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timetable_bot::bot::handlers;
use timetable_bot::bot::state::State;
use timetable_bot::bot::AppContext;
use timetable_bot::config::Config;
use timetable_bot::database::connection::DatabaseManager;
use timetable_bot::services::broadcast;
use timetable_bot::services::health::HealthService;
use timetable_bot::timetable::{GroupCatalog, TimetableCache};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timetable_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Timetable Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Database: {}, HTTP Port: {}",
        config.database_url, config.http_port
    );

    info!("Initializing database connection...");
    let db = DatabaseManager::new(&config.database_url).await?;
    db.run_migrations().await?;
    info!("Database initialized successfully");

    let catalog = GroupCatalog::load(&config.groups_file)?;
    info!("Group catalog loaded - {} groups", catalog.len());

    let cache = TimetableCache::new(config.timetable_api_url.clone(), config.cache_dir.clone());

    let bot = Bot::new(&config.telegram_bot_token);
    let config = Arc::new(config);
    let ctx = AppContext::new(
        db.clone(),
        config.clone(),
        Arc::new(catalog),
        Arc::new(cache),
    );

    broadcast::notify_operators(&bot, &config.operator_ids, "<b>Bot started!</b>").await;

    let health_service = HealthService::new(Arc::new(db));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;
    info!("Health check server starting on port {}", config.http_port);

    let bot_task = tokio::spawn({
        let bot = bot.clone();
        async move {
            Dispatcher::builder(bot, handlers::schema())
                .dependencies(dptree::deps![InMemStorage::<State>::new(), ctx])
                .enable_ctrlc_handler()
                .build()
                .dispatch()
                .await;
        }
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result = health_task => {
            if let Err(e) = result {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    broadcast::notify_operators(&bot, &config.operator_ids, "<b>Bot stopped!</b>").await;
    info!("Application stopped");
    Ok(())
}
