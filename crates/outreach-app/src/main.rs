use std::sync::Mutex;

use salvo::Listener;
use salvo::conn::TcpListener;
use outreach_app::app;
use outreach_core::config::load_config;
use outreach_db::db::connection::create_pool;
use outreach_db::db::migrate::run_migrations;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config()?;

    // Flat append-only file sink backing the /logs admin endpoints.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.logging.file)?;

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(log_file)))
        .init();

    tracing::info!("Starting sales outreach API server");

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    {
        let url = config.database.url.clone();
        tokio::task::spawn_blocking(move || run_migrations(&url)).await??;
    }

    let pool = create_pool(
        &config.database.url,
        u32::from(config.database.max_connections),
    )
    .await?;

    tracing::info!("Database connection pool created.");

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let service = app::service(pool, config);

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(service).await;

    Ok(())
}
