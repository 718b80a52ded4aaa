use actix_web::{middleware::Logger, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod catalog;
mod config;
mod console;
mod domain;
mod health;
mod metrics;
mod money;
mod store;
mod utils;
mod web;

use catalog::MenuCatalog;
use config::{Config, StoreSettings};
use console::ConsoleExit;
use store::{InMemoryOrderStore, OrderStore, PgOrderStore};
use web::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,restaurant_orders=debug")),
        )
        .init();

    let config = Config::parse();

    // === 1. Menu catalog (no menu, no service) ===
    let catalog = MenuCatalog::load_file(&config.menu_file)
        .with_context(|| format!("loading menu from {}", config.menu_file.display()))?;
    let catalog = Arc::new(catalog);

    // === 2. Order store ===
    let store: Arc<dyn OrderStore> = match config.store_settings()? {
        StoreSettings::Memory => {
            tracing::warn!("Using in-memory order store; orders are lost on shutdown");
            Arc::new(InMemoryOrderStore::new())
        }
        StoreSettings::Postgres(pg) => Arc::new(
            PgOrderStore::connect(pg)
                .await
                .context("preparing the order collection")?,
        ),
    };

    // === 3. Metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);

    let state = actix_web::web::Data::new(AppState {
        catalog,
        store,
        metrics,
    });

    // === 4. HTTP server ===
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(web::configure)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("binding {}:{}", config.host, config.port))?
    .run();

    let handle = server.handle();
    let mut server_task = actix_web::rt::spawn(server);

    tracing::info!(
        "Web server started and running at http://localhost:{}",
        config.port
    );

    // === 5. Control console ===
    let lines = console::spawn_line_reader(std::io::BufReader::new(std::io::stdin()));
    let console = console::wait_for_stop(lines, tokio::io::stdout());

    tokio::select! {
        exit = console => match exit {
            Ok(ConsoleExit::Stop) => {
                tracing::info!("Stop command received, shutting down");
                handle.stop(true).await;
            }
            Ok(ConsoleExit::InputClosed) => {
                tracing::info!("Control input closed; server keeps running until signalled");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Control console failed; server keeps running until signalled");
            }
        },
        result = &mut server_task => {
            result.context("HTTP server task panicked")??;
            return Ok(());
        }
    }

    server_task.await.context("HTTP server task panicked")??;
    tracing::info!("Server stopped");

    Ok(())
}
