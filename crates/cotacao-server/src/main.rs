//! Cotacao Server
//!
//! Answers every HTTP request with the current USD-BRL bid: fetches the quote
//! from the upstream API, records it in SQLite and returns the bid as JSON.

mod config;
mod handlers;
mod services;
mod storage;
mod upstream;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{FaultPolicy, ServerConfig};
use crate::services::QuoteService;
use crate::storage::Database;
use crate::upstream::HttpQuoteSource;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub quotes: Arc<QuoteService>,
    pub fault_policy: FaultPolicy,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cotacao_server=info,tower_http=info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Cotacao Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = ServerConfig::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, db={}, fetch_timeout={}ms, store_timeout={}ms, fault_policy={}",
        config.bind_address,
        config.database_path,
        config.fetch_timeout_ms,
        config.store_timeout_ms,
        config.fault_policy
    );

    if config.store_timeout_is_tight() {
        warn!(
            "Store deadline of {}ms is shorter than a typical SQLite insert; most quotes will not be persisted",
            config.store_timeout_ms
        );
    }

    let db = Arc::new(
        Database::new(&config.database_path, config.max_connections)
            .await
            .context("Failed to initialize database")?,
    );
    info!("Stored quotes so far: {}", db.count().await?);
    if let Some(last) = db.list_recent(1).await?.first() {
        info!("Last stored bid: {} ({})", last.bid, last.create_date);
    }

    let http = reqwest::Client::builder()
        .user_agent(concat!("cotacao-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;
    let source = Arc::new(HttpQuoteSource::new(http, config.upstream_url.clone()));
    info!("Upstream: {}", source.url());

    let state = AppState {
        quotes: Arc::new(QuoteService::new(
            source,
            db.clone(),
            config.fetch_timeout(),
            config.store_timeout(),
        )),
        fault_policy: config.fault_policy,
    };

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .fallback(handlers::quote::handle)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
