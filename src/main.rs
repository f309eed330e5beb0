// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use relational_auth_server::{
    api::router,
    config::{Config, LogFormat, DEFAULT_LOG_FILTER},
    state::AppState,
    storage::{CredentialStore, ElasticStore, InMemoryStore},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let store: Arc<dyn CredentialStore> = match &config.elastic {
        Some(elastic) => {
            let store = ElasticStore::new(elastic.clone())?;
            // Startup continues without the index; searches treat it as empty
            if let Err(e) = store.ensure_index().await {
                tracing::warn!(
                    error = %e,
                    url = %elastic.url,
                    "Could not prepare credential index"
                );
            }
            tracing::info!(
                url = %elastic.url,
                index = %elastic.index,
                "Using Elasticsearch credential store"
            );
            Arc::new(store)
        }
        None => {
            tracing::warn!(
                "ELASTICSEARCH_URL not set, running with in-memory credential store (development mode)"
            );
            Arc::new(InMemoryStore::new())
        }
    };

    let state = AppState::new(store, &config.signing_key);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Relational Auth server listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
