//! Bookshelf server: reads settings from the environment, connects the store,
//! and serves the GraphQL API.

use bookshelf_graphql::{app, store, AppConfig, AppState, MemoryRepository, PgRepository, RepositoryArc, StoreConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookshelf_graphql=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let repo: RepositoryArc = match &config.store {
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = store::connect(database_url, *max_connections).await?;
            Arc::new(PgRepository::new(pool))
        }
        StoreConfig::Memory => {
            tracing::warn!("using the in-memory store; data is lost on exit");
            Arc::new(MemoryRepository::new())
        }
    };

    let router = app(AppState::new(repo).with_graphiql(config.graphiql));
    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("connection established at {}", listener.local_addr()?);
    if config.graphiql {
        tracing::info!("GraphiQL explorer at http://{}/graphql", listener.local_addr()?);
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down");
}
