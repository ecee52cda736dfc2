use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::{storage::JsonFileStore, todos::TodoService};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Mirrors the request origin; any method or header is allowed.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire store, service, and router from configuration.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    common::env::ensure_env(&cfg.storage.static_dir).await?;

    let store = Arc::new(JsonFileStore::new(&cfg.storage.data_file));
    let todos = TodoService::new(store);
    todos.init().await?;
    info!(data_file = %cfg.storage.data_file.display(), "todo store ready");

    Ok(routes::build_router(AppState::new(todos), build_cors(), &cfg.storage.static_dir))
}

/// Public entry: build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port))
        .await
        .map_err(|e| StartupError::Bind(format!("{}:{}", cfg.server.host, cfg.server.port), e))?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, "Todo API running on http://localhost:{}", cfg.server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, shutting down"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}
