// src/web/mod.rs

//! Browser-facing HTTP server.
//!
//! - `GET /`: static report page
//! - `GET /projects`: allow-listed projects
//! - `POST /process`: report rows for a project and date window

mod error;
mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal;

use crate::error::Result;
use crate::models::ReportZone;
use crate::pipeline::ReportBackend;

pub use error::{ApiError, ApiResult};
pub use handlers::{ProcessRequest, ProcessResponse};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn ReportBackend>,
    /// Zone used to widen request dates to whole days
    pub zone: ReportZone,
}

impl AppState {
    pub fn new(backend: Arc<dyn ReportBackend>, zone: ReportZone) -> Self {
        Self { backend, zone }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/projects", get(handlers::projects))
        .route("/process", post(handlers::process))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl+C or SIGTERM.
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Server listening on http://{}", listener.local_addr()?);
    log::info!("  GET  /          - report page");
    log::info!("  GET  /projects  - project list");
    log::info!("  POST /process   - website report");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {e}");
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
    log::info!("Shutdown signal received");
}
