//! API server bootstrap.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::{AppState, create_router};
use crate::config::ServerConfig;

/// Builds the full application: API routes, static assets, CORS and tracing.
pub fn build_app(config: &ServerConfig, state: Arc<AppState>) -> Router {
    let mut app = create_router(state);

    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    if config.cors {
        app = app.layer(CorsLayer::permissive());
    }

    app.layer(TraceLayer::new_for_http())
}

/// Binds the listener and serves until Ctrl+C.
pub async fn serve(config: &ServerConfig, state: Arc<AppState>) -> std::io::Result<()> {
    let app = build_app(config, state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;

    info!(addr = %addr, "Server is running");
    if config.static_dir.is_some() {
        info!(url = %format!("http://localhost:{}/admin.html", addr.port()), "Admin panel");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
