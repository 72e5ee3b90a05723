mod affiliate;
mod api;
mod config;
mod domain;
mod goods;
mod settings;
mod storage;

use std::env;
use std::sync::Arc;

use affiliate::TopClient;
use api::AppState;
use config::Config;
use storage::JsonFileStore;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

fn parse_config_path() -> String {
    for arg in env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--config=") {
            return path.to_string();
        }
    }
    DEFAULT_CONFIG_PATH.to_string()
}

fn init_tracing(log_level: Option<&str>) {
    let level = match log_level {
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        Some("trace") => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

#[tokio::main]
async fn main() {
    let config_path = parse_config_path();

    let config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return;
        }
    };

    init_tracing(config.app.log_level.as_deref());

    info!(
        name = %config.app.name,
        env = %config.app.env,
        config = %config_path,
        "Starting admin service"
    );

    let store = match JsonFileStore::open(&config.storage.data_dir).await {
        Ok(store) => store,
        Err(e) => {
            error!(dir = %config.storage.data_dir, error = %e, "Failed to open data directory");
            return;
        }
    };
    info!(dir = %store.dir().display(), "Document store ready");

    let client = match TopClient::new(config.affiliate.request_timeout()) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to create affiliate client");
            return;
        }
    };

    let state = AppState::new(
        Arc::new(store),
        Arc::new(client),
        config.affiliate.default_url.clone(),
    );

    if let Err(e) = api::serve(&config.server, Arc::new(state)).await {
        error!(error = %e, "Server error");
    }

    info!("Server stopped");
}
