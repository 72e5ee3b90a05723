//! API route definitions.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use super::{AppState, handlers};

/// Creates the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Settings endpoints
        .route(
            "/api/config",
            get(handlers::config::get_config).post(handlers::config::set_config),
        )
        // Goods endpoints
        .route(
            "/api/goods",
            get(handlers::goods::list).post(handlers::goods::create),
        )
        .route("/api/goods/hot", get(handlers::goods::list_hot))
        .route(
            "/api/goods/{id}",
            put(handlers::goods::update).delete(handlers::goods::delete),
        )
        // Coupon endpoints
        .route("/api/coupon/search", post(handlers::coupon::search))
        .with_state(state)
}
