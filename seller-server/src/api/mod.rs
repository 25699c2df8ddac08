//! API routes for seller-server

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(products::router())
}
