//! Product API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/models", get(handler::list_models).post(handler::create_model))
        .route("/variations/deletable", get(handler::list_deletable))
        .route("/variations/delete", post(handler::delete_options))
        .route("/stock", post(handler::update_stock))
}
