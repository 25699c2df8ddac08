//! seller-server - seller dashboard backend for variation management
//!
//! Exposes the variation engine over JSON:
//! - list models and sold-out options of an item
//! - delete options (with index remapping of surviving models)
//! - add a model, appending its option when new
//! - bulk stock edits

pub mod api;
pub mod config;
pub mod state;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use config::Config;
pub use state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ids are uuid v4
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build the application with all middleware and state
pub fn build_app(state: AppState) -> Router {
    api::build_router()
        // CORS - dashboard frontend runs on another origin
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // One span per request
        .layer(TraceLayer::new_for_http())
        // Set must wrap Propagate so the id exists when Propagate copies it
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
