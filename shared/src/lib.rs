//! Shared types for the seller dashboard
//!
//! Variation data model, the catalog store contract consumed by the
//! variation engine, and the error/response types used at the HTTP
//! boundary.

pub mod catalog;
pub mod error;
pub mod models;

// Re-exports
pub use catalog::{CatalogStore, StoreError, StoreResult};
pub use http;
pub use serde::{Deserialize, Serialize};
