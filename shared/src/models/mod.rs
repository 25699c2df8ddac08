//! Data models
//!
//! Shared between shop-client, variation-engine and seller-server (via API).
//! Item and model ids are `i64` as issued by the marketplace.

pub mod variation;

// Re-exports
pub use variation::*;
