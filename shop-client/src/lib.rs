//! Shop Client - signed HTTP client for the marketplace product API
//!
//! Provides the calls the seller dashboard makes against the marketplace
//! Open API and implements [`shared::CatalogStore`] on top of them.

pub mod config;
pub mod error;
pub mod http;
pub mod sign;
mod store;
pub mod wire;

pub use config::{ShopConfig, ShopCredentials};
pub use error::{ClientError, ClientResult};
pub use http::ShopClient;
