//! Variation engine for marketplace items
//!
//! Keeps an item's tier structure and its models consistent while options
//! are removed or added:
//!
//! - [`analyzer`]: which options can be deleted
//! - [`remapper`]: rewrite model tier indices after a deletion
//! - [`mutator`]: single-call structural writes
//! - [`resolver`]: case-insensitive option lookup
//! - [`orchestrator`]: append-then-create with bounded retry
//!
//! [`VariationEngine`] ties them together over a [`shared::CatalogStore`].

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod mutator;
pub mod orchestrator;
pub mod remapper;
pub mod resolver;

pub use config::{BackoffStrategy, EngineConfig, RetryPolicy};
pub use engine::{DeletionOutcome, VariationEngine};
pub use error::{VariationError, VariationResult};
pub use orchestrator::{CreatedModel, ModelRequest};
pub use resolver::OptionResolution;
