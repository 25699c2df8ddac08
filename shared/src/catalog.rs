//! Catalog store contract
//!
//! The variation engine reads and writes an item's structure only through
//! [`CatalogStore`]. The marketplace client implements it over HTTP; tests
//! implement it in memory.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ModelDraft, NewModel, TierVariation, VariationSnapshot};

/// Failure reported by a catalog store call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store has not applied a recent structural edit yet; the tier
    /// index used by the call is not recognized. Safe to retry.
    #[error("tier index not recognized yet: {0}")]
    TierIndexNotReady(String),

    /// Any other failure, with the store's message attached verbatim
    #[error("{0}")]
    Upstream(String),
}

impl StoreError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TierIndexNotReady(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Authoritative source of an item's tier structure and models
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Current tiers and models of the item (point-in-time read)
    async fn fetch_snapshot(&self, item_id: i64) -> StoreResult<VariationSnapshot>;

    /// Replace the whole tier structure and model set in one call
    async fn replace_tier_structure(
        &self,
        item_id: i64,
        tiers: &[TierVariation],
        models: &[ModelDraft],
    ) -> StoreResult<()>;

    /// Create one model, returning the new model id
    async fn create_model(&self, item_id: i64, model: &NewModel) -> StoreResult<i64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(StoreError::TierIndexNotReady("tier_index error".into()).is_transient());
        assert!(!StoreError::Upstream("busy".into()).is_transient());
    }

    #[test]
    fn test_display() {
        let err = StoreError::TierIndexNotReady("Model tier_index error".into());
        assert_eq!(
            err.to_string(),
            "tier index not recognized yet: Model tier_index error"
        );
        assert_eq!(StoreError::Upstream("busy".into()).to_string(), "busy");
    }
}
