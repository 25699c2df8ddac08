//! In-memory catalog store for engine tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use shared::models::{Model, ModelDraft, NewModel, TierVariation, VariationSnapshot};
use shared::{CatalogStore, StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceCall {
    pub tiers: Vec<TierVariation>,
    pub models: Vec<ModelDraft>,
}

#[derive(Default)]
struct State {
    snapshot: Option<VariationSnapshot>,
    fetch_count: usize,
    replace_calls: Vec<ReplaceCall>,
    create_calls: Vec<NewModel>,
    create_script: VecDeque<StoreResult<i64>>,
    replace_error: Option<StoreError>,
    next_model_id: i64,
}

/// Applies writes to its snapshot and records every call
pub struct FakeStore {
    state: Mutex<State>,
}

impl FakeStore {
    pub fn new(snapshot: VariationSnapshot) -> Self {
        Self {
            state: Mutex::new(State {
                snapshot: Some(snapshot),
                next_model_id: 1000,
                ..State::default()
            }),
        }
    }

    /// Results handed out by `create_model`, in order; afterwards it succeeds
    pub fn script_creates(&self, results: Vec<StoreResult<i64>>) {
        self.state.lock().unwrap().create_script = results.into();
    }

    pub fn fail_replace(&self, error: StoreError) {
        self.state.lock().unwrap().replace_error = Some(error);
    }

    /// Change the stored structure behind the engine's back
    pub fn mutate(&self, f: impl FnOnce(&mut VariationSnapshot)) {
        let mut state = self.state.lock().unwrap();
        if let Some(snapshot) = state.snapshot.as_mut() {
            f(snapshot);
        }
    }

    pub fn snapshot(&self) -> VariationSnapshot {
        self.state.lock().unwrap().snapshot.clone().unwrap()
    }

    pub fn fetch_count(&self) -> usize {
        self.state.lock().unwrap().fetch_count
    }

    pub fn replace_calls(&self) -> Vec<ReplaceCall> {
        self.state.lock().unwrap().replace_calls.clone()
    }

    pub fn create_calls(&self) -> Vec<NewModel> {
        self.state.lock().unwrap().create_calls.clone()
    }

    pub fn write_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.replace_calls.len() + state.create_calls.len()
    }
}

#[async_trait]
impl CatalogStore for FakeStore {
    async fn fetch_snapshot(&self, item_id: i64) -> StoreResult<VariationSnapshot> {
        let mut state = self.state.lock().unwrap();
        state.fetch_count += 1;
        match &state.snapshot {
            Some(s) if s.item_id == item_id => Ok(s.clone()),
            _ => Err(StoreError::Upstream("item not found".into())),
        }
    }

    async fn replace_tier_structure(
        &self,
        _item_id: i64,
        tiers: &[TierVariation],
        models: &[ModelDraft],
    ) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        state.replace_calls.push(ReplaceCall {
            tiers: tiers.to_vec(),
            models: models.to_vec(),
        });
        if let Some(err) = state.replace_error.clone() {
            return Err(err);
        }

        let snapshot = state.snapshot.as_mut().unwrap();
        let previous = std::mem::take(&mut snapshot.model);
        snapshot.tier_variation = tiers.to_vec();
        snapshot.model = models
            .iter()
            .map(|draft| {
                // Keep id and stock of models matched by sku
                let old = previous
                    .iter()
                    .find(|m| m.model_sku.is_some() && m.model_sku == draft.model_sku);
                Model {
                    model_id: old.and_then(|m| m.model_id),
                    model_sku: draft.model_sku.clone(),
                    tier_index: draft.tier_index.clone(),
                    available_stock: old.map(|m| m.available_stock).unwrap_or(0),
                    price: old.and_then(|m| m.price),
                }
            })
            .collect();
        Ok(())
    }

    async fn create_model(&self, _item_id: i64, model: &NewModel) -> StoreResult<i64> {
        let mut state = self.state.lock().unwrap();
        state.create_calls.push(model.clone());

        let result = match state.create_script.pop_front() {
            Some(scripted) => scripted,
            None => {
                state.next_model_id += 1;
                Ok(state.next_model_id)
            }
        };

        if let Ok(model_id) = result {
            let snapshot = state.snapshot.as_mut().unwrap();
            snapshot.model.push(Model {
                model_id: Some(model_id),
                model_sku: model.model_sku.clone(),
                tier_index: model.tier_index.clone(),
                available_stock: model.stock,
                price: Some(model.original_price),
            });
        }
        result
    }
}

pub fn model(id: i64, tier_index: Vec<u32>, stock: i64) -> Model {
    Model {
        model_id: Some(id),
        model_sku: Some(format!("SKU-{id}")),
        tier_index,
        available_stock: stock,
        price: None,
    }
}

pub fn snapshot(item_id: i64, tiers: Vec<TierVariation>, models: Vec<Model>) -> VariationSnapshot {
    VariationSnapshot {
        item_id,
        tier_variation: tiers,
        model: models,
    }
}

pub fn labels(tier: &TierVariation) -> Vec<String> {
    tier.option_list.iter().map(|o| o.option.clone()).collect()
}

pub fn tier_index_error() -> StoreError {
    StoreError::TierIndexNotReady("Model tier_index error".into())
}
