//! Index remapping after option deletion
//!
//! Removing options shifts the positions of every later option in the same
//! tier. Models address options by position, so each surviving model's
//! tier index is rewritten through a per-tier old → new mapping. Models
//! that reference a removed option are dropped.

use std::collections::{BTreeMap, BTreeSet};

use shared::models::{Model, ModelDraft, OptionRef, TierVariation, VariationSnapshot};

use crate::error::{VariationError, VariationResult};

/// Result of removing a set of options from a tier structure
#[derive(Debug, Clone, PartialEq)]
pub struct RemapPlan {
    /// Tiers with the doomed options removed, remaining order unchanged
    pub tier_variation: Vec<TierVariation>,
    /// Surviving models with rewritten tier indices
    pub models: Vec<ModelDraft>,
    /// Models removed because they used a doomed option
    pub dropped: Vec<Model>,
    /// Per tier: old option index → new option index, survivors only
    pub mappings: Vec<BTreeMap<u32, u32>>,
}

impl RemapPlan {
    pub fn removed_option_count(&self, original: &[TierVariation]) -> usize {
        original
            .iter()
            .zip(&self.tier_variation)
            .map(|(before, after)| before.option_count() - after.option_count())
            .sum()
    }
}

/// Check a deletion selection against the snapshot and de-duplicate it
pub fn validate_selection(
    snapshot: &VariationSnapshot,
    selection: &[OptionRef],
) -> VariationResult<BTreeSet<OptionRef>> {
    if selection.is_empty() {
        return Err(VariationError::EmptySelection);
    }
    if !snapshot.has_tiers() {
        return Err(VariationError::NoTierVariation);
    }

    let mut doomed = BTreeSet::new();
    for sel in selection {
        let in_range = snapshot
            .tier(sel.tier_index as usize)
            .is_some_and(|t| (sel.option_index as usize) < t.option_count());
        if !in_range {
            return Err(VariationError::InvalidSelection {
                tier_index: sel.tier_index,
                option_index: sel.option_index,
            });
        }
        doomed.insert(*sel);
    }

    Ok(doomed)
}

/// Remove `doomed` options and rewrite surviving models
///
/// Fails with [`VariationError::EmptyTier`] if any tier would lose every
/// option. References outside the structure are ignored.
pub fn remap(
    tiers: &[TierVariation],
    models: &[Model],
    doomed: &BTreeSet<OptionRef>,
) -> VariationResult<RemapPlan> {
    let mut tier_variation = Vec::with_capacity(tiers.len());
    let mut mappings = Vec::with_capacity(tiers.len());

    for (tier_idx, tier) in tiers.iter().enumerate() {
        let mut mapping = BTreeMap::new();
        let mut option_list = Vec::with_capacity(tier.option_count());

        for (opt_idx, option) in tier.option_list.iter().enumerate() {
            let opt_ref = OptionRef::new(tier_idx as u32, opt_idx as u32);
            if doomed.contains(&opt_ref) {
                continue;
            }
            mapping.insert(opt_idx as u32, option_list.len() as u32);
            option_list.push(option.clone());
        }

        if option_list.is_empty() {
            return Err(VariationError::EmptyTier {
                tier_index: tier_idx as u32,
                tier_name: tier.name.clone(),
            });
        }

        tier_variation.push(TierVariation {
            name: tier.name.clone(),
            option_list,
        });
        mappings.push(mapping);
    }

    let mut kept = Vec::new();
    let mut dropped = Vec::new();

    for model in models {
        match remap_index(&model.tier_index, &mappings) {
            Some(tier_index) => kept.push(ModelDraft {
                tier_index,
                model_sku: model.model_sku.clone(),
            }),
            None => dropped.push(model.clone()),
        }
    }

    Ok(RemapPlan {
        tier_variation,
        models: kept,
        dropped,
        mappings,
    })
}

/// New tier index, or `None` if any component was removed or the index
/// does not have one entry per tier
fn remap_index(tier_index: &[u32], mappings: &[BTreeMap<u32, u32>]) -> Option<Vec<u32>> {
    if tier_index.len() != mappings.len() {
        return None;
    }
    tier_index
        .iter()
        .zip(mappings)
        .map(|(idx, mapping)| mapping.get(idx).copied())
        .collect()
}
