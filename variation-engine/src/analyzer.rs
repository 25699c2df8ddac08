//! Deletion candidate analysis
//!
//! An option may be offered for deletion when:
//! - at least one model references it (unused options are left alone)
//! - every model referencing it has zero available stock
//! - its tier has at least two options, so one survives
//!
//! Models with a tier index shorter than the tier count simply do not
//! reference options in the missing tiers.

use shared::models::{DeletableOption, DeletionReport, Model, VariationSnapshot};

/// Options safe to delete, in (tier, option) order
pub fn deletable_options(snapshot: &VariationSnapshot) -> Vec<DeletableOption> {
    let mut out = Vec::new();

    for (tier_idx, tier) in snapshot.tier_variation.iter().enumerate() {
        if tier.option_count() < 2 {
            continue;
        }

        for (opt_idx, option) in tier.option_list.iter().enumerate() {
            let opt_idx = opt_idx as u32;
            let users: Vec<&Model> = snapshot.models_at(tier_idx, opt_idx).collect();

            if users.is_empty() || !users.iter().all(|m| m.is_out_of_stock()) {
                continue;
            }

            out.push(DeletableOption {
                tier_index: tier_idx as u32,
                option_index: opt_idx,
                tier_name: tier.name.clone(),
                option_name: option.option.clone(),
                affected_models: users.len(),
            });
        }
    }

    out
}

/// Deletable options plus the context a confirmation dialog needs
pub fn deletion_report(snapshot: &VariationSnapshot) -> DeletionReport {
    let zero_stock_models: Vec<Model> = snapshot
        .model
        .iter()
        .filter(|m| m.is_out_of_stock())
        .cloned()
        .collect();

    DeletionReport {
        item_id: snapshot.item_id,
        tier_variation: snapshot.tier_variation.clone(),
        deletable_options: deletable_options(snapshot),
        zero_stock_count: zero_stock_models.len(),
        zero_stock_models,
        total_models: snapshot.model.len(),
        version: snapshot.fingerprint(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TierVariation;

    fn model(id: i64, tier_index: Vec<u32>, stock: i64) -> Model {
        Model {
            model_id: Some(id),
            model_sku: None,
            tier_index,
            available_stock: stock,
            price: None,
        }
    }

    fn snapshot(tiers: Vec<TierVariation>, models: Vec<Model>) -> VariationSnapshot {
        VariationSnapshot {
            item_id: 1,
            tier_variation: tiers,
            model: models,
        }
    }

    #[test]
    fn test_single_tier_zero_stock_option() {
        // Size [S, M, L]; S has stock 0, M has 5, L unused
        let snap = snapshot(
            vec![TierVariation::new("Size", ["S", "M", "L"])],
            vec![model(1, vec![0], 0), model(2, vec![1], 5)],
        );

        let result = deletable_options(&snap);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].tier_index, 0);
        assert_eq!(result[0].option_index, 0);
        assert_eq!(result[0].tier_name, "Size");
        assert_eq!(result[0].option_name, "S");
        assert_eq!(result[0].affected_models, 1);
    }

    #[test]
    fn test_unused_option_is_not_deletable() {
        let snap = snapshot(
            vec![TierVariation::new("Size", ["S", "M"])],
            vec![model(1, vec![0], 3)],
        );
        assert!(deletable_options(&snap).is_empty());
    }

    #[test]
    fn test_any_stocked_model_blocks_option() {
        let snap = snapshot(
            vec![
                TierVariation::new("Color", ["Red", "Blue"]),
                TierVariation::new("Size", ["S", "M"]),
            ],
            vec![
                model(1, vec![0, 0], 0),
                model(2, vec![0, 1], 2),
                model(3, vec![1, 0], 0),
                model(4, vec![1, 1], 0),
            ],
        );

        let refs: Vec<_> = deletable_options(&snap)
            .iter()
            .map(|d| (d.tier_index, d.option_index))
            .collect();
        // Red has a stocked model; Size/M has one too
        assert_eq!(refs, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_single_option_tier_never_deletable() {
        let snap = snapshot(
            vec![
                TierVariation::new("Color", ["Red"]),
                TierVariation::new("Size", ["S", "M"]),
            ],
            vec![model(1, vec![0, 0], 0), model(2, vec![0, 1], 0)],
        );

        let result = deletable_options(&snap);
        assert!(result.iter().all(|d| d.tier_index == 1));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_no_tiers_means_nothing_to_delete() {
        let snap = snapshot(vec![], vec![model(1, vec![], 0)]);
        assert!(deletable_options(&snap).is_empty());
    }

    #[test]
    fn test_report_counts() {
        let snap = snapshot(
            vec![TierVariation::new("Size", ["S", "M", "L"])],
            vec![
                model(1, vec![0], 0),
                model(2, vec![1], 5),
                model(3, vec![2], 0),
            ],
        );

        let report = deletion_report(&snap);
        assert_eq!(report.total_models, 3);
        assert_eq!(report.zero_stock_count, 2);
        assert_eq!(report.zero_stock_models.len(), 2);
        assert_eq!(report.deletable_options.len(), 2);
        assert_eq!(report.version, snap.fingerprint());
    }
}
