//! Option deletion against an in-memory store

mod support;

use shared::StoreError;
use shared::error::{AppError, ErrorCode};
use shared::http::StatusCode;
use shared::models::{OptionImage, OptionRef, TierVariation};
use support::{FakeStore, labels, model, snapshot};
use variation_engine::{EngineConfig, VariationEngine, VariationError};

const ITEM: i64 = 42;

fn engine(store: FakeStore) -> VariationEngine<FakeStore> {
    VariationEngine::with_config(store, EngineConfig::without_delays())
}

fn sizes() -> FakeStore {
    // Size [S, M, L]: S sold out, M stocked, L sold out
    FakeStore::new(snapshot(
        ITEM,
        vec![TierVariation::new("Size", ["S", "M", "L"])],
        vec![model(1, vec![0], 0), model(2, vec![1], 5), model(3, vec![2], 0)],
    ))
}

#[tokio::test]
async fn lists_only_sold_out_options() {
    let engine = engine(sizes());

    let options = engine.list_deletable_options(ITEM).await.unwrap();
    let names: Vec<_> = options.iter().map(|o| o.option_name.as_str()).collect();
    assert_eq!(names, vec!["S", "L"]);
    assert_eq!(engine.store().write_count(), 0);
}

#[tokio::test]
async fn single_tier_deletion_shifts_indices() {
    let engine = engine(sizes());

    let outcome = engine
        .delete_options(ITEM, &[OptionRef::new(0, 0)], None)
        .await
        .unwrap();

    assert_eq!(outcome.deleted_options, 1);
    assert_eq!(outcome.kept_models, 2);
    assert_eq!(outcome.dropped_models, 1);

    let calls = engine.store().replace_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(labels(&calls[0].tiers[0]), vec!["M", "L"]);

    let indices: Vec<_> = calls[0].models.iter().map(|m| m.tier_index.clone()).collect();
    assert_eq!(indices, vec![vec![0], vec![1]]);
    assert_eq!(calls[0].models[0].model_sku.as_deref(), Some("SKU-2"));

    // Stored state is consistent afterwards
    assert!(engine.store().snapshot().is_consistent());
}

#[tokio::test]
async fn two_tier_deletion_rewrites_both_axes() {
    let store = FakeStore::new(snapshot(
        ITEM,
        vec![
            TierVariation::new("Color", ["Red", "Blue", "Green"]),
            TierVariation::new("Size", ["S", "M"]),
        ],
        vec![
            model(1, vec![0, 0], 0),
            model(2, vec![0, 1], 3),
            model(3, vec![1, 0], 0),
            model(4, vec![1, 1], 0),
            model(5, vec![2, 0], 0),
            model(6, vec![2, 1], 7),
        ],
    ));
    let engine = engine(store);

    engine
        .delete_options(ITEM, &[OptionRef::new(0, 1), OptionRef::new(1, 0)], None)
        .await
        .unwrap();

    let after = engine.store().snapshot();
    assert_eq!(labels(&after.tier_variation[0]), vec!["Red", "Green"]);
    assert_eq!(labels(&after.tier_variation[1]), vec!["M"]);

    let kept: Vec<_> = after
        .model
        .iter()
        .map(|m| (m.model_id, m.tier_index.clone()))
        .collect();
    assert_eq!(kept, vec![(Some(2), vec![0, 0]), (Some(6), vec![1, 0])]);
    assert!(after.is_consistent());
}

#[tokio::test]
async fn emptying_a_tier_writes_nothing() {
    let store = FakeStore::new(snapshot(
        ITEM,
        vec![
            TierVariation::new("Color", ["Red", "Blue"]),
            TierVariation::new("Size", ["S"]),
        ],
        vec![model(1, vec![0, 0], 0), model(2, vec![1, 0], 0)],
    ));
    let engine = engine(store);

    let err = engine
        .delete_options(ITEM, &[OptionRef::new(1, 0)], None)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        VariationError::EmptyTier {
            tier_index: 1,
            tier_name: "Size".into()
        }
    );
    assert_eq!(engine.store().write_count(), 0);
}

#[tokio::test]
async fn empty_selection_skips_the_store() {
    let engine = engine(sizes());

    let err = engine.delete_options(ITEM, &[], None).await.unwrap_err();
    assert_eq!(err, VariationError::EmptySelection);
    assert_eq!(engine.store().fetch_count(), 0);
}

#[tokio::test]
async fn out_of_range_selection_is_rejected() {
    let engine = engine(sizes());

    let err = engine
        .delete_options(ITEM, &[OptionRef::new(0, 1), OptionRef::new(0, 9)], None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        VariationError::InvalidSelection {
            tier_index: 0,
            option_index: 9
        }
    );
    assert_eq!(engine.store().write_count(), 0);
}

#[tokio::test]
async fn item_without_tiers() {
    let engine = engine(FakeStore::new(snapshot(ITEM, vec![], vec![model(1, vec![], 4)])));

    assert!(engine.list_deletable_options(ITEM).await.unwrap().is_empty());
    let err = engine
        .delete_options(ITEM, &[OptionRef::new(0, 0)], None)
        .await
        .unwrap_err();
    assert_eq!(err, VariationError::NoTierVariation);
}

#[tokio::test]
async fn option_images_survive_deletion() {
    let mut tier = TierVariation::new("Color", ["Red", "Blue"]);
    tier.option_list[1].image = Some(OptionImage {
        image_id: "img-blue".into(),
        image_url: None,
    });
    let store = FakeStore::new(snapshot(
        ITEM,
        vec![tier],
        vec![model(1, vec![0], 0), model(2, vec![1], 2)],
    ));
    let engine = engine(store);

    engine
        .delete_options(ITEM, &[OptionRef::new(0, 0)], None)
        .await
        .unwrap();

    let calls = engine.store().replace_calls();
    let blue = &calls[0].tiers[0].option_list[0];
    assert_eq!(blue.option, "Blue");
    assert_eq!(blue.image.as_ref().map(|i| i.image_id.as_str()), Some("img-blue"));
}

#[tokio::test]
async fn report_version_pins_deletion() {
    let engine = engine(sizes());

    let report = engine.deletion_report(ITEM).await.unwrap();
    assert_eq!(report.total_models, 3);
    assert_eq!(report.zero_stock_count, 2);

    // Someone else adds an option between read and confirm
    engine.store().mutate(|s| {
        s.tier_variation[0]
            .option_list
            .push(shared::models::VariationOption::new("XL"));
    });

    let err = engine
        .delete_options(ITEM, &[OptionRef::new(0, 0)], Some(&report.version))
        .await
        .unwrap_err();
    assert!(matches!(err, VariationError::StaleSnapshot { .. }));
    assert_eq!(engine.store().write_count(), 0);

    // A fresh read goes through
    let fresh = engine.deletion_report(ITEM).await.unwrap();
    engine
        .delete_options(ITEM, &[OptionRef::new(0, 0)], Some(&fresh.version))
        .await
        .unwrap();
    assert_eq!(engine.store().replace_calls().len(), 1);
}

#[tokio::test]
async fn stock_changes_do_not_invalidate_version() {
    let engine = engine(sizes());
    let report = engine.deletion_report(ITEM).await.unwrap();

    engine.store().mutate(|s| s.model[1].available_stock = 0);

    assert!(
        engine
            .delete_options(ITEM, &[OptionRef::new(0, 0)], Some(&report.version))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn upstream_write_failure_is_surfaced() {
    let store = sizes();
    store.fail_replace(StoreError::Upstream("item is under review".into()));
    let engine = engine(store);

    let err = engine
        .delete_options(ITEM, &[OptionRef::new(0, 0)], None)
        .await
        .unwrap_err();
    assert_eq!(err, VariationError::Upstream("item is under review".into()));
}

#[tokio::test]
async fn unknown_item_is_upstream_error() {
    let engine = engine(sizes());
    let err = engine.list_deletable_options(7).await.unwrap_err();
    assert_eq!(err, VariationError::Upstream("item not found".into()));
}

#[tokio::test]
async fn rejected_write_mentioning_tier_index_is_terminal() {
    let store = sizes();
    store.fail_replace(StoreError::TierIndexNotReady("model tier_index is invalid".into()));
    let engine = engine(store);

    let err = engine
        .delete_options(ITEM, &[OptionRef::new(0, 0)], None)
        .await
        .unwrap_err();
    assert_eq!(err, VariationError::Upstream("model tier_index is invalid".into()));
    assert_eq!(engine.store().replace_calls().len(), 1);

    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::UpstreamError);
    assert_eq!(app.http_status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn options_listed_together_cannot_empty_their_tier() {
    let engine = engine(FakeStore::new(snapshot(
        ITEM,
        vec![TierVariation::new("Color", ["Red", "Blue"])],
        vec![model(1, vec![0], 0), model(2, vec![1], 0)],
    )));

    let listed: Vec<_> = engine
        .list_deletable_options(ITEM)
        .await
        .unwrap()
        .iter()
        .map(|o| OptionRef::new(o.tier_index, o.option_index))
        .collect();
    assert_eq!(listed, vec![OptionRef::new(0, 0), OptionRef::new(0, 1)]);

    let err = engine.delete_options(ITEM, &listed, None).await.unwrap_err();
    assert_eq!(
        err,
        VariationError::EmptyTier {
            tier_index: 0,
            tier_name: "Color".into()
        }
    );
    assert_eq!(engine.store().write_count(), 0);
}

#[tokio::test]
async fn stocked_sibling_keeps_its_option() {
    let engine = engine(FakeStore::new(snapshot(
        ITEM,
        vec![TierVariation::new("Color", ["Red", "Blue"])],
        vec![model(1, vec![0], 0), model(2, vec![1], 5)],
    )));

    let options = engine.list_deletable_options(ITEM).await.unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!((options[0].tier_index, options[0].option_index), (0, 0));
    assert_eq!(options[0].option_name, "Red");
    assert_eq!(options[0].affected_models, 1);
}

#[tokio::test]
async fn last_option_of_a_tier_is_never_listed() {
    let engine = engine(FakeStore::new(snapshot(
        ITEM,
        vec![TierVariation::new("Color", ["Red"])],
        vec![model(1, vec![0], 0)],
    )));

    assert!(engine.list_deletable_options(ITEM).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_both_ends_moves_middle_to_front() {
    let engine = engine(FakeStore::new(snapshot(
        ITEM,
        vec![TierVariation::new("Size", ["S", "M", "L"])],
        vec![model(1, vec![0], 0), model(2, vec![1], 4), model(3, vec![2], 0)],
    )));

    let outcome = engine
        .delete_options(ITEM, &[OptionRef::new(0, 0), OptionRef::new(0, 2)], None)
        .await
        .unwrap();
    assert_eq!(outcome.deleted_options, 2);
    assert_eq!(outcome.dropped_models, 2);

    let calls = engine.store().replace_calls();
    assert_eq!(labels(&calls[0].tiers[0]), vec!["M"]);
    assert_eq!(calls[0].models.len(), 1);
    assert_eq!(calls[0].models[0].tier_index, vec![0]);
    assert_eq!(calls[0].models[0].model_sku.as_deref(), Some("SKU-2"));
}
