//! Same snapshot in, same views out.
//!
//! Every view is a pure function of the visible snapshot and the config.
//! Two runs over the shipped sample data must serialize byte-identically,
//! and the sample's known shape must not drift.

use icu_core::{
    config::EngineConfig,
    dashboard::compute_views,
    derivation::{derive_update_cases, derive_update_cases_with, MergeRule},
    model::UpdateType,
    snapshot::Snapshot,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample_dir() -> String {
    format!("{}/../data", env!("CARGO_MANIFEST_DIR"))
}

fn load_sample() -> (Snapshot, EngineConfig) {
    init_logging();
    let dir = sample_dir();
    let config = EngineConfig::load(&dir).expect("sample engine.json");
    let snapshot = Snapshot::load_with(&dir, &config).expect("sample snapshot");
    (snapshot, config)
}

fn updates(update_cases: &[icu_core::model::UpdateCase]) -> usize {
    update_cases.iter().filter(|uc| uc.update_type == UpdateType::Update).count()
}

#[test]
fn same_snapshot_produces_identical_views() {
    let (snapshot, config) = load_sample();

    let a = compute_views(&snapshot.customers, &snapshot.index_cases, &config);
    let b = compute_views(&snapshot.customers, &snapshot.index_cases, &config);

    assert_eq!(a, b);
    let json_a = serde_json::to_string(&a).expect("serialize");
    let json_b = serde_json::to_string(&b).expect("serialize");
    assert_eq!(json_a, json_b, "views diverged between identical runs");
}

#[test]
fn derivation_does_not_touch_its_input() {
    let (snapshot, _) = load_sample();
    let before = snapshot.clone();

    let first = derive_update_cases(&snapshot.customers);
    let second = derive_update_cases(&snapshot.customers);

    assert_eq!(snapshot, before, "raw snapshot must stay as loaded");
    assert_eq!(first, second);
}

#[test]
fn sample_snapshot_has_expected_shape() {
    let (snapshot, config) = load_sample();

    assert_eq!(config.merge_rule, MergeRule::Surface);
    assert_eq!(config.top, Some(10));
    assert_eq!(snapshot.customers.len(), 3);
    assert_eq!(snapshot.element_count(), 11);

    let update_cases = derive_update_cases(&snapshot.customers);
    assert_eq!(update_cases.len(), 9, "two pseudo-deletes merged away");
    assert_eq!(updates(&update_cases), 3);
    for customer in &snapshot.customers {
        let derived = update_cases.iter().filter(|uc| uc.customer_id == customer.id).count();
        assert!(derived <= customer.icu_elements.len());
    }
}

#[test]
fn timestamp_rule_splits_moves_with_differing_times() {
    let (snapshot, _) = load_sample();

    let update_cases = derive_update_cases_with(&snapshot.customers, &MergeRule::SurfaceAndTimestamp);

    assert_eq!(update_cases.len(), 9);
    assert_eq!(updates(&update_cases), 2, "customer 2180 moved at two different times");
}

#[test]
fn sample_views_are_consistent() {
    let (snapshot, config) = load_sample();

    let views = compute_views(&snapshot.customers, &snapshot.index_cases, &config);

    let total: usize = views.by_update_type.iter().map(|c| c.count).sum();
    assert_eq!(total, views.update_cases.len());

    assert_eq!(views.graph.links.len(), 2);
    let fee = views.graph.link_between(101, 103).expect("101 -> 103 transition");
    assert_eq!((fee.source, fee.target, fee.value), (101, 103, 2));
    assert_eq!(views.graph.node(101).map(|n| n.count), Some(2));

    let ranked: Vec<u64> = views.top_customers.iter().map(|c| c.id).collect();
    assert_eq!(ranked, vec![2180, 2179, 2181]);

    let matrix_sum: usize = views.matrix.cells.iter().map(|c| c.value).sum();
    assert_eq!(matrix_sum, views.update_cases.len(), "every target resolves in the catalog");
}
