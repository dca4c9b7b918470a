//! Aggregation layer: read-only views over a derived update-case set.
//!
//! RULE: every function here is a pure transform. Nothing is cached and
//! nothing mutates its inputs; a filter change means calling them again.
//! Empty inputs always produce empty outputs.

mod graph;
mod matrix;
mod ranking;

pub use graph::{build_graph, EdgeWeighting, Graph, GraphLink, GraphNode};
pub use matrix::{build_matrix, Cell, CellMatch, Matrix, MatrixLayout, Orientation};
pub use ranking::{
    rank_customers, rank_index_cases, topic_hierarchy, update_type_breakdown,
    CustomerActivity, HierarchyLeaf, IndexCaseActivity, TopicGroup, TypeGroup,
    UpdateTypeBreakdown, UNGROUPED_TOPIC,
};

use crate::{
    model::{Customer, UpdateCase, UpdateType},
    types::{CustomerId, IndexCaseId},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, hash::Hash};

// ── Counts ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count<K> {
    pub key:   K,
    pub count: usize,
}

/// Group update cases by `key_fn`. Entries appear in first-occurrence order;
/// that order is presentational only.
pub fn count_by<K, F>(update_cases: &[UpdateCase], key_fn: F) -> Vec<Count<K>>
where
    K: Hash + Eq,
    F: Fn(&UpdateCase) -> K,
{
    let mut counts: IndexMap<K, usize> = IndexMap::new();
    for uc in update_cases {
        *counts.entry(key_fn(uc)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(key, count)| Count { key, count })
        .collect()
}

/// Key: target index case. Records without a target group under `None`.
pub fn by_index_case(uc: &UpdateCase) -> Option<IndexCaseId> {
    uc.index_case_id
}

pub fn by_customer(uc: &UpdateCase) -> CustomerId {
    uc.customer_id
}

pub fn by_update_type(uc: &UpdateCase) -> UpdateType {
    uc.update_type
}

// ── Focus filters ────────────────────────────────────────────────────────────

/// Update cases that target `index_case_id` or moved away from it.
pub fn touching_index_case(update_cases: &[UpdateCase], index_case_id: IndexCaseId) -> Vec<UpdateCase> {
    update_cases
        .iter()
        .filter(|uc| uc.touches(index_case_id))
        .cloned()
        .collect()
}

pub fn for_customer(update_cases: &[UpdateCase], customer_id: CustomerId) -> Vec<UpdateCase> {
    update_cases
        .iter()
        .filter(|uc| uc.customer_id == customer_id)
        .cloned()
        .collect()
}

/// Customers whose raw log mentions `index_case_id` at least once.
pub fn customers_referencing(customers: &[Customer], index_case_id: IndexCaseId) -> Vec<Customer> {
    customers
        .iter()
        .filter(|c| {
            c.icu_elements
                .iter()
                .any(|e| e.index_case_id == Some(index_case_id))
        })
        .cloned()
        .collect()
}

/// Update cases per target index case. Records without a target are skipped.
pub(crate) fn target_counts(update_cases: &[UpdateCase]) -> HashMap<IndexCaseId, usize> {
    let mut counts = HashMap::new();
    for id in update_cases.iter().filter_map(|uc| uc.index_case_id) {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}
