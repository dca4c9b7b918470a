//! Ranked and hierarchical feeds for the bar and circle-packing charts.
//!
//! Labels are attached through these view structs; the snapshot records
//! themselves are never annotated.

use super::target_counts;
use crate::{
    catalog::IndexCaseCatalog,
    model::{Customer, IndexCase, IndexCaseType, UpdateCase, UpdateType},
    types::{CustomerId, IndexCaseId},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Topic name used for index cases without a topic.
pub const UNGROUPED_TOPIC: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerActivity {
    pub id:                CustomerId,
    pub name:              String,
    pub update_case_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexCaseActivity {
    pub id:                IndexCaseId,
    pub label:             String,
    pub update_case_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTypeBreakdown {
    pub index_case_id: IndexCaseId,
    pub label:         String,
    pub new:           usize,
    pub update:        usize,
    pub delete:        usize,
}

impl UpdateTypeBreakdown {
    pub fn total(&self) -> usize {
        self.new + self.update + self.delete
    }

    pub fn get(&self, update_type: UpdateType) -> usize {
        match update_type {
            UpdateType::New    => self.new,
            UpdateType::Update => self.update,
            UpdateType::Delete => self.delete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyLeaf {
    pub id:   IndexCaseId,
    pub name: String,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeGroup {
    pub case_type: IndexCaseType,
    pub cases:     Vec<HierarchyLeaf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicGroup {
    pub topic: String,
    pub types: Vec<TypeGroup>,
}

// ── Ranked counts ────────────────────────────────────────────────────────────

/// Update-case count per customer, highest first. Equal counts keep input
/// order. Customers with no records are listed with a zero count.
pub fn rank_customers(
    customers: &[Customer],
    update_cases: &[UpdateCase],
    top: Option<usize>,
) -> Vec<CustomerActivity> {
    let mut per_customer: HashMap<CustomerId, usize> = HashMap::new();
    for uc in update_cases {
        *per_customer.entry(uc.customer_id).or_insert(0) += 1;
    }

    let mut ranked: Vec<CustomerActivity> = customers
        .iter()
        .map(|c| CustomerActivity {
            id: c.id,
            name: c.name.clone(),
            update_case_count: per_customer.get(&c.id).copied().unwrap_or(0),
        })
        .collect();

    ranked.sort_by(|a, b| b.update_case_count.cmp(&a.update_case_count));
    truncate(&mut ranked, top);
    ranked
}

/// Update cases targeting each index case, highest first.
pub fn rank_index_cases(
    index_cases: &[IndexCase],
    update_cases: &[UpdateCase],
    top: Option<usize>,
) -> Vec<IndexCaseActivity> {
    let targets = target_counts(update_cases);

    let mut ranked: Vec<IndexCaseActivity> = index_cases
        .iter()
        .map(|ic| IndexCaseActivity {
            id: ic.id,
            label: ic.representative.clone(),
            update_case_count: targets.get(&ic.id).copied().unwrap_or(0),
        })
        .collect();

    ranked.sort_by(|a, b| b.update_case_count.cmp(&a.update_case_count));
    truncate(&mut ranked, top);
    ranked
}

/// NEW/UPDATE/DELETE counts per index case for one customer, largest total
/// first. Index cases missing from the catalog are left out.
pub fn update_type_breakdown(
    index_cases: &[IndexCase],
    update_cases: &[UpdateCase],
    customer_id: CustomerId,
) -> Vec<UpdateTypeBreakdown> {
    let catalog = IndexCaseCatalog::new(index_cases);
    let mut groups: IndexMap<IndexCaseId, UpdateTypeBreakdown> = IndexMap::new();

    for uc in update_cases.iter().filter(|uc| uc.customer_id == customer_id) {
        let Some(case) = catalog.resolve(uc.index_case_id) else {
            continue;
        };
        let entry = groups.entry(case.id).or_insert_with(|| UpdateTypeBreakdown {
            index_case_id: case.id,
            label: case.representative.clone(),
            new: 0,
            update: 0,
            delete: 0,
        });
        match uc.update_type {
            UpdateType::New    => entry.new += 1,
            UpdateType::Update => entry.update += 1,
            UpdateType::Delete => entry.delete += 1,
        }
    }

    let mut breakdown: Vec<UpdateTypeBreakdown> = groups.into_values().collect();
    breakdown.sort_by(|a, b| b.total().cmp(&a.total()));
    breakdown
}

// ── Hierarchy ────────────────────────────────────────────────────────────────

/// Topic → type → index case, sized by target count. Empty leaves, then
/// empty groups, are removed. Groups keep first-seen catalog order.
pub fn topic_hierarchy(index_cases: &[IndexCase], update_cases: &[UpdateCase]) -> Vec<TopicGroup> {
    let targets = target_counts(update_cases);
    let mut nested: IndexMap<&str, IndexMap<IndexCaseType, Vec<HierarchyLeaf>>> = IndexMap::new();

    for ic in index_cases {
        let topic = ic.topic.as_deref().unwrap_or(UNGROUPED_TOPIC);
        let leaves = nested.entry(topic).or_default().entry(ic.case_type).or_default();
        let size = targets.get(&ic.id).copied().unwrap_or(0);
        if size > 0 {
            leaves.push(HierarchyLeaf {
                id: ic.id,
                name: ic.representative.clone(),
                size,
            });
        }
    }

    nested
        .into_iter()
        .filter_map(|(topic, types)| {
            let types: Vec<TypeGroup> = types
                .into_iter()
                .filter(|(_, cases)| !cases.is_empty())
                .map(|(case_type, cases)| TypeGroup { case_type, cases })
                .collect();
            (!types.is_empty()).then(|| TopicGroup {
                topic: topic.to_string(),
                types,
            })
        })
        .collect()
}

fn truncate<T>(ranked: &mut Vec<T>, top: Option<usize>) {
    if let Some(top) = top {
        ranked.truncate(top);
    }
}
