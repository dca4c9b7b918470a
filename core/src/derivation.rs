//! Derivation engine: turns each customer's raw ICU log into update cases.
//!
//! RULES:
//!   - Elements are processed in ascending element-id order (stable sort,
//!     ties keep delivery order). The sort happens on a private view; the
//!     snapshot is never mutated.
//!   - Two neighbouring elements with different index cases that the merge
//!     rule accepts form one UPDATE. The update's `source` is the second
//!     element's index case.
//!   - If that second element is a DELETE it is a pseudo-delete and is
//!     consumed. Otherwise it is re-examined as the next `current`.
//!   - Every other element is emitted verbatim with its upstream tag.
//!   - Customers are independent; results are concatenated in input order.

use crate::{
    model::{Customer, RawElement, UpdateCase, UpdateType, UpstreamType},
    types::{CustomerId, IndexCaseId},
};
use serde::{Deserialize, Serialize};

// ── Merge rules ──────────────────────────────────────────────────────────────

/// Decides whether two neighbouring elements with different index cases
/// describe a single move.
pub trait MergePredicate {
    fn merges(&self, current: &RawElement, next: &RawElement) -> bool;
}

impl<F> MergePredicate for F
where
    F: Fn(&RawElement, &RawElement) -> bool,
{
    fn merges(&self, current: &RawElement, next: &RawElement) -> bool {
        self(current, next)
    }
}

/// The two rule sets seen in upstream history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeRule {
    /// Same surface text.
    #[default]
    Surface,
    /// Same surface text and same timestamp. Two absent timestamps are equal.
    SurfaceAndTimestamp,
}

impl MergePredicate for MergeRule {
    fn merges(&self, current: &RawElement, next: &RawElement) -> bool {
        match self {
            Self::Surface => current.surface == next.surface,
            Self::SurfaceAndTimestamp => {
                current.surface == next.surface && current.time_stamp == next.time_stamp
            }
        }
    }
}

// ── Entry points ─────────────────────────────────────────────────────────────

/// Derive update cases with the default rule (`MergeRule::Surface`).
pub fn derive_update_cases(customers: &[Customer]) -> Vec<UpdateCase> {
    derive_update_cases_with(customers, &MergeRule::default())
}

/// Derive update cases with an explicit merge rule.
pub fn derive_update_cases_with<R>(customers: &[Customer], rule: &R) -> Vec<UpdateCase>
where
    R: MergePredicate + ?Sized,
{
    let mut update_cases = Vec::new();
    let mut element_total = 0usize;
    let mut pseudo_delete_total = 0usize;

    for customer in customers {
        let before = update_cases.len();
        let pseudo_deletes = derive_customer(customer, rule, &mut update_cases);

        log::debug!(
            "customer={} derived {} update cases from {} elements ({} pseudo-deletes)",
            customer.id,
            update_cases.len() - before,
            customer.icu_elements.len(),
            pseudo_deletes,
        );

        element_total += customer.icu_elements.len();
        pseudo_delete_total += pseudo_deletes;
    }

    log::info!(
        "derivation: {} customers, {} elements -> {} update cases ({} pseudo-deletes merged)",
        customers.len(),
        element_total,
        update_cases.len(),
        pseudo_delete_total,
    );

    update_cases
}

/// Walk one customer's log, appending to `out`. Returns the number of
/// pseudo-deletes that were merged away.
fn derive_customer<R>(customer: &Customer, rule: &R, out: &mut Vec<UpdateCase>) -> usize
where
    R: MergePredicate + ?Sized,
{
    let mut elements: Vec<&RawElement> = customer.icu_elements.iter().collect();
    // sort_by_key is stable.
    elements.sort_by_key(|e| e.id);

    let mut pseudo_deletes = 0usize;
    let mut i = 0usize;

    while i < elements.len() {
        let current = elements[i];

        match elements.get(i + 1) {
            Some(next)
                if current.index_case_id != next.index_case_id && rule.merges(current, next) =>
            {
                out.push(emit(customer.id, current, UpdateType::Update, next.index_case_id));

                if next.upstream_type == UpstreamType::Delete {
                    pseudo_deletes += 1;
                    i += 2;
                } else {
                    i += 1;
                }
            }
            _ => {
                out.push(emit(customer.id, current, current.upstream_type.into(), None));
                i += 1;
            }
        }
    }

    pseudo_deletes
}

fn emit(
    customer_id: CustomerId,
    element: &RawElement,
    update_type: UpdateType,
    source: Option<IndexCaseId>,
) -> UpdateCase {
    UpdateCase {
        id: format!("{customer_id}-{}", element.id),
        customer_id,
        element_id: element.id,
        index_case_id: element.index_case_id,
        update_type,
        source,
        surface: element.surface.clone(),
        time_stamp: element.time_stamp.clone(),
    }
}
