//! Category extraction and the index-case catalog.
//!
//! Categories come from the raw snapshot, not from derived update cases:
//! they answer "which index cases does this customer collection mention at
//! all", for use when no first-class catalog is supplied.

use crate::{
    model::{Category, Customer, IndexCase, IndexCaseType},
    types::{IndexCaseId, UNKNOWN_INDEX_CASE_ID},
};
use indexmap::IndexSet;
use std::collections::HashMap;

pub const UNKNOWN_REPRESENTATIVE: &str = "Andere Frage";
pub const UNKNOWN_INDUSTRY: &str = "GENERAL";

/// Distinct index-case ids referenced by any raw element, first-seen order.
/// Elements without a reference contribute nothing.
pub fn extract_categories(customers: &[Customer]) -> Vec<Category> {
    let ids: IndexSet<IndexCaseId> = customers
        .iter()
        .flat_map(|c| c.icu_elements.iter())
        .filter_map(|e| e.index_case_id)
        .collect();

    ids.into_iter().map(|id| Category { id }).collect()
}

/// Same as `extract_categories`, ordered by id.
pub fn sorted_categories(customers: &[Customer]) -> Vec<Category> {
    let mut categories = extract_categories(customers);
    categories.sort_by_key(|c| c.id);
    categories
}

/// The synthetic "unknown/other" case.
pub fn unknown_case() -> IndexCase {
    IndexCase::new(UNKNOWN_INDEX_CASE_ID, UNKNOWN_REPRESENTATIVE, IndexCaseType::Unknown)
        .with_industry(UNKNOWN_INDUSTRY)
}

/// Append the synthetic case unless the catalog already has id 0.
pub fn with_unknown_case(mut index_cases: Vec<IndexCase>) -> Vec<IndexCase> {
    if !index_cases.iter().any(|ic| ic.id == UNKNOWN_INDEX_CASE_ID) {
        index_cases.push(unknown_case());
    }
    index_cases
}

// ── Catalog ──────────────────────────────────────────────────────────────────

/// Read-only id lookup over an index-case list. Load order is preserved.
#[derive(Debug, Clone, Default)]
pub struct IndexCaseCatalog<'a> {
    cases: &'a [IndexCase],
    by_id: HashMap<IndexCaseId, usize>,
}

impl<'a> IndexCaseCatalog<'a> {
    pub fn new(cases: &'a [IndexCase]) -> Self {
        let mut by_id = HashMap::with_capacity(cases.len());
        for (pos, ic) in cases.iter().enumerate() {
            // First definition wins, like a linear find.
            by_id.entry(ic.id).or_insert(pos);
        }
        Self { cases, by_id }
    }

    pub fn get(&self, id: IndexCaseId) -> Option<&'a IndexCase> {
        self.by_id.get(&id).map(|&pos| &self.cases[pos])
    }

    /// Lookup through an optional reference, as carried by update cases.
    pub fn resolve(&self, id: Option<IndexCaseId>) -> Option<&'a IndexCase> {
        id.and_then(|id| self.get(id))
    }

    pub fn contains(&self, id: IndexCaseId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn label(&self, id: IndexCaseId) -> Option<&'a str> {
        self.get(id).map(|ic| ic.representative.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a IndexCase> + 'a {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Every case whose representative contains `term` (case-sensitive).
    pub fn search(&self, term: &str) -> Vec<&'a IndexCase> {
        self.cases
            .iter()
            .filter(|ic| ic.representative.contains(term))
            .collect()
    }
}
