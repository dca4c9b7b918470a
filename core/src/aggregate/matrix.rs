//! Dense customer × index-case frequency matrix.

use crate::{
    model::{Customer, IndexCase, UpdateCase},
    types::{CustomerId, IndexCaseId},
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Rows are index cases, columns are customers (heatmap).
    #[default]
    IndexCaseRows,
    /// Rows are customers, columns are index cases (table).
    CustomerRows,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellMatch {
    /// A record counts for the index case it targets.
    #[default]
    Target,
    /// A record also counts for the index case it moved away from.
    TargetOrSource,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct MatrixLayout {
    pub orientation: Orientation,
    pub cell_match:  CellMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row:   usize,
    pub col:   usize,
    pub value: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matrix {
    pub orientation: Orientation,
    /// Surviving customers, in input order.
    pub customers:   Vec<CustomerId>,
    /// Surviving index cases, in input order.
    pub index_cases: Vec<IndexCaseId>,
    /// Row-major, one cell per surviving (row, col) pair.
    pub cells:       Vec<Cell>,
}

impl Matrix {
    pub fn row_count(&self) -> usize {
        match self.orientation {
            Orientation::IndexCaseRows => self.index_cases.len(),
            Orientation::CustomerRows  => self.customers.len(),
        }
    }

    pub fn col_count(&self) -> usize {
        match self.orientation {
            Orientation::IndexCaseRows => self.customers.len(),
            Orientation::CustomerRows  => self.index_cases.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn value(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.row_count() || col >= self.col_count() {
            return None;
        }
        self.cells.get(row * self.col_count() + col).map(|c| c.value)
    }

    pub fn max_value(&self) -> usize {
        self.cells.iter().map(|c| c.value).max().unwrap_or(0)
    }
}

/// Build the matrix. Customers and index cases with no matching record are
/// dropped first, so no row or column of the result is all-zero. Only records
/// whose customer and index case are both in the supplied collections count.
pub fn build_matrix(
    customers: &[Customer],
    index_cases: &[IndexCase],
    update_cases: &[UpdateCase],
    layout: MatrixLayout,
) -> Matrix {
    let customer_ids: HashSet<CustomerId> = customers.iter().map(|c| c.id).collect();
    let case_ids: HashSet<IndexCaseId> = index_cases.iter().map(|ic| ic.id).collect();

    let mut pair_counts: HashMap<(CustomerId, IndexCaseId), usize> = HashMap::new();
    for uc in update_cases {
        if !customer_ids.contains(&uc.customer_id) {
            continue;
        }
        for case_id in matched_cases(uc, layout.cell_match) {
            if case_ids.contains(&case_id) {
                *pair_counts.entry((uc.customer_id, case_id)).or_insert(0) += 1;
            }
        }
    }

    let active_customers: HashSet<CustomerId> = pair_counts.keys().map(|&(c, _)| c).collect();
    let active_cases: HashSet<IndexCaseId> = pair_counts.keys().map(|&(_, ic)| ic).collect();

    let customers: Vec<CustomerId> = customers
        .iter()
        .map(|c| c.id)
        .filter(|id| active_customers.contains(id))
        .collect();
    let index_cases: Vec<IndexCaseId> = index_cases
        .iter()
        .map(|ic| ic.id)
        .filter(|id| active_cases.contains(id))
        .collect();

    let value = |customer: CustomerId, case_id: IndexCaseId| {
        pair_counts.get(&(customer, case_id)).copied().unwrap_or(0)
    };

    let mut cells = Vec::with_capacity(customers.len() * index_cases.len());
    match layout.orientation {
        Orientation::IndexCaseRows => {
            for (row, &case_id) in index_cases.iter().enumerate() {
                for (col, &customer) in customers.iter().enumerate() {
                    cells.push(Cell { row, col, value: value(customer, case_id) });
                }
            }
        }
        Orientation::CustomerRows => {
            for (row, &customer) in customers.iter().enumerate() {
                for (col, &case_id) in index_cases.iter().enumerate() {
                    cells.push(Cell { row, col, value: value(customer, case_id) });
                }
            }
        }
    }

    log::debug!(
        "matrix: {} customers x {} index cases ({} cells, {:?})",
        customers.len(),
        index_cases.len(),
        cells.len(),
        layout.orientation,
    );

    Matrix {
        orientation: layout.orientation,
        customers,
        index_cases,
        cells,
    }
}

/// The index cases a record counts towards, each at most once.
fn matched_cases(uc: &UpdateCase, cell_match: CellMatch) -> impl Iterator<Item = IndexCaseId> {
    let source = match cell_match {
        CellMatch::Target => None,
        CellMatch::TargetOrSource => uc.source.filter(|s| Some(*s) != uc.index_case_id),
    };
    uc.index_case_id.into_iter().chain(source)
}
