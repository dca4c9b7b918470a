//! ICU update-case engine.
//!
//! Derives the semantic history of each customer's index-case assignments
//! from a raw element log, and builds the aggregate views a dashboard draws:
//! counts, a customer × index-case matrix and a transition graph.
//!
//! DATA FLOW (fixed):
//!   1. snapshot    load customers + index cases (only module doing I/O)
//!   2. derivation  raw elements -> update cases
//!   3. catalog     categories referenced by the raw snapshot
//!   4. aggregate   counts, matrix, graph, ranked feeds
//!   5. filter      visibility flags; changes trigger a dashboard refresh

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod derivation;
pub mod error;
pub mod filter;
pub mod model;
pub mod snapshot;
pub mod types;

pub use aggregate::{build_graph, build_matrix, count_by};
pub use catalog::extract_categories;
pub use derivation::{derive_update_cases, derive_update_cases_with, MergeRule};
pub use error::{EngineError, EngineResult};
