//! Snapshot loading: the two JSON documents the engine consumes.
//!
//! A snapshot is a complete, already-fetched pair of documents: an array of
//! customers (each with its `icuElements` log) and an array of index cases.
//! The synthetic "unknown" case is appended exactly once on load.
//! This is the only module that reads files.

use crate::{
    catalog::with_unknown_case,
    config::EngineConfig,
    error::{EngineError, EngineResult},
    model::{Customer, IndexCase},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub customers:   Vec<Customer>,
    pub index_cases: Vec<IndexCase>,
}

impl Snapshot {
    /// Build from already-parsed collections. Appends the unknown case.
    pub fn new(customers: Vec<Customer>, index_cases: Vec<IndexCase>) -> Self {
        Self {
            customers,
            index_cases: with_unknown_case(index_cases),
        }
    }

    /// Load `customers.json` and `index-cases.json` from `data_dir`.
    pub fn load(data_dir: &str) -> EngineResult<Self> {
        Self::load_with(data_dir, &EngineConfig::default())
    }

    /// Load using the file names from `config`.
    pub fn load_with(data_dir: &str, config: &EngineConfig) -> EngineResult<Self> {
        let dir = Path::new(data_dir);
        let customers: Vec<Customer> = read_json_file(&dir.join(&config.customers_file))?;
        let index_cases: Vec<IndexCase> = read_json_file(&dir.join(&config.index_cases_file))?;

        let snapshot = Self::new(customers, index_cases);
        log::info!(
            "snapshot loaded from {data_dir}: {} customers, {} elements, {} index cases",
            snapshot.customers.len(),
            snapshot.element_count(),
            snapshot.index_cases.len(),
        );
        Ok(snapshot)
    }

    /// Parse both documents from strings.
    pub fn from_json(customers_json: &str, index_cases_json: &str) -> EngineResult<Self> {
        let customers: Vec<Customer> = serde_json::from_str(customers_json)?;
        let index_cases: Vec<IndexCase> = serde_json::from_str(index_cases_json)?;
        Ok(Self::new(customers, index_cases))
    }

    pub fn element_count(&self) -> usize {
        self.customers.iter().map(|c| c.icu_elements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

pub(crate) fn read_json_file<T: DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let content = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}
