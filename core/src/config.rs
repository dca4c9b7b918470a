use crate::{
    aggregate::{EdgeWeighting, MatrixLayout},
    derivation::MergeRule,
    error::{EngineError, EngineResult},
    snapshot::read_json_file,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional per-data-dir override file.
pub const CONFIG_FILE: &str = "engine.json";

pub const DEFAULT_CUSTOMERS_FILE: &str = "customers.json";
pub const DEFAULT_INDEX_CASES_FILE: &str = "index-cases.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub merge_rule:       MergeRule,
    pub edge_weighting:   EdgeWeighting,
    pub matrix:           MatrixLayout,
    /// Truncation for ranked feeds. `None` keeps every entry.
    pub top:              Option<usize>,
    pub customers_file:   String,
    pub index_cases_file: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            merge_rule:       MergeRule::Surface,
            edge_weighting:   EdgeWeighting::Ordered,
            matrix:           MatrixLayout::default(),
            top:              None,
            customers_file:   DEFAULT_CUSTOMERS_FILE.into(),
            index_cases_file: DEFAULT_INDEX_CASES_FILE.into(),
        }
    }
}

impl EngineConfig {
    /// Load `<data_dir>/engine.json`, falling back to defaults when the file
    /// does not exist. A file that exists but does not parse is an error.
    /// In tests, use EngineConfig::default_test().
    pub fn load(data_dir: &str) -> EngineResult<Self> {
        let path = Path::new(data_dir).join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("{} not found, using default engine config", path.display());
            return Ok(Self::default());
        }

        let config: Self = read_json_file(&path)?;
        config.validate()?;
        log::info!(
            "loaded engine config from {} (merge_rule={:?}, edge_weighting={:?})",
            path.display(),
            config.merge_rule,
            config.edge_weighting,
        );
        Ok(config)
    }

    /// Config with hardcoded values for use in tests.
    pub fn default_test() -> Self {
        Self {
            merge_rule:       MergeRule::Surface,
            edge_weighting:   EdgeWeighting::Ordered,
            matrix:           MatrixLayout::default(),
            top:              Some(10),
            customers_file:   DEFAULT_CUSTOMERS_FILE.into(),
            index_cases_file: DEFAULT_INDEX_CASES_FILE.into(),
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.top == Some(0) {
            return Err(EngineError::Config {
                reason: "top must be at least 1 (omit it to keep every entry)".into(),
            });
        }
        if self.customers_file.trim().is_empty() || self.index_cases_file.trim().is_empty() {
            return Err(EngineError::Config {
                reason: "snapshot file names must not be empty".into(),
            });
        }
        Ok(())
    }
}
