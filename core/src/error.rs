use crate::types::{CustomerId, IndexCaseId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Customer {id} not found in snapshot")]
    UnknownCustomer { id: CustomerId },

    #[error("Index case {id} not found in snapshot")]
    UnknownIndexCase { id: IndexCaseId },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

pub type EngineResult<T> = Result<T, EngineError>;
