//! Error types for the dependency tracker
//!
//! Only caller mistakes and unsupported graphs are errors. Malformed
//! declarations degrade to poisoned scopes and never show up here.

use thiserror::Error;

use crate::unit::UnitId;

pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("'{name}' is not a module")]
    NotAModule { name: String },

    #[error("'{name}' is not a standalone component or directive")]
    NotStandalone { name: String },

    #[error("unit {0} is not registered")]
    UnknownUnit(UnitId),

    #[error("cyclic module import: {}", chain.join(" → "))]
    CyclicImport { chain: Vec<String> },

    #[error("module nesting deeper than {limit}")]
    DepthExceeded { limit: usize },

    #[error("a unit named '{0}' is already declared")]
    DuplicateName(String),

    #[error("tracker is already borrowed; dependency query re-entered")]
    Reentrant,
}

/// Error type for the JSON manifest loader
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("invalid manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unit '{name}': unknown kind '{kind}'")]
    UnknownKind { name: String, kind: String },

    #[error("unit '{name}': only modules may list {field}")]
    NotAModuleField { name: String, field: &'static str },

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}
