//! CLI 错误类型

use depscope_core::{ManifestError, TrackerError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("cannot open '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error("no unit named '{0}' in the manifest")]
    UnknownUnit(String),

    #[error("unknown log level '{0}' (expected error, warn, info, debug or trace)")]
    UnknownLogLevel(String),

    #[error("failed to initialise logging: {0}")]
    LogInit(String),

    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}
