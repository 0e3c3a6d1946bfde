//! Depscope Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! The tracker, the manifest loader and the CLI all share this vocabulary.

use serde::{Deserialize, Serialize};

/// What the module resolver does when it re-enters a module that is still
/// being computed (`A imports B imports A`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Fail with a cyclic-import error carrying the full chain
    #[default]
    Error,
    /// Treat the re-entered module as poisoned and keep going
    Poison,
}

/// Log verbosity, independent of any logging backend
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// Get the string name of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parse a level name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Configuration for the dependency tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Behaviour on a cyclic module graph
    pub cycle_policy: CyclePolicy,
    /// Optional cap on the in-progress module path; `None` means unbounded
    pub max_depth: Option<usize>,
    /// Verbosity of the tracker's logger
    pub log_level: LogLevel,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            cycle_policy: CyclePolicy::Error,
            max_depth: None,
            log_level: LogLevel::Warn,
        }
    }
}

impl TrackerConfig {
    /// Same defaults, but cycles degrade to poisoned scopes
    pub fn lenient() -> Self {
        Self {
            cycle_policy: CyclePolicy::Poison,
            ..Self::default()
        }
    }
}
