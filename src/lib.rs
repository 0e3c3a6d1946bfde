//! Depscope - dependency scope resolution for components, directives, pipes
//! and the modules that group them
//!
//! # Architecture
//!
//! ```text
//! depscope-config/  - Pure configuration data (no logic)
//! depscope-log/     - Explicitly passed logger, sinks, ring buffer
//! depscope-core/    - Registry, resolvers, cache, manifest loader (no IO)
//! depscope-cli/     - `depscope` binary (file IO, tracing output)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use depscope::Manifest;
//!
//! let mut project = Manifest::from_json(
//!     r#"{"units": [
//!         {"name": "AppModule", "kind": "module",
//!          "declarations": ["AppComponent"], "imports": ["SharedModule"]},
//!         {"name": "AppComponent", "kind": "component"},
//!         {"name": "SharedModule", "kind": "module", "exports": ["Highlight"]},
//!         {"name": "Highlight", "kind": "directive"}
//!     ]}"#,
//! )
//! .unwrap()
//! .load()
//! .unwrap();
//!
//! let app = project.tracker.registry().lookup("AppComponent").unwrap();
//! let highlight = project.tracker.registry().lookup("Highlight").unwrap();
//! assert_eq!(project.dependencies(app).unwrap(), vec![app, highlight]);
//! ```

// 核心层（纯逻辑，无 IO）
pub use depscope_core as core;

// 日志
pub use depscope_log as log;

// 重导出常用类型
pub use depscope_config::{CyclePolicy, LogLevel, TrackerConfig};
pub use depscope_core::{
    deps_factory, CacheStats, DepsFactory, DepsTracker, Manifest, ManifestError, ModuleMeta,
    ModuleScope, Project, RefList, ScopeData, SharedTracker, StandaloneScope, TrackerError,
    TrackerResult, UnitId, UnitKind, UnitRef, UnitRegistry, UnitSet,
};
pub use depscope_log::{Level, LogRingBuffer, Logger};

/// Load a manifest from JSON text in one step
///
/// # Example
/// ```
/// let project = depscope::load_manifest(r#"{"units": []}"#).unwrap();
/// assert!(project.tracker.registry().is_empty());
/// ```
pub fn load_manifest(source: &str) -> Result<Project, ManifestError> {
    Manifest::from_json(source)?.load()
}
