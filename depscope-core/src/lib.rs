//! Depscope Core - dependency scope resolution (pure logic, no IO)
//!
//! Given declared components, directives, pipes and the modules grouping
//! them, computes which units each unit can see:
//!
//! - [`UnitRegistry`] stores declarations exactly as they were made
//! - [`ScopeCache`] memoizes computed scopes until explicitly cleared
//! - [`DepsTracker`] owns both and answers module, standalone and
//!   per-component dependency queries
//! - [`DepsFactory`] is the deferred accessor generated code calls later
//!
//! Configuration and the logger are passed explicitly, never via global state.
//!
//! ```
//! use depscope_core::{DepsTracker, ModuleMeta};
//!
//! let mut tracker = DepsTracker::new();
//! let reg = tracker.registry_mut();
//! let cmp = reg.declare_component("AppComponent", false).unwrap();
//! let app = reg
//!     .declare_module("AppModule", ModuleMeta::new().declarations(vec![cmp]))
//!     .unwrap();
//!
//! tracker.bind_declarations(app).unwrap();
//! assert_eq!(tracker.component_dependencies(cmp, None).unwrap(), vec![cmp]);
//! ```

pub mod cache;
pub mod error;
pub mod factory;
pub mod manifest;
pub mod registry;
mod resolver;
pub mod scope;
pub mod tracker;
pub mod unit;

pub use cache::{CacheStats, CachedScope, ScopeCache};
pub use error::{ManifestError, TrackerError, TrackerResult};
pub use factory::{deps_factory, DepsFactory, SharedTracker};
pub use manifest::{Manifest, Project};
pub use registry::UnitRegistry;
pub use scope::{ModuleScope, ScopeData, StandaloneScope, UnitSet};
pub use tracker::DepsTracker;
pub use unit::{ModuleMeta, RefList, UnitDef, UnitId, UnitKind, UnitRef};

// Re-export config types from depscope-config
pub use depscope_config::{CyclePolicy, LogLevel, TrackerConfig};
