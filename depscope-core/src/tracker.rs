//! Dependency tracker
//!
//! Owns the unit registry and the scope cache. One tracker per compilation
//! (or per test case); nothing here is global.

use std::rc::Rc;
use std::sync::Arc;

use depscope_config::TrackerConfig;
use depscope_log::{debug, warn, Logger};

use crate::cache::{CacheStats, ScopeCache};
use crate::error::{TrackerError, TrackerResult};
use crate::registry::UnitRegistry;
use crate::resolver::Resolver;
use crate::scope::{ModuleScope, StandaloneScope};
use crate::unit::{UnitId, UnitKind, UnitRef};

pub struct DepsTracker {
    registry: UnitRegistry,
    cache: ScopeCache,
    config: TrackerConfig,
    log: Arc<Logger>,
}

impl Default for DepsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DepsTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepsTracker")
            .field("units", &self.registry.len())
            .field("cached_scopes", &self.cache.len())
            .field("config", &self.config)
            .finish()
    }
}

impl DepsTracker {
    /// Empty tracker with default configuration and a silent logger
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        Self::from_registry(UnitRegistry::new(), config)
    }

    pub fn from_registry(registry: UnitRegistry, config: TrackerConfig) -> Self {
        let log = Logger::new(config.log_level.into());
        Self {
            registry,
            cache: ScopeCache::new(),
            config,
            log,
        }
    }

    /// Replace the logger; its level is kept as configured by the caller
    pub fn with_logger(mut self, log: Arc<Logger>) -> Self {
        self.log = log;
        self
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut UnitRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.log
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn resolver(&mut self) -> Resolver<'_> {
        Resolver::new(&self.registry, &mut self.cache, &self.config, &self.log)
    }

    /// Compilation and exported scopes of a module.
    ///
    /// # Errors
    /// `NotAModule`/`UnknownUnit` if `module` is not a registered module,
    /// `CyclicImport` or `DepthExceeded` for unsupported graphs.
    pub fn module_scope(&mut self, module: UnitId) -> TrackerResult<Rc<ModuleScope>> {
        self.resolver().module_scope(module)
    }

    /// Compilation scope of a standalone component or directive
    pub fn standalone_scope(
        &mut self,
        unit: UnitId,
        imports: &[UnitRef],
    ) -> TrackerResult<Rc<StandaloneScope>> {
        self.resolver().standalone_scope(unit, imports)
    }

    /// Ordered dependency list of a component, as embedded in generated code.
    ///
    /// `imports` is the raw import list of a standalone component and is
    /// ignored otherwise. Anything that cannot produce a trustworthy scope
    /// (not a component, no declaring module, poisoned scope) yields an
    /// empty list.
    pub fn component_dependencies(
        &mut self,
        unit: UnitId,
        imports: Option<&[UnitRef]>,
    ) -> TrackerResult<Vec<UnitId>> {
        let Some(def) = self.registry.get(unit) else {
            debug!(self.log, "dependencies requested for unregistered unit {}", unit);
            return Ok(Vec::new());
        };
        if def.kind != UnitKind::Component {
            debug!(self.log, "'{}' is a {}, not a component", def.name, def.kind);
            return Ok(Vec::new());
        }
        let (standalone, declaring_module) = (def.standalone, def.declaring_module());

        if standalone {
            let scope = self.standalone_scope(unit, imports.unwrap_or(&[]))?;
            if scope.compilation.is_poisoned {
                return Ok(Vec::new());
            }
            return Ok(scope.compilation.ordered());
        }

        let Some(module) = declaring_module else {
            debug!(
                self.log,
                "component '{}' has no declaring module yet",
                self.registry.name(unit)
            );
            return Ok(Vec::new());
        };

        let scope = self.module_scope(module)?;
        if scope.compilation.is_poisoned {
            warn!(
                self.log,
                "component '{}': declaring module '{}' has a poisoned compilation scope",
                self.registry.name(unit),
                self.registry.name(module)
            );
            return Ok(Vec::new());
        }
        Ok(scope.compilation.ordered())
    }

    /// Point every unit declared by `module` back at it (last writer wins)
    pub fn bind_declarations(&mut self, module: UnitId) -> TrackerResult<()> {
        let meta = match self.registry.module_meta(module) {
            Some(meta) => meta,
            None => {
                return Err(match self.registry.get(module) {
                    Some(def) => TrackerError::NotAModule {
                        name: def.name.clone(),
                    },
                    None => TrackerError::UnknownUnit(module),
                })
            }
        };

        let declarations = self.registry.expand(&meta.declarations);
        for slot in &declarations {
            match self.registry.resolve(slot) {
                Some(unit) => {
                    if let Some(previous) = self.registry.set_declaring_module(unit, module) {
                        if previous != module {
                            debug!(
                                self.log,
                                "'{}' rebound from '{}' to '{}'",
                                self.registry.name(unit),
                                self.registry.name(previous),
                                self.registry.name(module)
                            );
                        }
                    }
                }
                None => warn!(
                    self.log,
                    "module '{}' declares an unresolved reference; skipped",
                    self.registry.name(module)
                ),
            }
        }
        Ok(())
    }

    /// Forget the cached scope of exactly one unit.
    ///
    /// Scopes of other units that were built from it stay cached; callers
    /// invalidate those themselves.
    pub fn clear_scope_cache_for(&mut self, unit: UnitId) -> bool {
        self.cache.remove(unit)
    }

    /// Raw imports followed by raw exports, forward references untouched
    pub fn injector_imports(&self, module: UnitId) -> TrackerResult<Vec<UnitRef>> {
        let meta = self.registry.module_meta(module).ok_or_else(|| TrackerError::NotAModule {
            name: self.registry.name(module),
        })?;
        let mut refs = self.registry.expand(&meta.imports);
        refs.extend(self.registry.expand(&meta.exports));
        Ok(refs)
    }
}
