//! 作用域解析器
//!
//! `Resolver` borrows the registry and the cache for the duration of one
//! top-level query and tracks the modules still being computed, so a module
//! that imports itself (directly or through others) is caught instead of
//! recursing forever.

mod module;
mod standalone;

use std::rc::Rc;
use std::sync::Arc;

use depscope_config::TrackerConfig;
use depscope_log::{warn, Logger};

use crate::cache::ScopeCache;
use crate::error::TrackerResult;
use crate::registry::UnitRegistry;
use crate::scope::{ModuleScope, ScopeData};
use crate::unit::{UnitId, UnitKind, UnitRef};

/// What one import slot adds to a compilation scope
enum Contribution {
    /// A standalone component, directive or pipe
    Unit(UnitId, UnitKind),
    /// An imported module's exported scope
    Exported(Rc<ModuleScope>),
    /// Neither; the importing scope is poisoned
    Invalid(String),
}

pub(crate) struct Resolver<'a> {
    registry: &'a UnitRegistry,
    cache: &'a mut ScopeCache,
    config: &'a TrackerConfig,
    log: &'a Arc<Logger>,
    /// 当前解析栈（用于检测循环依赖）
    path: Vec<UnitId>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(
        registry: &'a UnitRegistry,
        cache: &'a mut ScopeCache,
        config: &'a TrackerConfig,
        log: &'a Arc<Logger>,
    ) -> Self {
        Self {
            registry,
            cache,
            config,
            log,
            path: Vec::new(),
        }
    }

    /// Human-readable description of a resolved slot, for diagnostics
    fn describe(&self, resolved: Option<UnitId>) -> String {
        let Some(id) = resolved else {
            return "an unresolved reference".to_string();
        };
        match self.registry.get(id) {
            Some(def) if def.kind.is_declarable() && def.standalone => {
                format!("standalone {} '{}'", def.kind, def.name)
            }
            Some(def) => format!("{} '{}'", def.kind, def.name),
            None => format!("unregistered unit {}", id),
        }
    }

    /// Classify one import slot of a module or standalone unit
    fn import_contribution(&mut self, slot: &UnitRef) -> TrackerResult<Contribution> {
        let registry = self.registry;
        let resolved = registry.resolve(slot);
        let Some(def) = resolved.and_then(|id| registry.get(id)) else {
            return Ok(Contribution::Invalid(self.describe(resolved)));
        };

        if def.kind == UnitKind::Module {
            let child = self.module_scope(def.id)?;
            if child.is_poisoned() {
                return Ok(Contribution::Invalid(format!(
                    "poisoned module '{}'",
                    def.name
                )));
            }
            return Ok(Contribution::Exported(child));
        }

        if def.is_standalone_capable() {
            return Ok(Contribution::Unit(def.id, def.kind));
        }

        Ok(Contribution::Invalid(self.describe(resolved)))
    }

    /// Fold a list of import slots into `scope`, stopping at the first bad one
    fn add_imports(
        &mut self,
        scope: &mut ScopeData,
        owner: UnitId,
        slots: &[UnitRef],
    ) -> TrackerResult<()> {
        for slot in slots {
            match self.import_contribution(slot)? {
                Contribution::Unit(id, kind) => {
                    scope.insert(id, kind);
                }
                Contribution::Exported(child) => scope.extend(&child.exported),
                Contribution::Invalid(what) => {
                    warn!(
                        self.log,
                        "'{}' imports {}, which is neither a module nor standalone; scope poisoned",
                        self.registry.name(owner),
                        what
                    );
                    scope.poison();
                    break;
                }
            }
        }
        Ok(())
    }
}
