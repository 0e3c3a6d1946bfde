//! Module scope resolution
//!
//! # 规则
//! - compilation = declarations, then the exported scope of every imported
//!   module and every imported standalone unit, in source order
//! - exported = every exported unit, plus the exported scope of every
//!   exported module; anything resolved that is not a pipe counts as a
//!   directive
//! - a malformed slot poisons the section it appears in and stops it; for
//!   exports only unresolved references and poisoned modules are malformed

use std::rc::Rc;

use depscope_config::CyclePolicy;
use depscope_log::{debug, trace, warn};

use super::Resolver;
use crate::error::{TrackerError, TrackerResult};
use crate::scope::{ModuleScope, ScopeData};
use crate::unit::{ModuleMeta, UnitId, UnitKind};

impl Resolver<'_> {
    /// Scopes of `module`, computed on first use and cached
    pub(crate) fn module_scope(&mut self, module: UnitId) -> TrackerResult<Rc<ModuleScope>> {
        let registry = self.registry;
        let Some(meta) = registry.module_meta(module) else {
            return Err(match registry.get(module) {
                Some(def) => TrackerError::NotAModule {
                    name: def.name.clone(),
                },
                None => TrackerError::UnknownUnit(module),
            });
        };

        if let Some(scope) = self.cache.module(module) {
            trace!(self.log, "module scope cache hit: {}", registry.name(module));
            return Ok(scope);
        }

        if self.path.contains(&module) {
            return self.reentered(module);
        }

        if let Some(limit) = self.config.max_depth {
            if self.path.len() >= limit {
                return Err(TrackerError::DepthExceeded { limit });
            }
        }

        let span = self.log.enter_span("module_scope");
        self.path.push(module);
        let result = self.compute_module_scope(module, meta);
        self.path.pop();
        drop(span);

        let scope = result?;
        debug!(
            self.log,
            "module '{}': {} directives, {} pipes in compilation scope{}",
            registry.name(module),
            scope.compilation.directives.len(),
            scope.compilation.pipes.len(),
            if scope.is_poisoned() { " (poisoned)" } else { "" }
        );
        Ok(self.cache.insert_module(module, scope))
    }

    /// A module on the in-progress path was requested again
    fn reentered(&self, module: UnitId) -> TrackerResult<Rc<ModuleScope>> {
        let start = self
            .path
            .iter()
            .position(|id| *id == module)
            .unwrap_or(0);
        let chain: Vec<String> = self.path[start..]
            .iter()
            .chain(std::iter::once(&module))
            .map(|id| self.registry.name(*id))
            .collect();

        match self.config.cycle_policy {
            CyclePolicy::Error => Err(TrackerError::CyclicImport { chain }),
            CyclePolicy::Poison => {
                warn!(self.log, "cyclic module import {}; poisoning", chain.join(" → "));
                // 不缓存：外层调用完成后会缓存真正的结果
                Ok(Rc::new(ModuleScope::poisoned()))
            }
        }
    }

    fn compute_module_scope(&mut self, module: UnitId, meta: &ModuleMeta) -> TrackerResult<ModuleScope> {
        let registry = self.registry;
        let mut scope = ModuleScope::default();

        self.add_declarations(&mut scope.compilation, module, meta);
        if !scope.compilation.is_poisoned {
            let imports = registry.expand(&meta.imports);
            self.add_imports(&mut scope.compilation, module, &imports)?;
        }

        scope.exported = self.exported_scope(module, meta)?;
        Ok(scope)
    }

    /// Declarations must be non-standalone components, directives or pipes
    fn add_declarations(&self, compilation: &mut ScopeData, module: UnitId, meta: &ModuleMeta) {
        let registry = self.registry;
        for slot in registry.expand(&meta.declarations) {
            let resolved = registry.resolve(&slot);
            match resolved.and_then(|id| registry.get(id)) {
                Some(def) if def.kind.is_declarable() && !def.standalone => {
                    compilation.insert(def.id, def.kind);
                }
                _ => {
                    warn!(
                        self.log,
                        "module '{}' declares {}; compilation scope poisoned",
                        registry.name(module),
                        self.describe(resolved)
                    );
                    compilation.poison();
                    break;
                }
            }
        }
    }

    fn exported_scope(&mut self, module: UnitId, meta: &ModuleMeta) -> TrackerResult<ScopeData> {
        let registry = self.registry;
        let mut exported = ScopeData::new();

        for slot in registry.expand(&meta.exports) {
            let resolved = registry.resolve(&slot);
            let Some(def) = resolved.and_then(|id| registry.get(id)) else {
                warn!(
                    self.log,
                    "module '{}' exports {}; exported scope poisoned",
                    registry.name(module),
                    self.describe(resolved)
                );
                exported.poison();
                break;
            };

            match def.kind {
                UnitKind::Module => {
                    let child = self.module_scope(def.id)?;
                    if child.is_poisoned() {
                        warn!(
                            self.log,
                            "module '{}' re-exports poisoned module '{}'",
                            registry.name(module),
                            def.name
                        );
                        exported.poison();
                        break;
                    }
                    exported.extend(&child.exported);
                }
                UnitKind::Pipe => {
                    exported.pipes.insert(def.id);
                }
                // 非 pipe 的已解析导出一律按 directive 处理
                UnitKind::Component | UnitKind::Directive | UnitKind::Unknown => {
                    exported.directives.insert(def.id);
                }
            }
        }

        Ok(exported)
    }
}
