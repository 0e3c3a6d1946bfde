//! Standalone component scope resolution

use std::rc::Rc;

use depscope_log::{debug, trace};

use super::Resolver;
use crate::error::{TrackerError, TrackerResult};
use crate::scope::{ScopeData, StandaloneScope};
use crate::unit::{UnitId, UnitKind, UnitRef};

impl Resolver<'_> {
    /// Compilation scope of a standalone component or directive.
    ///
    /// Cached by `unit` alone: `imports` is only read on a cache miss, so a
    /// later call with a different list gets the first result back.
    pub(crate) fn standalone_scope(
        &mut self,
        unit: UnitId,
        imports: &[UnitRef],
    ) -> TrackerResult<Rc<StandaloneScope>> {
        let registry = self.registry;
        let def = registry.get(unit).ok_or(TrackerError::UnknownUnit(unit))?;
        let templated = matches!(def.kind, UnitKind::Component | UnitKind::Directive);
        if !(templated && def.standalone) {
            return Err(TrackerError::NotStandalone {
                name: def.name.clone(),
            });
        }

        if let Some(scope) = self.cache.standalone(unit) {
            trace!(self.log, "standalone scope cache hit: {}", def.name);
            return Ok(scope);
        }

        let span = self.log.enter_span("standalone_scope");
        let mut compilation = ScopeData::new();
        compilation.insert(unit, def.kind);
        self.add_imports(&mut compilation, unit, imports)?;
        drop(span);

        debug!(
            self.log,
            "standalone '{}': {} directives, {} pipes{}",
            def.name,
            compilation.directives.len(),
            compilation.pipes.len(),
            if compilation.is_poisoned { " (poisoned)" } else { "" }
        );
        Ok(self
            .cache
            .insert_standalone(unit, StandaloneScope { compilation }))
    }
}
