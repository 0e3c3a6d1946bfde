//! Unit registry
//!
//! Stores every declared unit with the kind and raw metadata it was declared
//! with. Kinds are never inferred afterwards; the only field mutated after
//! declaration is the declaring-module back-reference.

use std::collections::HashMap;

use crate::error::{TrackerError, TrackerResult};
use crate::unit::{ModuleMeta, RefList, UnitDef, UnitId, UnitKind, UnitRef};

/// Registry of declared units; `UnitId`s are indices into `units`
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    units: Vec<UnitDef>,
    by_name: HashMap<String, UnitId>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn declare(
        &mut self,
        name: impl Into<String>,
        kind: UnitKind,
        standalone: bool,
        module: Option<ModuleMeta>,
    ) -> TrackerResult<UnitId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TrackerError::DuplicateName(name));
        }

        let id = UnitId::new(self.units.len());
        self.by_name.insert(name.clone(), id);
        self.units.push(UnitDef {
            id,
            name,
            kind,
            standalone,
            module,
            declaring_module: None,
        });
        Ok(id)
    }

    pub fn declare_component(&mut self, name: impl Into<String>, standalone: bool) -> TrackerResult<UnitId> {
        self.declare(name, UnitKind::Component, standalone, None)
    }

    pub fn declare_directive(&mut self, name: impl Into<String>, standalone: bool) -> TrackerResult<UnitId> {
        self.declare(name, UnitKind::Directive, standalone, None)
    }

    pub fn declare_pipe(&mut self, name: impl Into<String>, standalone: bool) -> TrackerResult<UnitId> {
        self.declare(name, UnitKind::Pipe, standalone, None)
    }

    pub fn declare_module(&mut self, name: impl Into<String>, meta: ModuleMeta) -> TrackerResult<UnitId> {
        self.declare(name, UnitKind::Module, false, Some(meta))
    }

    /// Register a unit that carries no recognised declaration
    pub fn declare_plain(&mut self, name: impl Into<String>) -> TrackerResult<UnitId> {
        self.declare(name, UnitKind::Unknown, false, None)
    }

    pub fn lookup(&self, name: &str) -> Option<UnitId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: UnitId) -> Option<&UnitDef> {
        self.units.get(id.index())
    }

    pub fn contains(&self, id: UnitId) -> bool {
        id.index() < self.units.len()
    }

    /// Name for diagnostics; unregistered ids print as `#n`
    pub fn name(&self, id: UnitId) -> String {
        match self.get(id) {
            Some(def) => def.name.clone(),
            None => id.to_string(),
        }
    }

    pub fn kind(&self, id: UnitId) -> Option<UnitKind> {
        self.get(id).map(|def| def.kind)
    }

    pub fn is_standalone(&self, id: UnitId) -> bool {
        self.get(id).is_some_and(|def| def.is_standalone_capable())
    }

    pub fn module_meta(&self, id: UnitId) -> Option<&ModuleMeta> {
        self.get(id).and_then(|def| def.module.as_ref())
    }

    /// Mutable access to a module's raw lists.
    ///
    /// Scopes already cached for the module are not affected until
    /// the cache entry is cleared.
    pub fn module_meta_mut(&mut self, id: UnitId) -> Option<&mut ModuleMeta> {
        self.units
            .get_mut(id.index())
            .and_then(|def| def.module.as_mut())
    }

    pub fn declaring_module(&self, id: UnitId) -> Option<UnitId> {
        self.get(id).and_then(|def| def.declaring_module)
    }

    pub(crate) fn set_declaring_module(&mut self, id: UnitId, module: UnitId) -> Option<UnitId> {
        self.units
            .get_mut(id.index())
            .and_then(|def| def.declaring_module.replace(module))
    }

    /// Dereference a slot to a registered unit
    pub fn resolve(&self, r: &UnitRef) -> Option<UnitId> {
        let id = match r {
            UnitRef::Direct(id) => Some(*id),
            UnitRef::Deferred(thunk) => thunk(self),
            UnitRef::WithProviders(inner) => self.resolve(inner),
        }?;
        self.contains(id).then_some(id)
    }

    /// Materialise a reference list, calling its thunk if it has one
    pub fn expand(&self, list: &RefList) -> Vec<UnitRef> {
        match list {
            RefList::Eager(refs) => refs.clone(),
            RefList::Deferred(thunk) => thunk(self),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitDef> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
