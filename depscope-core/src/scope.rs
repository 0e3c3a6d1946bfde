//! Scope records produced by the resolvers

use indexmap::IndexSet;

use crate::unit::{UnitId, UnitKind};

/// Insertion-ordered, deduplicated set of units
pub type UnitSet = IndexSet<UnitId>;

/// Directives and pipes visible from one place
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeData {
    pub directives: UnitSet,
    pub pipes: UnitSet,
    /// Set when the scope was computed from malformed input; the sets may
    /// then be partial and must not be trusted.
    pub is_poisoned: bool,
}

impl ScopeData {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn poisoned() -> Self {
        Self {
            is_poisoned: true,
            ..Self::default()
        }
    }

    /// Add a component, directive or pipe to the matching set.
    /// Returns `false` for kinds that belong in neither.
    pub(crate) fn insert(&mut self, id: UnitId, kind: UnitKind) -> bool {
        match kind {
            UnitKind::Component | UnitKind::Directive => {
                self.directives.insert(id);
                true
            }
            UnitKind::Pipe => {
                self.pipes.insert(id);
                true
            }
            UnitKind::Module | UnitKind::Unknown => false,
        }
    }

    /// Union another scope's sets into this one, keeping first-seen order
    pub(crate) fn extend(&mut self, other: &ScopeData) {
        self.directives.extend(other.directives.iter().copied());
        self.pipes.extend(other.pipes.iter().copied());
    }

    pub(crate) fn poison(&mut self) {
        self.is_poisoned = true;
    }

    /// Directives then pipes, each in first-seen order
    pub fn ordered(&self) -> Vec<UnitId> {
        self.directives
            .iter()
            .chain(self.pipes.iter())
            .copied()
            .collect()
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.directives.contains(&id) || self.pipes.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty() && self.pipes.is_empty()
    }
}

/// Scopes of a module
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleScope {
    /// Visible to the module's own declarations
    pub compilation: ScopeData,
    /// Re-exposed to importers
    pub exported: ScopeData,
}

impl ModuleScope {
    /// Either half poisoned; importers and exporters inherit this
    pub fn is_poisoned(&self) -> bool {
        self.compilation.is_poisoned || self.exported.is_poisoned
    }

    pub(crate) fn poisoned() -> Self {
        Self {
            compilation: ScopeData::poisoned(),
            exported: ScopeData::poisoned(),
        }
    }
}

/// Scope of a standalone component or directive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandaloneScope {
    pub compilation: ScopeData,
}
