//! Scope cache
//!
//! Memoizes computed scopes per unit. Entries never expire on their own and
//! clearing one entry does not touch scopes that were derived from it.

use std::collections::HashMap;
use std::rc::Rc;

use crate::scope::{ModuleScope, StandaloneScope};
use crate::unit::UnitId;

/// A memoized scope
#[derive(Debug, Clone)]
pub enum CachedScope {
    Module(Rc<ModuleScope>),
    Standalone(Rc<StandaloneScope>),
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

#[derive(Debug, Default)]
pub struct ScopeCache {
    entries: HashMap<UnitId, CachedScope>,
    hits: usize,
    misses: usize,
}

impl ScopeCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    /// Cached module scope, counting the lookup
    pub fn module(&mut self, id: UnitId) -> Option<Rc<ModuleScope>> {
        let found = match self.entries.get(&id) {
            Some(CachedScope::Module(scope)) => Some(Rc::clone(scope)),
            _ => None,
        };
        self.record(found.is_some());
        found
    }

    /// Cached standalone scope, counting the lookup
    pub fn standalone(&mut self, id: UnitId) -> Option<Rc<StandaloneScope>> {
        let found = match self.entries.get(&id) {
            Some(CachedScope::Standalone(scope)) => Some(Rc::clone(scope)),
            _ => None,
        };
        self.record(found.is_some());
        found
    }

    pub fn insert_module(&mut self, id: UnitId, scope: ModuleScope) -> Rc<ModuleScope> {
        let scope = Rc::new(scope);
        self.entries.insert(id, CachedScope::Module(Rc::clone(&scope)));
        scope
    }

    pub fn insert_standalone(&mut self, id: UnitId, scope: StandaloneScope) -> Rc<StandaloneScope> {
        let scope = Rc::new(scope);
        self.entries
            .insert(id, CachedScope::Standalone(Rc::clone(&scope)));
        scope
    }

    /// Drop exactly one entry; returns whether it existed
    pub fn remove(&mut self, id: UnitId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
