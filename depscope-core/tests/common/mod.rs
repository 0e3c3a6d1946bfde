//! 测试辅助工具
//!
//! Short constructors for building unit graphs in tests.

#![allow(dead_code)]

use std::rc::Rc;

use depscope_core::{
    DepsTracker, ModuleMeta, ModuleScope, TrackerConfig, UnitId, UnitRef, UnitSet,
};

pub struct Fixture {
    pub tracker: DepsTracker,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            tracker: DepsTracker::new(),
        }
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            tracker: DepsTracker::with_config(config),
        }
    }

    pub fn component(&mut self, name: &str) -> UnitId {
        self.tracker.registry_mut().declare_component(name, false).unwrap()
    }

    pub fn standalone_component(&mut self, name: &str) -> UnitId {
        self.tracker.registry_mut().declare_component(name, true).unwrap()
    }

    pub fn directive(&mut self, name: &str) -> UnitId {
        self.tracker.registry_mut().declare_directive(name, false).unwrap()
    }

    pub fn standalone_directive(&mut self, name: &str) -> UnitId {
        self.tracker.registry_mut().declare_directive(name, true).unwrap()
    }

    pub fn pipe(&mut self, name: &str) -> UnitId {
        self.tracker.registry_mut().declare_pipe(name, false).unwrap()
    }

    pub fn standalone_pipe(&mut self, name: &str) -> UnitId {
        self.tracker.registry_mut().declare_pipe(name, true).unwrap()
    }

    pub fn plain(&mut self, name: &str) -> UnitId {
        self.tracker.registry_mut().declare_plain(name).unwrap()
    }

    pub fn module(&mut self, name: &str, meta: ModuleMeta) -> UnitId {
        self.tracker.registry_mut().declare_module(name, meta).unwrap()
    }

    /// Module scope; panics on hard errors
    pub fn scope(&mut self, module: UnitId) -> Rc<ModuleScope> {
        self.tracker.module_scope(module).unwrap()
    }
}

/// Order-insensitive set for comparisons
pub fn set(ids: &[UnitId]) -> UnitSet {
    ids.iter().copied().collect()
}

pub fn refs(ids: &[UnitId]) -> Vec<UnitRef> {
    ids.iter().copied().map(UnitRef::from).collect()
}

pub fn forward(name: &str) -> UnitRef {
    UnitRef::named(name)
}
