//! 测试辅助工具
//!
//! 提供端到端测试的辅助函数

#![allow(dead_code)]

use depscope::{load_manifest, Project, UnitId};

/// Load a manifest, panicking with the loader's message on failure
pub fn load(json: &str) -> Project {
    match load_manifest(json) {
        Ok(project) => project,
        Err(e) => panic!("manifest failed to load: {e}"),
    }
}

pub fn id(project: &Project, name: &str) -> UnitId {
    project
        .tracker
        .registry()
        .lookup(name)
        .unwrap_or_else(|| panic!("no unit named '{name}'"))
}

/// Dependency names of a component, in emission order
pub fn dependency_names(project: &mut Project, name: &str) -> Vec<String> {
    let unit = id(project, name);
    let deps = project.dependencies(unit).expect("dependency query failed");
    deps.iter()
        .map(|id| project.tracker.registry().name(*id))
        .collect()
}
