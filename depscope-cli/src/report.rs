//! 解析结果报告
//!
//! One entry per selected unit: module scopes for modules, the dependency
//! list for components, the standalone scope for standalone directives.

use serde::Serialize;

use depscope_core::{
    Project, ScopeData, TrackerError, TrackerResult, UnitId, UnitKind, UnitRegistry, UnitSet,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeReport {
    pub directives: Vec<String>,
    pub pipes: Vec<String>,
    pub poisoned: bool,
}

impl ScopeReport {
    fn new(registry: &UnitRegistry, scope: &ScopeData) -> Self {
        let names = |ids: &UnitSet| -> Vec<String> { ids.iter().map(|id| registry.name(*id)).collect() };
        Self {
            directives: names(&scope.directives),
            pipes: names(&scope.pipes),
            poisoned: scope.is_poisoned,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitReport {
    pub name: String,
    pub kind: &'static str,
    pub standalone: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compilation: Option<ScopeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported: Option<ScopeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
}

/// Resolve `unit` and describe the result; hard resolver errors propagate
pub fn unit_report(project: &mut Project, unit: UnitId) -> TrackerResult<UnitReport> {
    let (name, kind, standalone) = {
        let def = project
            .tracker
            .registry()
            .get(unit)
            .ok_or(TrackerError::UnknownUnit(unit))?;
        (def.name.clone(), def.kind, def.standalone)
    };

    let mut report = UnitReport {
        name,
        kind: kind.as_str(),
        standalone,
        compilation: None,
        exported: None,
        dependencies: None,
    };

    match kind {
        UnitKind::Module => {
            let scope = project.tracker.module_scope(unit)?;
            let registry = project.tracker.registry();
            report.compilation = Some(ScopeReport::new(registry, &scope.compilation));
            report.exported = Some(ScopeReport::new(registry, &scope.exported));
        }
        UnitKind::Component => {
            let deps = project.dependencies(unit)?;
            let registry = project.tracker.registry();
            report.dependencies = Some(deps.iter().map(|id| registry.name(*id)).collect());
        }
        UnitKind::Directive if standalone => {
            let imports = project.standalone_imports(unit).to_vec();
            let scope = project.tracker.standalone_scope(unit, &imports)?;
            let registry = project.tracker.registry();
            report.compilation = Some(ScopeReport::new(registry, &scope.compilation));
        }
        UnitKind::Directive | UnitKind::Pipe | UnitKind::Unknown => {}
    }

    Ok(report)
}

fn format_scope(scope: &ScopeReport) -> String {
    let mut line = format!(
        "directives [{}], pipes [{}]",
        scope.directives.join(", "),
        scope.pipes.join(", ")
    );
    if scope.poisoned {
        line.push_str(" (poisoned)");
    }
    line
}

/// Plain-text rendering, one block per unit
pub fn render_text(reports: &[UnitReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let standalone = if report.standalone { "standalone " } else { "" };
        out.push_str(&format!("{} ({}{})\n", report.name, standalone, report.kind));
        if let Some(scope) = &report.compilation {
            out.push_str(&format!("  compilation: {}\n", format_scope(scope)));
        }
        if let Some(scope) = &report.exported {
            out.push_str(&format!("  exported:    {}\n", format_scope(scope)));
        }
        if let Some(deps) = &report.dependencies {
            out.push_str(&format!("  dependencies: [{}]\n", deps.join(", ")));
        }
    }
    out
}
