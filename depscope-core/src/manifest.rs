//! JSON declaration manifest
//!
//! Describes a unit graph without any host-language metadata:
//!
//! ```json
//! {
//!   "config": { "cycle_policy": "poison" },
//!   "units": [
//!     { "name": "AppModule", "kind": "module",
//!       "declarations": ["AppComponent"],
//!       "imports": ["forwardRef(SharedModule)", { "ngModule": "RouterModule" }] },
//!     { "name": "AppComponent", "kind": "component" }
//!   ]
//! }
//! ```
//!
//! Plain names may point at units declared further down the file.
//! `forwardRef(X)` becomes a deferred reference that is only looked up while
//! a scope is being computed, so a typo there poisons instead of failing the
//! load. `"lazy": true` on a module turns its lists into deferred lists.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use depscope_config::TrackerConfig;
use depscope_log::Logger;

use crate::error::ManifestError;
use crate::registry::UnitRegistry;
use crate::tracker::DepsTracker;
use crate::unit::{ModuleMeta, RefList, UnitId, UnitKind, UnitRef};

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub config: TrackerConfig,
    pub units: Vec<UnitSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitSpec {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub standalone: bool,
    #[serde(default)]
    pub lazy: bool,
    pub declarations: Option<Vec<RefSpec>>,
    pub imports: Option<Vec<RefSpec>>,
    pub exports: Option<Vec<RefSpec>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RefSpec {
    Name(String),
    WithProviders {
        #[serde(rename = "ngModule")]
        ng_module: String,
    },
}

/// A loaded manifest: the tracker plus the raw import lists of standalone units
#[derive(Debug)]
pub struct Project {
    pub tracker: DepsTracker,
    standalone_imports: HashMap<UnitId, Vec<UnitRef>>,
}

impl Project {
    /// Dependency list of `unit`, supplying its manifest imports if standalone
    pub fn dependencies(&mut self, unit: UnitId) -> crate::TrackerResult<Vec<UnitId>> {
        let imports = self.standalone_imports.get(&unit).map(Vec::as_slice);
        self.tracker.component_dependencies(unit, imports)
    }

    pub fn standalone_imports(&self, unit: UnitId) -> &[UnitRef] {
        self.standalone_imports
            .get(&unit)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn parse_kind(spec: &UnitSpec) -> Result<UnitKind, ManifestError> {
    match spec.kind.as_str() {
        "component" => Ok(UnitKind::Component),
        "directive" => Ok(UnitKind::Directive),
        "pipe" => Ok(UnitKind::Pipe),
        "module" => Ok(UnitKind::Module),
        "plain" | "unknown" => Ok(UnitKind::Unknown),
        other => Err(ManifestError::UnknownKind {
            name: spec.name.clone(),
            kind: other.to_string(),
        }),
    }
}

/// Maps manifest names to the ids they will receive once declared
struct NameTable<'a> {
    planned: HashMap<&'a str, UnitId>,
}

impl NameTable<'_> {
    fn to_ref(&self, spec: &RefSpec) -> UnitRef {
        match spec {
            RefSpec::Name(name) => match forward_target(name) {
                Some(target) => UnitRef::named(target),
                None => self.direct(name),
            },
            RefSpec::WithProviders { ng_module } => {
                let inner = match forward_target(ng_module) {
                    Some(target) => UnitRef::named(target),
                    None => self.direct(ng_module),
                };
                UnitRef::with_providers(inner)
            }
        }
    }

    /// Names missing from the file stay lazy and poison on use
    fn direct(&self, name: &str) -> UnitRef {
        match self.planned.get(name) {
            Some(id) => UnitRef::Direct(*id),
            None => UnitRef::named(name),
        }
    }

    fn refs(&self, specs: &Option<Vec<RefSpec>>) -> Vec<UnitRef> {
        specs
            .iter()
            .flatten()
            .map(|spec| self.to_ref(spec))
            .collect()
    }

    fn list(&self, specs: &Option<Vec<RefSpec>>, lazy: bool) -> RefList {
        let refs = self.refs(specs);
        if lazy {
            RefList::deferred(move |_| refs.clone())
        } else {
            RefList::Eager(refs)
        }
    }
}

/// `forwardRef(Name)` → `Name`
fn forward_target(name: &str) -> Option<&str> {
    name.trim()
        .strip_prefix("forwardRef(")
        .and_then(|rest| rest.strip_suffix(')'))
        .map(str::trim)
}

impl Manifest {
    pub fn from_json(source: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Declare every unit, then bind module declarations in file order
    pub fn load(self) -> Result<Project, ManifestError> {
        let log = Logger::new(self.config.log_level.into());
        self.load_with_logger(log)
    }

    /// Same as [`Manifest::load`], with binding diagnostics going to `log`
    pub fn load_with_logger(self, log: Arc<Logger>) -> Result<Project, ManifestError> {
        let mut registry = UnitRegistry::new();
        let mut declared = Vec::with_capacity(self.units.len());
        let mut standalone_imports = HashMap::new();
        {
            // ids are handed out in declaration order
            let names = NameTable {
                planned: self
                    .units
                    .iter()
                    .enumerate()
                    .map(|(i, spec)| (spec.name.as_str(), UnitId::new(i)))
                    .collect(),
            };

            for spec in &self.units {
                let kind = parse_kind(spec)?;
                if kind != UnitKind::Module {
                    reject_module_field(spec, "declarations", &spec.declarations)?;
                    reject_module_field(spec, "exports", &spec.exports)?;
                    if !spec.standalone {
                        reject_module_field(spec, "imports", &spec.imports)?;
                    }
                }

                let id = match kind {
                    UnitKind::Component => registry.declare_component(&spec.name, spec.standalone)?,
                    UnitKind::Directive => registry.declare_directive(&spec.name, spec.standalone)?,
                    UnitKind::Pipe => registry.declare_pipe(&spec.name, spec.standalone)?,
                    UnitKind::Unknown => registry.declare_plain(&spec.name)?,
                    UnitKind::Module => {
                        let meta = ModuleMeta {
                            declarations: names.list(&spec.declarations, spec.lazy),
                            imports: names.list(&spec.imports, spec.lazy),
                            exports: names.list(&spec.exports, spec.lazy),
                        };
                        registry.declare_module(&spec.name, meta)?
                    }
                };

                if kind != UnitKind::Module && spec.standalone {
                    standalone_imports.insert(id, names.refs(&spec.imports));
                }
                declared.push((id, kind));
            }
        }

        let mut tracker = DepsTracker::from_registry(registry, self.config).with_logger(log);
        for (id, kind) in declared {
            if kind == UnitKind::Module {
                tracker.bind_declarations(id)?;
            }
        }

        Ok(Project {
            tracker,
            standalone_imports,
        })
    }
}

fn reject_module_field(
    spec: &UnitSpec,
    field: &'static str,
    value: &Option<Vec<RefSpec>>,
) -> Result<(), ManifestError> {
    match value {
        Some(_) => Err(ManifestError::NotAModuleField {
            name: spec.name.clone(),
            field,
        }),
        None => Ok(()),
    }
}
