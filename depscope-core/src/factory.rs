//! Deferred dependency accessor
//!
//! Generated code does not know a component's dependencies when it is
//! emitted, only how to ask for them later. `DepsFactory` is that question,
//! packaged: it holds the tracker handle, the component and its raw imports,
//! runs the dependency query on first use and hands back the same list on
//! every later call.

use std::cell::RefCell;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::error::{TrackerError, TrackerResult};
use crate::tracker::DepsTracker;
use crate::unit::{UnitId, UnitRef};

/// Tracker handle shared between a compilation and its deferred accessors
pub type SharedTracker = Rc<RefCell<DepsTracker>>;

impl DepsTracker {
    pub fn into_shared(self) -> SharedTracker {
        Rc::new(RefCell::new(self))
    }
}

pub struct DepsFactory {
    tracker: SharedTracker,
    unit: UnitId,
    imports: Option<Vec<UnitRef>>,
    deps: OnceCell<Vec<UnitId>>,
}

impl DepsFactory {
    /// `imports` is the raw import list of a standalone component; pass
    /// `None` for components declared by a module.
    pub fn new(tracker: SharedTracker, unit: UnitId, imports: Option<Vec<UnitRef>>) -> Self {
        Self {
            tracker,
            unit,
            imports,
            deps: OnceCell::new(),
        }
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    /// The component's dependencies. Errors are not memoized; a later call
    /// retries the query.
    pub fn dependencies(&self) -> TrackerResult<&[UnitId]> {
        self.deps
            .get_or_try_init(|| {
                let mut tracker = self
                    .tracker
                    .try_borrow_mut()
                    .map_err(|_| TrackerError::Reentrant)?;
                tracker.component_dependencies(self.unit, self.imports.as_deref())
            })
            .map(Vec::as_slice)
    }

    pub fn is_resolved(&self) -> bool {
        self.deps.get().is_some()
    }
}

impl std::fmt::Debug for DepsFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepsFactory")
            .field("unit", &self.unit)
            .field("imports", &self.imports)
            .field("resolved", &self.deps.get())
            .finish()
    }
}

/// Build the accessor that generated code stores next to a component
pub fn deps_factory(
    tracker: &SharedTracker,
    unit: UnitId,
    imports: Option<Vec<UnitRef>>,
) -> DepsFactory {
    DepsFactory::new(Rc::clone(tracker), unit, imports)
}
