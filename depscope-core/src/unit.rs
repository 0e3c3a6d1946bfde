//! Unit identities, kinds and raw declaration references

use std::fmt;
use std::rc::Rc;

use crate::registry::UnitRegistry;

/// Identity of a declared unit, issued by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(u32);

impl UnitId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a unit was declared as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Component,
    Directive,
    Pipe,
    Module,
    /// Registered but carries no recognised declaration
    Unknown,
}

impl UnitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Component => "component",
            UnitKind::Directive => "directive",
            UnitKind::Pipe => "pipe",
            UnitKind::Module => "module",
            UnitKind::Unknown => "unknown",
        }
    }

    /// Component, directive or pipe
    pub fn is_declarable(&self) -> bool {
        matches!(self, UnitKind::Component | UnitKind::Directive | UnitKind::Pipe)
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thunk behind a forward reference
pub type ForwardFn = Rc<dyn Fn(&UnitRegistry) -> Option<UnitId>>;

/// Thunk producing a whole reference list
pub type ListFn = Rc<dyn Fn(&UnitRegistry) -> Vec<UnitRef>>;

/// One slot of a declarations/imports/exports list
#[derive(Clone)]
pub enum UnitRef {
    /// Already-known unit
    Direct(UnitId),
    /// Forward reference, dereferenced when the slot is traversed
    Deferred(ForwardFn),
    /// Module-with-providers wrapper; only the wrapped module matters for scopes
    WithProviders(Box<UnitRef>),
}

impl UnitRef {
    /// Forward reference from an arbitrary thunk
    pub fn forward(f: impl Fn(&UnitRegistry) -> Option<UnitId> + 'static) -> Self {
        UnitRef::Deferred(Rc::new(f))
    }

    /// Forward reference to a unit by name, possibly declared later
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::forward(move |registry| registry.lookup(&name))
    }

    /// Wrap a module reference that carries providers
    pub fn with_providers(inner: UnitRef) -> Self {
        UnitRef::WithProviders(Box::new(inner))
    }

    pub fn is_deferred(&self) -> bool {
        match self {
            UnitRef::Direct(_) => false,
            UnitRef::Deferred(_) => true,
            UnitRef::WithProviders(inner) => inner.is_deferred(),
        }
    }
}

impl From<UnitId> for UnitRef {
    fn from(id: UnitId) -> Self {
        UnitRef::Direct(id)
    }
}

impl fmt::Debug for UnitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitRef::Direct(id) => write!(f, "Direct({})", id),
            UnitRef::Deferred(_) => f.write_str("Deferred(<thunk>)"),
            UnitRef::WithProviders(inner) => write!(f, "WithProviders({:?})", inner),
        }
    }
}

/// Declarations, imports or exports of a module
#[derive(Clone)]
pub enum RefList {
    Eager(Vec<UnitRef>),
    /// The whole list is produced lazily (`imports: () => [...]`)
    Deferred(ListFn),
}

impl RefList {
    pub fn deferred(f: impl Fn(&UnitRegistry) -> Vec<UnitRef> + 'static) -> Self {
        RefList::Deferred(Rc::new(f))
    }
}

impl Default for RefList {
    fn default() -> Self {
        RefList::Eager(Vec::new())
    }
}

impl<T: Into<UnitRef>> From<Vec<T>> for RefList {
    fn from(refs: Vec<T>) -> Self {
        RefList::Eager(refs.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for RefList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefList::Eager(refs) => f.debug_list().entries(refs).finish(),
            RefList::Deferred(_) => f.write_str("Deferred(<thunk>)"),
        }
    }
}

/// Raw module metadata as attached at declaration time
#[derive(Debug, Clone, Default)]
pub struct ModuleMeta {
    pub declarations: RefList,
    pub imports: RefList,
    pub exports: RefList,
}

impl ModuleMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declarations(mut self, refs: impl Into<RefList>) -> Self {
        self.declarations = refs.into();
        self
    }

    pub fn imports(mut self, refs: impl Into<RefList>) -> Self {
        self.imports = refs.into();
        self
    }

    pub fn exports(mut self, refs: impl Into<RefList>) -> Self {
        self.exports = refs.into();
        self
    }
}

/// A registered unit
#[derive(Debug, Clone)]
pub struct UnitDef {
    pub id: UnitId,
    pub name: String,
    pub kind: UnitKind,
    /// Only meaningful for components, directives and pipes
    pub standalone: bool,
    /// Present iff `kind == Module`
    pub module: Option<ModuleMeta>,
    /// Back-reference written by the declaring-module binder
    pub(crate) declaring_module: Option<UnitId>,
}

impl UnitDef {
    pub fn declaring_module(&self) -> Option<UnitId> {
        self.declaring_module
    }

    /// Standalone component, directive or pipe
    pub fn is_standalone_capable(&self) -> bool {
        self.standalone && self.kind.is_declarable()
    }
}
