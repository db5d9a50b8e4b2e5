use crate::analyzer::alias_graph::NodeId;
use crate::analyzer::analyzer_errors::AnalysisError;
use crate::analyzer::string_interning::{InternedString, StringTable};
use crate::settings::{LIKELY_BINDINGS_PER_BODY, SYNTHETIC_KEY_PREFIX};
use indexmap::IndexMap;

/// What a name is currently bound to.
///
/// The two marker variants never enter the alias graph by themselves: a
/// parameter defaulting to a constant is a plain value, and a parameter with
/// no default could be anything a caller supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// The name owns (or shares) this alias node at the top level
    Container(NodeId),

    /// A non-container constant
    Scalar,

    /// Any value, possibly a container, supplied by a caller
    Unknown,
}

impl Binding {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Binding::Container(id) => Some(*id),
            Binding::Scalar | Binding::Unknown => None,
        }
    }
}

/// Mapping from variable name to its current binding.
///
/// One instance per function activation plus one for module scope.
/// Insertion-ordered so pair scans and dumps visit names deterministically.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    slots: IndexMap<InternedString, Binding>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            slots: IndexMap::with_capacity(LIKELY_BINDINGS_PER_BODY),
        }
    }

    pub fn bind(&mut self, name: InternedString, binding: Binding) {
        self.slots.insert(name, binding);
    }

    pub fn get(&self, name: InternedString) -> Option<Binding> {
        self.slots.get(&name).copied()
    }

    /// Resolve a read. A name never bound in this scope is fatal to the
    /// enclosing body's analysis.
    pub fn resolve(
        &self,
        name: InternedString,
        table: &StringTable,
        line: u32,
    ) -> Result<Binding, AnalysisError> {
        self.get(name)
            .ok_or_else(|| AnalysisError::unresolved_name(table.resolve(name), line))
    }

    /// All bindings in insertion order, synthetic keys included
    pub fn iter(&self) -> impl Iterator<Item = (InternedString, Binding)> + '_ {
        self.slots.iter().map(|(k, v)| (*k, *v))
    }

    /// Bindings of user-defined names only, in insertion order.
    /// Keys generated for anonymous interior levels are skipped.
    pub fn user_bindings<'a>(
        &'a self,
        table: &'a StringTable,
    ) -> impl Iterator<Item = (InternedString, Binding)> + 'a {
        self.iter()
            .filter(|(name, _)| !is_synthetic(table.resolve(*name)))
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

pub fn is_synthetic(name: &str) -> bool {
    name.starts_with(SYNTHETIC_KEY_PREFIX)
}

/// Generates unique keys for anonymous interior nesting levels.
///
/// A monotonic counter scoped to one analysis run, so diagnostics and
/// environment dumps are reproducible across runs.
#[derive(Debug, Default)]
pub struct KeyGen {
    next: u32,
}

impl KeyGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self, table: &mut StringTable) -> InternedString {
        let key = format!("{SYNTHETIC_KEY_PREFIX}{}", self.next);
        self.next += 1;
        table.get_or_intern(key)
    }
}
