use rustc_hash::FxHashMap;

/// A unique identifier for an interned name, represented as a u32 for memory
/// efficiency. Provides type safety to prevent mixing name IDs with other
/// integer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringId(u32);

/// Type alias for better readability - InternedString is the same as StringId
pub type InternedString = StringId;

impl StringId {
    #[allow(dead_code)]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Compare this interned name with a string slice without allocating.
    /// Requires access to the StringTable that created this ID.
    #[allow(dead_code)]
    pub fn eq_str(self, table: &StringTable, other: &str) -> bool {
        table.resolve(self) == other
    }

    /// Resolve this interned name using the provided StringTable.
    #[allow(dead_code)]
    pub fn resolve(self, table: &StringTable) -> &str {
        table.resolve(self)
    }
}

impl std::fmt::Display for StringId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StringId({})", self.0)
    }
}

/// Interns every variable name and generated key exactly once.
///
/// Dual mapping:
/// - Vec<String> for O(1) ID→name resolution
/// - FxHashMap<String, StringId> for O(1) name→ID lookup while interning
///
/// Names flow through the alias graph, environments, and diagnostics as plain
/// u32-backed IDs; the table resolves them back at report time.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    /// Primary storage: ID → name mapping for fast resolution
    strings: Vec<String>,

    /// Reverse lookup: name → ID mapping for fast interning
    string_to_id: FxHashMap<String, StringId>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string slice, returning its unique ID.
    /// If the string already exists, returns the existing ID.
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&existing_id) = self.string_to_id.get(s) {
            return existing_id;
        }

        let new_id = StringId(self.strings.len() as u32);
        self.strings.push(s.to_owned());
        self.string_to_id.insert(s.to_owned(), new_id);

        new_id
    }

    /// Intern a String by taking ownership, avoiding an extra allocation when
    /// the string is new. An already-interned String is dropped and the
    /// existing ID returned.
    pub fn get_or_intern(&mut self, s: String) -> InternedString {
        if let Some(&existing_id) = self.string_to_id.get(&s) {
            return existing_id;
        }

        let new_id = StringId(self.strings.len() as u32);
        self.string_to_id.insert(s.clone(), new_id);
        self.strings.push(s);

        new_id
    }

    /// Resolve an interned ID back to its name.
    ///
    /// # Panics
    /// Panics if the StringId was not created by this StringTable
    pub fn resolve(&self, id: InternedString) -> &str {
        self.strings
            .get(id.0 as usize)
            .map(|s| s.as_str())
            .unwrap_or_else(|| panic!("Invalid StringId: {}", id.0))
    }

    /// Non-panicking variant of resolve.
    #[allow(dead_code)]
    pub fn try_resolve(&self, id: InternedString) -> Option<&str> {
        self.strings.get(id.0 as usize).map(|s| s.as_str())
    }

    /// Check whether a name is already interned without interning it.
    #[allow(dead_code)]
    pub fn get_existing(&self, s: &str) -> Option<InternedString> {
        self.string_to_id.get(s).copied()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
