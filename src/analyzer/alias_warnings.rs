use colour::yellow_ln_bold;
use serde::Serialize;

/// One entry in the diagnostics stream: two names were caught denoting the
/// same underlying mutable structure.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AliasWarning {
    pub msg: String,
    pub line: u32,
    pub warning_kind: WarningKind,
}

impl AliasWarning {
    pub fn shared_memory(line: u32, first: impl Into<String>, second: impl Into<String>) -> Self {
        let first = first.into();
        let second = second.into();
        AliasWarning {
            msg: format!(
                "'{first}' and '{second}' denote the same memory; mutation through one is visible through the other"
            ),
            line,
            warning_kind: WarningKind::SharedMemory { first, second },
        }
    }

    pub fn aliased_access(
        line: u32,
        name: impl Into<String>,
        depth: usize,
        other: impl Into<String>,
        other_depth: usize,
    ) -> Self {
        let name = name.into();
        let other = other.into();
        AliasWarning {
            msg: format!("'{name}' at depth {depth} aliases '{other}' at depth {other_depth}"),
            line,
            warning_kind: WarningKind::AliasedAccess {
                name,
                depth,
                other,
                other_depth,
            },
        }
    }

    /// Names involved in this warning, in emission order
    pub fn names(&self) -> [&str; 2] {
        match &self.warning_kind {
            WarningKind::SharedMemory { first, second } => [first, second],
            WarningKind::AliasedAccess { name, other, .. } => [name, other],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// Two names bound to the identical node at the top level
    SharedMemory { first: String, second: String },

    /// An accessed position coincides with another variable's chain at some
    /// nesting depth
    AliasedAccess {
        name: String,
        depth: usize,
        other: String,
        other_depth: usize,
    },
}

pub fn print_formatted_warning(w: &AliasWarning) {
    yellow_ln_bold!("WARNING: ");
    println!("Line {}: {}", w.line, w.msg);
}
