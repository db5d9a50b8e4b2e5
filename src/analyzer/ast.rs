use crate::analyzer::analyzer_errors::AnalysisError;
use serde::{Deserialize, Serialize};

/// The typed statement/expression tree handed over by the front-end.
///
/// The front-end owns parsing: it collapses dotted/indexed chains to flat
/// keys, attaches source lines, and serializes the whole module as JSON.
/// This boundary is the only place malformed input is fatal - everything
/// after it is scoped to one body at worst.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Program {
    pub body: Vec<Statement>,
}

impl Program {
    /// FRONT-END BOUNDARY
    /// Deserialize a front-end tree. Fails before any analysis begins.
    pub fn from_json(source: &str) -> Result<Program, AnalysisError> {
        serde_json::from_str(source)
            .map_err(|e| AnalysisError::frontend_error(format!("Malformed input tree: {e}")))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Assign {
        target: AssignTarget,
        value: Expr,
        line: u32,
    },

    // Processed through the identical path as Assign.
    // Element-level mutation is not modeled more precisely than node identity.
    AugAssign {
        target: AssignTarget,
        value: Expr,
        line: u32,
    },

    FunctionDef {
        name: String,
        params: Vec<Parameter>,
        body: Vec<Statement>,
        line: u32,
    },
}

impl Statement {
    pub fn line(&self) -> u32 {
        match self {
            Statement::Assign { line, .. }
            | Statement::AugAssign { line, .. }
            | Statement::FunctionDef { line, .. } => *line,
        }
    }
}

/// The left side of an assignment.
///
/// `Malformed` is the front-end's marker for a target it could not collapse
/// to a flat key. The statement is skipped and reported, never a crash.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssignTarget {
    Path(NamePath),
    Malformed,
}

/// A dotted/indexed chain collapsed to one flat key.
///
/// `depth` counts subscript layers: `a` is depth 0, `a[0]` depth 1,
/// `a[0][1]` depth 2. The dotted part is already folded into `name`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NamePath {
    pub name: String,

    #[serde(default)]
    pub depth: usize,
}

impl NamePath {
    pub fn new(name: impl Into<String>) -> Self {
        NamePath {
            name: name.into(),
            depth: 0,
        }
    }

    pub fn indexed(name: impl Into<String>, depth: usize) -> Self {
        NamePath {
            name: name.into(),
            depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// A read of a bare or indexed name
    Name(NamePath),

    /// A (possibly nested) list literal
    List { elements: Vec<Expr> },

    /// A non-container constant. The value itself is never tracked.
    Constant,

    /// A call with its callee collapsed to one flat key.
    /// Only the two copy primitives are interpreted; every other call is
    /// ignored.
    Call { callee: String, args: Vec<Expr> },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Parameter {
    pub name: String,

    /// Constant or list literal. A parameter without a default can be bound
    /// to anything by a caller, including a container.
    #[serde(default)]
    pub default: Option<Expr>,
}
