pub mod settings;

mod analyzer {
    pub(crate) mod alias_graph;
    pub(crate) mod alias_warnings;
    pub(crate) mod analyzer_errors;
    pub(crate) mod ast;
    pub(crate) mod copies;
    pub(crate) mod dev_logging;
    pub(crate) mod environment;
    pub(crate) mod hazards;
    pub(crate) mod literals;
    pub(crate) mod session;
    pub(crate) mod statements;
    pub(crate) mod string_interning;
}

#[cfg(test)]
mod analyzer_tests {
    mod helpers;

    mod copy_tests;
    mod graph_tests;
    mod hazard_tests;
    mod literal_tests;
    mod property_tests;
    mod session_tests;
}

use crate::settings::Config;

// Public surface for the binary and for embedders
pub use crate::analyzer::alias_warnings::{AliasWarning, WarningKind};
pub use crate::analyzer::analyzer_errors::{
    AnalysisError, ErrorType, print_errors, print_formatted_error, print_warnings,
};
pub use crate::analyzer::ast::{
    AssignTarget, Expr, NamePath, Parameter, Program, Statement,
};
pub use crate::analyzer::session::{
    AnalysisReport, AnalysisSession, BindingDump, BodyReport, MODULE_BODY_NAME,
};

pub struct Analyzer<'a> {
    config: &'a Config,
}

impl<'a> Analyzer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// -----------------------------
    ///      FRONT-END BOUNDARY
    /// -----------------------------
    /// The external front-end parses source text and hands over a typed
    /// statement/expression tree as JSON. Deserializing it is the only
    /// fatal failure in the tool: nothing is analyzed on malformed input.
    pub fn source_to_tree(&self, source: &str) -> Result<Program, AnalysisError> {
        match Program::from_json(source) {
            Ok(program) => Ok(program),
            Err(e) => Err(AnalysisError::frontend_error(format!(
                "{}: {}",
                self.config.input_path.display(),
                e.msg
            ))),
        }
    }

    /// -----------------------------
    ///           ANALYSIS
    /// -----------------------------
    /// One deterministic sweep: every function body in source order, then
    /// the module body. Produces the diagnostics stream, per-body
    /// environment dumps, and any body-scoped errors.
    pub fn tree_to_report(&self, program: &Program) -> AnalysisReport {
        AnalysisSession::new().analyze(program)
    }
}
