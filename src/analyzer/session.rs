//! One analysis run over one front-end tree.
//!
//! The session owns every piece of run-wide state: the node arena, the name
//! interner, the generated-key counter, and the collected messages. Each
//! function body - and the module body after them - is swept once, in
//! source order, with a fresh environment and a fresh hazard detector.

use crate::analyzer::alias_graph::AliasArena;
use crate::analyzer::alias_warnings::AliasWarning;
use crate::analyzer::analyzer_errors::{AnalysisError, AnalysisMessages};
use crate::analyzer::ast::{AssignTarget, Expr, Parameter, Program, Statement};
use crate::analyzer::environment::{Binding, Environment, KeyGen};
use crate::analyzer::hazards::{self, HazardDetector};
use crate::analyzer::string_interning::StringTable;
use crate::analyzer::{literals, statements};
use crate::tree_log;
use serde::Serialize;

/// Display name for the top-level statement sequence
pub const MODULE_BODY_NAME: &str = "<module>";

pub struct AnalysisSession {
    pub(crate) arena: AliasArena,
    pub(crate) names: StringTable,
    pub(crate) keys: KeyGen,
    pub(crate) messages: AnalysisMessages,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        AnalysisSession {
            arena: AliasArena::new(),
            names: StringTable::new(),
            keys: KeyGen::new(),
            messages: AnalysisMessages::new(),
        }
    }

    /// Analyze every function body in source order, then the module body,
    /// and consume the session into a report.
    ///
    /// Errors inside one body never abort the run: a fatal error drops that
    /// body's dump and the sweep moves on to the next body.
    pub fn analyze(mut self, program: &Program) -> AnalysisReport {
        tree_log!("{program:#?}");

        let mut bodies = Vec::new();

        for stmt in &program.body {
            if let Statement::FunctionDef {
                name,
                params,
                body,
                line,
            } = stmt
            {
                if let Some(report) = self.run_body(name, Some(params), body, *line) {
                    bodies.push(report);
                }
            }
        }

        let module_body: Vec<Statement> = program
            .body
            .iter()
            .filter(|stmt| !matches!(stmt, Statement::FunctionDef { .. }))
            .cloned()
            .collect();
        if let Some(report) = self.run_body(MODULE_BODY_NAME, None, &module_body, 0) {
            bodies.push(report);
        }

        AnalysisReport {
            bodies,
            warnings: self.messages.warnings,
            errors: self.messages.errors,
        }
    }

    /// Sweep one straight-line body. Returns its environment dump, or None
    /// if a fatal error ended the body's analysis early.
    fn run_body(
        &mut self,
        label: &str,
        params: Option<&[Parameter]>,
        body: &[Statement],
        line: u32,
    ) -> Option<BodyReport> {
        let mut env = Environment::new();
        let mut detector = HazardDetector::new();

        match self.run_body_inner(&mut env, &mut detector, params, body, line) {
            Ok(()) => Some(self.dump_environment(label, &env)),
            Err(e) => {
                self.messages.errors.push(e.with_body(label));
                None
            }
        }
    }

    fn run_body_inner(
        &mut self,
        env: &mut Environment,
        detector: &mut HazardDetector,
        params: Option<&[Parameter]>,
        body: &[Statement],
        line: u32,
    ) -> Result<(), AnalysisError> {
        if let Some(params) = params {
            self.seed_parameters(env, params, line)?;

            // Parameter-default literals can already alias each other
            detector.scan_pairs(self, env, line);
        }

        for stmt in body {
            let (target, value, line) = match stmt {
                // Nested function definitions are not modeled: analysis is
                // intraprocedural and bodies are straight-line sequences
                Statement::FunctionDef { .. } => continue,

                Statement::Assign {
                    target,
                    value,
                    line,
                }
                | Statement::AugAssign {
                    target,
                    value,
                    line,
                } => (target, value, *line),
            };

            let path = match target {
                AssignTarget::Path(path) => path,
                AssignTarget::Malformed => {
                    // Skip the whole statement: no binding change, no
                    // hazard scan for either side
                    self.messages
                        .errors
                        .push(AnalysisError::malformed_target(line));
                    continue;
                }
            };

            // Both sides are scanned against the pre-statement environment
            hazards::scan_assign_sides(self, env, path, value, line)?;

            statements::process_assign(self, env, path, value, line)?;

            detector.scan_pairs(self, env, line);
        }

        Ok(())
    }

    /// Bind each parameter before the body's first statement: a constant
    /// default is a plain value, a list-literal default builds its chain,
    /// and a parameter without a default could be anything a caller
    /// supplies.
    fn seed_parameters(
        &mut self,
        env: &mut Environment,
        params: &[Parameter],
        line: u32,
    ) -> Result<(), AnalysisError> {
        for param in params {
            let key = self.names.intern(&param.name);

            match &param.default {
                None => env.bind(key, Binding::Unknown),
                Some(Expr::Constant) => env.bind(key, Binding::Scalar),
                Some(Expr::List { elements }) => {
                    literals::build(self, env, key, elements, line)?;
                }

                // The front-end only produces constant and list defaults;
                // anything else is treated like a caller-supplied value
                Some(_) => env.bind(key, Binding::Unknown),
            }
        }

        Ok(())
    }

    /// Name-sorted dump of a body's final environment, one line per name,
    /// rendering the chain of node identities below each binding
    fn dump_environment(&self, label: &str, env: &Environment) -> BodyReport {
        let mut bindings: Vec<BindingDump> = env
            .iter()
            .map(|(name, binding)| BindingDump {
                name: self.names.resolve(name).to_owned(),
                chain: self.render_chain(binding),
            })
            .collect();
        bindings.sort_by(|a, b| a.name.cmp(&b.name));

        BodyReport {
            name: label.to_owned(),
            bindings,
        }
    }

    fn render_chain(&self, binding: Binding) -> String {
        match binding {
            Binding::Scalar => "value".to_owned(),
            Binding::Unknown => "potential".to_owned(),
            Binding::Container(top) => {
                let mut rendered = top.to_string();
                let mut node = top;
                while let Some(child) = self.arena.node(node).child {
                    rendered.push_str(" -> ");
                    rendered.push_str(&child.to_string());
                    node = child;
                }
                rendered
            }
        }
    }
}

/// Everything one run produced: per-body environment dumps, the diagnostics
/// stream, and any scoped errors.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub bodies: Vec<BodyReport>,
    pub warnings: Vec<AliasWarning>,
    pub errors: Vec<AnalysisError>,
}

impl AnalysisReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// The golden-file artifact for one body: a deterministic, name-sorted view
/// of the final environment.
#[derive(Debug, Serialize)]
pub struct BodyReport {
    pub name: String,
    pub bindings: Vec<BindingDump>,
}

#[derive(Debug, Serialize)]
pub struct BindingDump {
    pub name: String,

    /// `n3 -> n1` for containers, `value` / `potential` for markers
    pub chain: String,
}
