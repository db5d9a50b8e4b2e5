//! Shared builders for analyzer tests: hand-rolled tree fragments so tests
//! read close to the source they model.

use crate::analyzer::ast::{AssignTarget, Expr, NamePath, Parameter, Program, Statement};
use crate::analyzer::session::{AnalysisReport, AnalysisSession};

pub(crate) fn program(body: Vec<Statement>) -> Program {
    Program { body }
}

pub(crate) fn analyze(body: Vec<Statement>) -> AnalysisReport {
    AnalysisSession::new().analyze(&program(body))
}

pub(crate) fn assign(target: &str, value: Expr, line: u32) -> Statement {
    Statement::Assign {
        target: AssignTarget::Path(NamePath::new(target)),
        value,
        line,
    }
}

pub(crate) fn assign_indexed(target: &str, depth: usize, value: Expr, line: u32) -> Statement {
    Statement::Assign {
        target: AssignTarget::Path(NamePath::indexed(target, depth)),
        value,
        line,
    }
}

pub(crate) fn aug_assign(target: &str, value: Expr, line: u32) -> Statement {
    Statement::AugAssign {
        target: AssignTarget::Path(NamePath::new(target)),
        value,
        line,
    }
}

pub(crate) fn func(name: &str, params: Vec<Parameter>, body: Vec<Statement>, line: u32) -> Statement {
    Statement::FunctionDef {
        name: name.to_string(),
        params,
        body,
        line,
    }
}

pub(crate) fn param(name: &str, default: Option<Expr>) -> Parameter {
    Parameter {
        name: name.to_string(),
        default,
    }
}

pub(crate) fn name(n: &str) -> Expr {
    Expr::Name(NamePath::new(n))
}

pub(crate) fn indexed(n: &str, depth: usize) -> Expr {
    Expr::Name(NamePath::indexed(n, depth))
}

pub(crate) fn list(elements: Vec<Expr>) -> Expr {
    Expr::List { elements }
}

pub(crate) fn constant() -> Expr {
    Expr::Constant
}

pub(crate) fn call(callee: &str, args: Vec<Expr>) -> Expr {
    Expr::Call {
        callee: callee.to_string(),
        args,
    }
}

pub(crate) fn shallow_copy_of(source: &str) -> Expr {
    call(crate::settings::SHALLOW_COPY_CALLEE, vec![name(source)])
}

pub(crate) fn deep_copy_of(source: &str) -> Expr {
    call(crate::settings::DEEP_COPY_CALLEE, vec![name(source)])
}

/// Rendered chain for `name` in the body report, panicking with context if
/// the name is missing
pub(crate) fn chain_of<'a>(report: &'a AnalysisReport, body: &str, name: &str) -> &'a str {
    let body_report = report
        .bodies
        .iter()
        .find(|b| b.name == body)
        .unwrap_or_else(|| panic!("no report for body '{body}'"));
    body_report
        .bindings
        .iter()
        .find(|b| b.name == name)
        .map(|b| b.chain.as_str())
        .unwrap_or_else(|| panic!("'{name}' not bound in '{body}'"))
}
