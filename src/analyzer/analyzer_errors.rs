use crate::analyzer::alias_warnings::{AliasWarning, print_formatted_warning};
use colour::{e_dark_magenta, e_red_ln, e_yellow_ln};
use serde::Serialize;

// The final set of errors and warnings emitted from one analysis run
#[derive(Debug, Default, Serialize)]
pub struct AnalysisMessages {
    pub errors: Vec<AnalysisError>,
    pub warnings: Vec<AliasWarning>,
}

impl AnalysisMessages {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisError {
    pub msg: String,

    /// Source line the error is anchored to, when one exists.
    /// Front-end and file errors have no line.
    pub line: Option<u32>,

    /// Name of the function body being analyzed when the error surfaced
    pub body: Option<String>,

    pub error_type: ErrorType,
}

impl AnalysisError {
    pub fn new(msg: impl Into<String>, error_type: ErrorType) -> AnalysisError {
        AnalysisError {
            msg: msg.into(),
            line: None,
            body: None,
            error_type,
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// An assignment target the front-end could not collapse to a simple
    /// name path. The statement is skipped, nothing else is affected.
    pub fn malformed_target(line: u32) -> Self {
        AnalysisError::new(
            "assignment target is not a simple name path; statement skipped",
            ErrorType::MalformedTarget,
        )
        .with_line(line)
    }

    /// A read of a name that was never bound. Fatal to the enclosing body's
    /// analysis only; sibling bodies still proceed.
    pub fn unresolved_name(name: &str, line: u32) -> Self {
        AnalysisError::new(
            format!("read of '{name}', which is never bound in this scope"),
            ErrorType::UnresolvedName,
        )
        .with_line(line)
    }

    /// A copy primitive applied to something that is not a container.
    /// Reported, statement skipped.
    pub fn copy_source_not_container(name: &str, line: u32) -> Self {
        AnalysisError::new(
            format!("copy source '{name}' is not a container"),
            ErrorType::CopySourceNotContainer,
        )
        .with_line(line)
    }

    /// Malformed input at the front-end boundary. Fatal, reported before any
    /// analysis begins.
    pub fn frontend_error(msg: impl Into<String>) -> Self {
        AnalysisError::new(msg, ErrorType::Frontend)
    }

    pub fn file_error(path: &std::path::Path, msg: impl Into<String>) -> Self {
        AnalysisError::new(
            format!("{}: {}", path.display(), msg.into()),
            ErrorType::File,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorType {
    MalformedTarget,
    UnresolvedName,

    // A right-hand side outside the supported grammar is a silent no-op,
    // not an error. The variant stays so the precision gap has a name.
    #[allow(dead_code)]
    UnsupportedExpression,

    CopySourceNotContainer,
    Frontend,
    File,
}

pub fn error_type_to_str(e_type: &ErrorType) -> &'static str {
    match e_type {
        ErrorType::MalformedTarget => "Malformed Target",
        ErrorType::UnresolvedName => "Unresolved Name",
        ErrorType::UnsupportedExpression => "Unsupported Expression",
        ErrorType::CopySourceNotContainer => "Copy Source Not A Container",
        ErrorType::Frontend => "Malformed Input Tree",
        ErrorType::File => "File Error",
    }
}

pub fn print_formatted_error(e: &AnalysisError) {
    e_dark_magenta!("Error: ");
    e_yellow_ln!("{}", error_type_to_str(&e.error_type));

    if let Some(body) = &e.body {
        eprintln!("In '{body}'");
    }
    match e.line {
        Some(line) => e_red_ln!("Line {line}: {}", e.msg),
        None => e_red_ln!("{}", e.msg),
    }
}

pub fn print_errors(errors: &[AnalysisError]) {
    for e in errors {
        print_formatted_error(e);
    }
}

pub fn print_warnings(warnings: &[AliasWarning]) {
    for w in warnings {
        print_formatted_warning(w);
    }
}
