//! Walks the environment and the graph after every statement to surface
//! names that silently share memory.

use crate::analyzer::alias_warnings::AliasWarning;
use crate::analyzer::analyzer_errors::AnalysisError;
use crate::analyzer::ast::{Expr, NamePath};
use crate::analyzer::environment::{Binding, Environment};
use crate::analyzer::session::AnalysisSession;
use crate::analyzer::alias_graph::NodeId;
use crate::analyzer::string_interning::InternedString;
use rustc_hash::FxHashSet;

/// Per-body detector state.
///
/// The seen-set deduplicates top-level "same memory" reports by node
/// identity and is reset for every analyzed body, so a later function
/// repeating the same aliasing pattern is reported again.
#[derive(Debug, Default)]
pub struct HazardDetector {
    pair_seen: FxHashSet<NodeId>,
}

impl HazardDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare every distinct pair of user-defined names by bound node
    /// identity. Runs after each statement (and once after parameter
    /// seeding). A node enters the seen-set after its row of comparisons,
    /// so one freshly merged alias class reports all pairs against its
    /// first name in a single sweep.
    pub fn scan_pairs(&mut self, sess: &mut AnalysisSession, env: &Environment, line: u32) {
        let user: Vec<(InternedString, Option<NodeId>)> = env
            .user_bindings(&sess.names)
            .map(|(name, binding)| (name, binding.node()))
            .collect();

        for (i, (first, first_node)) in user.iter().enumerate() {
            let Some(node) = first_node else { continue };

            for (second, second_node) in user.iter().skip(i + 1) {
                if *second_node == Some(*node) && !self.pair_seen.contains(node) {
                    sess.messages.warnings.push(AliasWarning::shared_memory(
                        line,
                        sess.names.resolve(*first),
                        sess.names.resolve(*second),
                    ));
                }
            }
            self.pair_seen.insert(*node);
        }
    }
}

/// Scan both sides of an assignment against the pre-statement environment,
/// before the new binding is applied.
///
/// A depth-0 target that is not yet bound is a pure write and reads
/// nothing; an indexed target and every name on the value side are reads,
/// and reading a never-bound name is fatal to the body.
pub fn scan_assign_sides(
    sess: &mut AnalysisSession,
    env: &Environment,
    target: &NamePath,
    value: &Expr,
    line: u32,
) -> Result<(), AnalysisError> {
    let mut seen = FxHashSet::default();

    let target_key = sess.names.intern(&target.name);
    if target.depth > 0 || env.get(target_key).is_some() {
        scan_access(sess, env, target_key, target.depth, line, &mut seen)?;
    }

    scan_expr(sess, env, value, line, &mut seen)
}

/// Every read in an expression feeds an access scan: bare and indexed
/// names directly, list elements and call arguments recursively.
fn scan_expr(
    sess: &mut AnalysisSession,
    env: &Environment,
    expr: &Expr,
    line: u32,
    seen: &mut FxHashSet<NodeId>,
) -> Result<(), AnalysisError> {
    match expr {
        Expr::Constant => Ok(()),

        Expr::Name(path) => {
            let name = sess.names.intern(&path.name);
            scan_access(sess, env, name, path.depth, line, seen)
        }

        Expr::List { elements } => {
            for element in elements {
                scan_expr(sess, env, element, line, seen)?;
            }
            Ok(())
        }

        Expr::Call { args, .. } => {
            for arg in args {
                scan_expr(sess, env, arg, line, seen)?;
            }
            Ok(())
        }
    }
}

/// Resolve `name`, descend `depth` child links, and compare the reached
/// node against every other user-defined variable's chain at any depth.
///
/// Accesses deeper than the modeled chain report nothing. Matches are
/// deduplicated by matched-node identity within one statement.
pub fn scan_access(
    sess: &mut AnalysisSession,
    env: &Environment,
    name: InternedString,
    depth: usize,
    line: u32,
    seen: &mut FxHashSet<NodeId>,
) -> Result<(), AnalysisError> {
    let binding = env.resolve(name, &sess.names, line)?;

    let Binding::Container(top) = binding else {
        return Ok(());
    };
    let Some(accessed) = sess.arena.descend(top, depth) else {
        return Ok(());
    };

    let others: Vec<(InternedString, NodeId)> = env
        .user_bindings(&sess.names)
        .filter(|(other, _)| *other != name)
        .filter_map(|(other, binding)| binding.node().map(|node| (other, node)))
        .collect();

    for (other, other_top) in others {
        let mut node = other_top;
        let mut other_depth = 0;
        loop {
            if node == accessed && seen.insert(node) {
                sess.messages.warnings.push(AliasWarning::aliased_access(
                    line,
                    sess.names.resolve(name),
                    depth,
                    sess.names.resolve(other),
                    other_depth,
                ));
            }
            match sess.arena.node(node).child {
                Some(child) => {
                    node = child;
                    other_depth += 1;
                }
                None => break,
            }
        }
    }

    Ok(())
}
