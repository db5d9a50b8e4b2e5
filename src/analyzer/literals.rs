//! Builds alias-node chains from list-literal expressions.
//!
//! Container elements are summarized to a single abstract position: every
//! element that resolves to a node is folded into one shared child through
//! `join`. Depth in the literal becomes depth in the chain.

use crate::analyzer::analyzer_errors::AnalysisError;
use crate::analyzer::ast::Expr;
use crate::analyzer::environment::{Binding, Environment};
use crate::analyzer::session::AnalysisSession;
use crate::analyzer::string_interning::InternedString;
use crate::analyzer::alias_graph::NodeId;

/// Build the chain for `key = [ ... ]` and bind `key` to its top node.
///
/// Each element resolves to at most one child candidate:
/// - a bare name resolves through the environment (markers contribute
///   nothing - they never enter the graph)
/// - a nested list literal recurses under a fresh generated key
/// - constants, indexed reads, and calls contribute nothing
///
/// Distinct candidates are folded pairwise through `join`, collapsing all
/// element positions into one shared representative child.
pub fn build(
    sess: &mut AnalysisSession,
    env: &mut Environment,
    key: InternedString,
    elements: &[Expr],
    line: u32,
) -> Result<NodeId, AnalysisError> {
    let mut candidates: Vec<NodeId> = Vec::new();

    for element in elements {
        if let Some(node) = element_candidate(sess, env, element, line)? {
            if !candidates.contains(&node) {
                candidates.push(node);
            }
        }
    }

    let mut child: Option<NodeId> = None;
    for candidate in candidates {
        child = sess.arena.join(child, Some(candidate), env);
    }

    let top = sess.arena.alloc_named(key, child);
    if let Some(c) = child {
        sess.arena.node_mut(c).backrefs.insert(top);
    }
    env.bind(key, Binding::Container(top));

    Ok(top)
}

fn element_candidate(
    sess: &mut AnalysisSession,
    env: &mut Environment,
    element: &Expr,
    line: u32,
) -> Result<Option<NodeId>, AnalysisError> {
    match element {
        Expr::Name(path) if path.depth == 0 => {
            let name = sess.names.intern(&path.name);
            let binding = env.resolve(name, &sess.names, line)?;
            Ok(binding.node())
        }

        Expr::List { elements } => {
            let key = sess.keys.fresh(&mut sess.names);
            Ok(Some(build(sess, env, key, elements, line)?))
        }

        // Indexed reads, constants, and calls inside a literal contribute no
        // child candidate. The reads are still hazard-scanned by the caller.
        Expr::Name(_) | Expr::Constant | Expr::Call { .. } => Ok(None),
    }
}
