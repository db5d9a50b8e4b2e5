//! Shallow- and deep-copy semantics over the alias graph.

use crate::analyzer::alias_graph::NodeId;
use crate::analyzer::analyzer_errors::AnalysisError;
use crate::analyzer::ast::Expr;
use crate::analyzer::environment::{Binding, Environment};
use crate::analyzer::session::AnalysisSession;
use crate::analyzer::string_interning::InternedString;

/// `target = copy.copy(source)`
///
/// Only the outermost level is duplicated: the new top node shares the
/// source's child, so nested mutation through either name is mutually
/// visible, while replacing one top-level container leaves the other alone.
pub fn shallow_copy(
    sess: &mut AnalysisSession,
    env: &mut Environment,
    target: InternedString,
    args: &[Expr],
    line: u32,
) -> Result<(), AnalysisError> {
    let Some(source) = copy_source(sess, args) else {
        return Ok(());
    };
    let binding = env.resolve(source, &sess.names, line)?;

    let Binding::Container(source_node) = binding else {
        let name = sess.names.resolve(source).to_owned();
        sess.messages
            .errors
            .push(AnalysisError::copy_source_not_container(&name, line));
        return Ok(());
    };

    let child = sess.arena.node(source_node).child;
    let top = sess.arena.alloc_named(target, child);
    if let Some(c) = child {
        sess.arena.node_mut(c).backrefs.insert(top);
    }
    env.bind(target, Binding::Container(top));

    Ok(())
}

/// `target = copy.deepcopy(source)`
///
/// Every level is duplicated: the new chain is disjoint from the source at
/// every depth. Interior levels get fresh generated keys, like anonymous
/// levels built from literals.
pub fn deep_copy(
    sess: &mut AnalysisSession,
    env: &mut Environment,
    target: InternedString,
    args: &[Expr],
    line: u32,
) -> Result<(), AnalysisError> {
    let Some(source) = copy_source(sess, args) else {
        return Ok(());
    };
    let binding = env.resolve(source, &sess.names, line)?;

    let Binding::Container(source_node) = binding else {
        let name = sess.names.resolve(source).to_owned();
        sess.messages
            .errors
            .push(AnalysisError::copy_source_not_container(&name, line));
        return Ok(());
    };

    clone_chain(sess, env, source_node, target);

    Ok(())
}

/// Clone `source`'s chain bottom-up, binding every level under `key`
fn clone_chain(
    sess: &mut AnalysisSession,
    env: &mut Environment,
    source: NodeId,
    key: InternedString,
) -> NodeId {
    let child = match sess.arena.node(source).child {
        Some(source_child) => {
            let child_key = sess.keys.fresh(&mut sess.names);
            Some(clone_chain(sess, env, source_child, child_key))
        }
        None => None,
    };

    let top = sess.arena.alloc_named(key, child);
    if let Some(c) = child {
        sess.arena.node_mut(c).backrefs.insert(top);
    }
    env.bind(key, Binding::Container(top));

    top
}

/// The copy primitives take one bare-name argument. Anything else is
/// outside the supported grammar and leaves the binding unchanged.
fn copy_source(sess: &mut AnalysisSession, args: &[Expr]) -> Option<InternedString> {
    match args.first() {
        Some(Expr::Name(path)) if path.depth == 0 => Some(sess.names.intern(&path.name)),
        _ => None,
    }
}
