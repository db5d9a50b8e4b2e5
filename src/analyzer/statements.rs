//! Per-statement updates to the environment.
//!
//! Assignment and augmented assignment share one path; the analysis does not
//! model element-level mutation more precisely than node identity.

use crate::analyzer::analyzer_errors::AnalysisError;
use crate::analyzer::ast::{Expr, NamePath};
use crate::analyzer::environment::{Binding, Environment};
use crate::analyzer::session::AnalysisSession;
use crate::analyzer::{copies, literals};
use crate::env_log;
use crate::settings::{DEEP_COPY_CALLEE, SHALLOW_COPY_CALLEE};

/// Process one (possibly augmented) assignment.
///
/// Supported right-hand sides: a list literal, a bare-name reference, and
/// the two copy primitives. Anything else is a no-op that leaves the
/// binding unchanged - a deliberate precision gap, not an error.
///
/// An indexed target (`a[0] = ...`) mutates an element without rebinding
/// the name, so node identity is unchanged and nothing happens here; only
/// the hazard scans observe that statement.
pub fn process_assign(
    sess: &mut AnalysisSession,
    env: &mut Environment,
    target: &NamePath,
    value: &Expr,
    line: u32,
) -> Result<(), AnalysisError> {
    if target.depth > 0 {
        return Ok(());
    }

    let key = sess.names.intern(&target.name);

    match value {
        Expr::List { elements } => {
            // A literal always builds a fresh chain, replacing any prior
            // binding
            literals::build(sess, env, key, elements, line)?;
        }

        Expr::Name(path) if path.depth == 0 => {
            let source = sess.names.intern(&path.name);
            let source_binding = env.resolve(source, &sess.names, line)?;

            match (env.get(key), source_binding) {
                // Re-binding two containers means "target now denotes the
                // same memory as source": merge their alias classes
                (Some(Binding::Container(t)), Binding::Container(s)) => {
                    sess.arena.join(Some(t), Some(s), env);
                }

                // First binding aliases without destroying unrelated prior
                // state
                (_, Binding::Container(s)) => {
                    env.bind(key, Binding::Container(s));
                    sess.arena.node_mut(s).names.insert(key);
                }

                // Markers never merge into the graph; the target just
                // becomes the same kind of marker
                (_, marker) => {
                    env.bind(key, marker);
                }
            }
        }

        Expr::Call { callee, args } => {
            if callee == SHALLOW_COPY_CALLEE {
                copies::shallow_copy(sess, env, key, args, line)?;
            } else if callee == DEEP_COPY_CALLEE {
                copies::deep_copy(sess, env, key, args, line)?;
            }
            // All other calls are ignored
        }

        // Constants and indexed reads leave the binding unchanged
        Expr::Name(_) | Expr::Constant => {
            env_log!("line {line}: unsupported value expression, binding left unchanged");
        }
    }

    Ok(())
}
