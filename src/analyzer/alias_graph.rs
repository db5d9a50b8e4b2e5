//! Arena-stored alias graph.
//!
//! One `AliasNode` models one nesting level of a container, shared by every
//! name currently denoting it at that level. "Same memory" always means
//! node-identity equality, never structural equality of contents.

use crate::analyzer::environment::{Binding, Environment};
use crate::analyzer::string_interning::InternedString;
use crate::graph_log;
use crate::settings::LIKELY_NODES_PER_BODY;
use indexmap::IndexSet;

/// Index into the arena's node table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// One nesting level of a container.
#[derive(Debug, Clone, Default)]
pub struct AliasNode {
    /// Variable names currently bound to this node at this level
    pub names: IndexSet<InternedString>,

    /// The next nesting level. Shared: several nodes may declare the same
    /// child.
    pub child: Option<NodeId>,

    /// Reverse index of `child`: every node that currently declares this one
    /// as its child. Not an ownership edge; exists so a merge can repoint
    /// all referrers in O(referrer-count).
    pub backrefs: IndexSet<NodeId>,
}

/// Table of all alias nodes created during one analysis run.
///
/// Nodes are never removed; a node retired by `join` simply becomes
/// unreachable once no name or backref leads to it.
#[derive(Debug, Default)]
pub struct AliasArena {
    nodes: Vec<AliasNode>,
}

impl AliasArena {
    pub fn new() -> Self {
        AliasArena {
            nodes: Vec::with_capacity(LIKELY_NODES_PER_BODY),
        }
    }

    pub fn alloc(&mut self, node: AliasNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocate a fresh node bound to one name, with no backrefs yet
    pub fn alloc_named(&mut self, name: InternedString, child: Option<NodeId>) -> NodeId {
        let mut names = IndexSet::new();
        names.insert(name);
        self.alloc(AliasNode {
            names,
            child,
            backrefs: IndexSet::new(),
        })
    }

    pub fn node(&self, id: NodeId) -> &AliasNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut AliasNode {
        &mut self.nodes[id.index()]
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of child links below `id` (a node with no child has depth 0)
    #[allow(dead_code)]
    pub fn chain_depth(&self, mut id: NodeId) -> usize {
        let mut depth = 0;
        while let Some(child) = self.node(id).child {
            id = child;
            depth += 1;
        }
        depth
    }

    /// Descend `depth` child links from `id`. None if the chain is shorter.
    pub fn descend(&self, mut id: NodeId, depth: usize) -> Option<NodeId> {
        for _ in 0..depth {
            id = self.node(id).child?;
        }
        Some(id)
    }

    /// Unify two alias nodes: the single mechanism realizing "these two
    /// names now denote the same memory".
    ///
    /// Children merge before parents, so one call unifies the whole chain
    /// below both inputs. The two inputs are logically retired: a new node
    /// takes over the union of their names and referrers, every old
    /// referrer is repointed at it, and every affected name is rebound in
    /// the environment. Nothing keeps referring to the retired pair.
    ///
    /// Recursion depth equals nesting depth.
    pub fn join(
        &mut self,
        a: Option<NodeId>,
        b: Option<NodeId>,
        env: &mut Environment,
    ) -> Option<NodeId> {
        let (a, b) = match (a, b) {
            (None, None) => return None,
            (Some(x), None) | (None, Some(x)) => return Some(x),
            // Already the same memory: same name set, no duplicated backrefs
            (Some(a), Some(b)) if a == b => return Some(a),
            (Some(a), Some(b)) => (a, b),
        };

        let merged_child = self.join(self.node(a).child, self.node(b).child, env);

        // The inputs' child edges are superseded by the merged node's
        if let Some(c) = merged_child {
            let child = self.node_mut(c);
            child.backrefs.shift_remove(&a);
            child.backrefs.shift_remove(&b);
        }

        let mut names = self.node(a).names.clone();
        names.extend(self.node(b).names.iter().copied());
        let mut backrefs = self.node(a).backrefs.clone();
        backrefs.extend(self.node(b).backrefs.iter().copied());

        let merged = self.alloc(AliasNode {
            names: names.clone(),
            child: merged_child,
            backrefs: backrefs.clone(),
        });

        if let Some(c) = merged_child {
            self.node_mut(c).backrefs.insert(merged);
        }

        // Repoint every old referrer of either input
        for parent in &backrefs {
            self.node_mut(*parent).child = Some(merged);
        }

        // No stale reference survives: every name of either input now
        // resolves to the merged node
        for name in &names {
            env.bind(*name, Binding::Container(merged));
        }

        graph_log!("join {a} + {b} -> {merged}");

        Some(merged)
    }
}
