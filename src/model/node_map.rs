//! Upward view of a tree: for every vertex its parent and branch length.

use crate::model::tree::{Tree, VertexIndex};

/// Parent link of one vertex: `(parent, branch_length)`.
///
/// The root (and any vertex never attached to a parent) maps to `(None, None)`.
pub type ParentLink = (Option<VertexIndex>, Option<f64>);

// =#========================================================================#=
// NODE MAP
// =#========================================================================#=
/// Maps every vertex of a [Tree] to its [ParentLink].
///
/// Built once per tree by [NodeMap::from_tree] and owned by the caller;
/// there is no shared, process-wide map.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMap {
    links: Vec<ParentLink>,
}

impl NodeMap {
    /// Walks the tree from the root, following outgoing edges, and records
    /// the parent link of every vertex it reaches.
    ///
    /// Vertices not reachable from the root keep `(None, None)`.
    pub fn from_tree(tree: &Tree) -> Self {
        let mut links = vec![(None, None); tree.num_vertices()];
        let mut seen = vec![false; tree.num_vertices()];
        let mut stack: Vec<VertexIndex> = tree.root_index().into_iter().collect();

        while let Some(parent) = stack.pop() {
            if std::mem::replace(&mut seen[parent], true) {
                continue; // only reachable through a malformed (cyclic) arena
            }
            for edge in tree.edges(parent) {
                links[edge.child] = (Some(parent), edge.branch_length.map(|bl| *bl));
                stack.push(edge.child);
            }
        }

        NodeMap { links }
    }

    /// Returns the parent link of the given vertex.
    ///
    /// # Panics
    /// Panics if `vertex` is out of bounds.
    pub fn get(&self, vertex: VertexIndex) -> ParentLink {
        self.links[vertex]
    }

    /// Returns the number of vertices covered.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` if the map covers no vertex.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterates over `(vertex, parent link)` pairs in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexIndex, ParentLink)> + '_ {
        self.links.iter().copied().enumerate()
    }
}
