//! Provides the tree representation.
//!
//! * [Tree] - Arena of [Vertex] values with a designated root
//! * [VertexIndex] - Type used to index vertices in a tree
//! * [Edge] - Outgoing edge of a vertex as seen by distance computations

use crate::model::vertex::{BranchLength, Vertex};

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex], so no vertex holds a reference to another one.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Index of root is maintained.
/// - No assumption on order of indices is maintained.
/// - Vertices may have any positive number of children (multifurcations).
/// - Branch lengths are optional, but if provided are non-negative.
///
/// # Construction
/// Bottom-up: add leaves and internal vertices, passing the indices of
/// children when adding their parent, and finish with [Tree::add_root].
/// Test validity with [`Tree::is_valid()`].
#[derive(Debug, Clone, Default)]
pub struct Tree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: Option<VertexIndex>,
}

/// Outgoing edge of a vertex: `(child, bootstrap, branch_length)`.
///
/// The bootstrap value belongs to the clade below `child` and plays no role
/// in distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub child: VertexIndex,
    pub bootstrap: Option<f64>,
    pub branch_length: Option<BranchLength>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        Tree {
            vertices: Vec::with_capacity(num_vertices),
            root_index: None,
        }
    }

    /// Adds a root with the given children, returning its index.
    pub fn add_root(&mut self, children: Vec<VertexIndex>) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self[child].set_parent(index);
        }
        self.vertices.push(Vertex::new_root(index, children));
        self.root_index = Some(index);
        index
    }

    /// Adds an internal vertex with the given children, returning its index.
    ///
    /// # Arguments
    /// * `children` - Indices of the (already added) children
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent
    /// * `bootstrap` - Optional bootstrap support value
    pub fn add_internal_vertex(
        &mut self,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
        bootstrap: Option<f64>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self[child].set_parent(index);
        }
        self.vertices
            .push(Vertex::new_internal(index, children, branch_length, bootstrap));
        index
    }

    /// Adds a leaf, returning its index.
    pub fn add_leaf(&mut self, branch_length: Option<BranchLength>, label: impl Into<String>) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices
            .push(Vertex::new_leaf(index, branch_length, label.into()));
        index
    }

    /// Returns the index of the root, or `None` during construction.
    pub fn root_index(&self) -> Option<VertexIndex> {
        self.root_index
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set yet.
    pub fn root(&self) -> &Vertex {
        let root_index = self.root_index.unwrap_or(NO_ROOT_SET_INDEX);
        &self[root_index]
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns a mutable reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex_mut(&mut self, index: VertexIndex) -> &mut Vertex {
        &mut self.vertices[index]
    }

    /// Returns all vertices in arena order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_leaf()).count()
    }

    /// Returns the number of internal vertices (excluding the root).
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the indices of all leaves, in pre-order (i.e. Newick text order).
    pub fn leaves(&self) -> Vec<VertexIndex> {
        self.pre_order_iter()
            .filter(|v| v.is_leaf())
            .map(Vertex::index)
            .collect()
    }

    /// Returns the name under which a vertex is reported: `L_<label>` for a
    /// leaf, `B_<index>` for the root and internal vertices.
    pub fn tagged_name(&self, index: VertexIndex) -> String {
        match &self[index] {
            Vertex::Leaf { label, .. } => format!("L_{label}"),
            Vertex::Root { .. } | Vertex::Internal { .. } => format!("B_{index}"),
        }
    }

    /// Returns the outgoing edges of the given vertex as
    /// `(child, bootstrap, branch_length)`; empty for a leaf.
    pub fn edges(&self, index: VertexIndex) -> impl Iterator<Item = Edge> + '_ {
        self[index].children().iter().map(|&child| {
            let child_vertex = &self[child];
            Edge {
                child,
                bootstrap: child_vertex.bootstrap(),
                branch_length: child_vertex.branch_length(),
            }
        })
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root is set and is the only Root vertex
    /// - All vertex indices match their position in the arena
    /// - All child indices are valid and point back to the correct parent
    /// - Root and internal vertices have at least one child
    /// - Every vertex is reachable from the root
    pub fn is_valid(&self) -> bool {
        let Some(root_index) = self.root_index else {
            return false;
        };
        if root_index >= self.vertices.len() || !self.vertices[root_index].is_root() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }
            if vertex.is_root() && index != root_index {
                return false;
            }
            if !vertex.is_leaf() && vertex.children().is_empty() {
                return false;
            }
            for &child in vertex.children() {
                if child >= self.vertices.len() || self.vertices[child].parent() != Some(index) {
                    return false;
                }
            }
            if let Some(parent) = vertex.parent() {
                if parent >= self.vertices.len()
                    || !self.vertices[parent].children().contains(&index)
                {
                    return false;
                }
            }
        }

        self.pre_order_iter().count() == self.vertices.len()
    }
}

impl std::ops::Index<VertexIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl std::ops::IndexMut<VertexIndex> for Tree {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl Tree {
    /// Returns an iterator over the tree in pre-order (parents before children,
    /// children in input order).
    ///
    /// # Example
    /// ```
    /// use treedist::model::{BranchLength, Tree};
    ///
    /// let mut tree = Tree::new();
    /// let a = tree.add_leaf(Some(BranchLength::new(1.0)), "A");
    /// let b = tree.add_leaf(Some(BranchLength::new(1.0)), "B");
    /// let root = tree.add_root(vec![a, b]);
    ///
    /// let indices: Vec<_> = tree.pre_order_iter().map(|v| v.index()).collect();
    /// assert_eq!(indices, vec![root, a, b]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// Uses an explicit stack, so arbitrarily deep trees do not exhaust the
/// call stack.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        PreOrderIter {
            tree,
            stack: tree.root_index.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        // Push children in reverse, so first child is processed first
        self.stack.extend(vertex.children().iter().rev());

        Some(vertex)
    }
}
