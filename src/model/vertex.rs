//! Vertex module for phylogenetic tree representation.

use crate::model::tree::VertexIndex;
use std::ops::Deref;

/// During construction, internal vertices and leaves might not have a parent set yet.
const NO_PARENT_SET: VertexIndex = usize::MAX;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a phylogenetic tree.
///
/// A vertex can be either:
/// - **Root**: Has children, no parent and no branch length
/// - **Internal**: Has children, might have branch length, bootstrap
///   support and a name
/// - **Leaf**: Has no children, has a label and might have branch length
///
/// # Invariants
/// - `index` is the index of the vertex in the tree arena
/// - `branch_length` is non-negative (enforced by [BranchLength]); might not be set
/// - Internal vertices and leaves have `parent` set to the [VertexIndex] of
///   their parent; `NO_PARENT_SET` only during construction
/// - Root and internal vertices have at least one child
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex {
    /// Root vertex of the tree (has no parent, has children)
    Root {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Indices of the child vertices, in input order
        children: Vec<VertexIndex>,
    },
    /// Internal vertex (has parent and children)
    Internal {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Indices of the child vertices, in input order
        children: Vec<VertexIndex>,
        /// Distance to parent vertex (optional, non-negative if present)
        branch_length: Option<BranchLength>,
        /// Bootstrap support of the clade below this vertex
        bootstrap: Option<f64>,
        /// Non-numeric internal label, if any
        name: Option<String>,
    },
    /// Leaf vertex (has parent and label, no children)
    Leaf {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Taxon identifier
        label: String,
        /// Distance to parent vertex (optional, non-negative if present)
        branch_length: Option<BranchLength>,
    },
}

impl Vertex {
    /// Creates a new root vertex.
    pub fn new_root(index: VertexIndex, children: Vec<VertexIndex>) -> Self {
        Vertex::Root { index, children }
    }

    /// Creates a new internal (non-leaf, non-root) vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Indices of the children
    /// * `branch_length` - Distance to parent vertex
    /// * `bootstrap` - Optional bootstrap support value
    pub fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
        bootstrap: Option<f64>,
    ) -> Self {
        Vertex::Internal {
            index,
            parent: NO_PARENT_SET,
            children,
            branch_length,
            bootstrap,
            name: None,
        }
    }

    /// Creates a new leaf vertex.
    pub fn new_leaf(index: VertexIndex, branch_length: Option<BranchLength>, label: String) -> Self {
        Vertex::Leaf {
            index,
            parent: NO_PARENT_SET,
            label,
            branch_length,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Root { index, .. }
            | Vertex::Internal { index, .. }
            | Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the branch length if this is a non-root vertex that has one.
    pub fn branch_length(&self) -> Option<BranchLength> {
        match self {
            Vertex::Root { .. } => None,
            Vertex::Internal { branch_length, .. } | Vertex::Leaf { branch_length, .. } => {
                *branch_length
            }
        }
    }

    /// Returns the bootstrap support if this is an internal vertex that has one.
    pub fn bootstrap(&self) -> Option<f64> {
        match self {
            Vertex::Internal { bootstrap, .. } => *bootstrap,
            _ => None,
        }
    }

    /// Returns the label if this is a leaf, else `None`.
    pub fn label(&self) -> Option<&str> {
        match self {
            Vertex::Leaf { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Returns the name of an internal vertex, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Vertex::Internal { name, .. } => name.as_deref(),
            _ => None,
        }
    }

    /// Sets the name of an internal vertex; ignored for root and leaves.
    pub fn set_name(&mut self, new_name: String) {
        if let Vertex::Internal { name, .. } = self {
            *name = Some(new_name);
        }
    }

    /// Returns the children, empty for a leaf.
    pub fn children(&self) -> &[VertexIndex] {
        match self {
            Vertex::Root { children, .. } | Vertex::Internal { children, .. } => children,
            Vertex::Leaf { .. } => &[],
        }
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex is an internal vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns `true` if this vertex is the root.
    pub fn is_root(&self) -> bool {
        matches!(self, Vertex::Root { .. })
    }

    /// Sets new parent for non-root vertex.
    ///
    /// # Panics
    /// Panics if called on root.
    pub fn set_parent(&mut self, parent: VertexIndex) {
        match self {
            Vertex::Root { .. } => panic!("Cannot set parent on root vertex"),
            Vertex::Internal { parent: p, .. } | Vertex::Leaf { parent: p, .. } => *p = parent,
        }
    }

    /// Returns the index of the parent if this is a non-root vertex, else `None`.
    ///
    /// Note that parent might not be set yet during construction.
    pub fn parent(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                (*parent != NO_PARENT_SET).then_some(*parent)
            }
            Vertex::Root { .. } => None,
        }
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative and finite.
///
/// Represents the evolutionary distance between a vertex and its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(length >= 0.0, "Branch length must be non-negative, got {}", length);
        assert!(length.is_finite(), "Branch length must be finite, got {}", length);
        BranchLength(length)
    }

    /// Creates a new branch length, or `None` if `length` is negative or not finite.
    pub fn try_new(length: f64) -> Option<Self> {
        (length >= 0.0 && length.is_finite()).then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}
