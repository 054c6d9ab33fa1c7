//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Vertex] values. Each vertex is either a `Root`, `Internal`, or `Leaf`,
//! referenced by [VertexIndex]. Root and internal vertices may have any
//! number of children, so star trees and polytomies are supported.
//!
//! # Upward view
//! Distance computations start from the [NodeMap], which records for every
//! vertex its parent and the length of the branch to it.

pub mod node_map;
pub mod tree;
pub mod vertex;

pub use node_map::{NodeMap, ParentLink};
pub use tree::{Edge, PreOrderIter, Tree, VertexIndex};
pub use vertex::{BranchLength, Vertex};
