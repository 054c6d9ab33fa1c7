//! Pairwise distances between the vertices of a tree.
//!
//! The computation runs in three stages:
//! 1. [AdjacencyMatrix] - direct parent–child distances, from the
//!    [NodeMap](crate::model::NodeMap)
//! 2. [CompletionEngine] - all-pairs distances by path search, as a
//!    [DistanceMatrix] over all vertices
//! 3. [prune_branches] - drops internal vertices unless they are asked for
//!
//! [`tree_to_matrix`] runs all three.

pub mod adjacency;
pub mod completion;
pub mod matrix;
pub mod prune;

pub use adjacency::AdjacencyMatrix;
pub use completion::{CompletionEngine, complete_matrix};
pub use matrix::DistanceMatrix;
pub use prune::prune_branches;

use crate::error::DistError;
use crate::model::{Tree, VertexIndex};

/// Computes the distance matrix of a tree.
///
/// Rows follow tree pre-order, so leaves appear in the order of the Newick
/// string. With `include_branches` the matrix also covers the root and
/// internal vertices, otherwise only leaves.
///
/// # Example
/// ```
/// use treedist::distance::tree_to_matrix;
/// use treedist::newick::parse_str;
///
/// let tree = parse_str("(A:1.0,B:2.0,C:3.0);")?;
/// let matrix = tree_to_matrix(&tree, false)?;
/// let leaves = tree.leaves();
/// assert_eq!(matrix.get(leaves[0], leaves[2]), Some(4.0));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn tree_to_matrix(tree: &Tree, include_branches: bool) -> Result<DistanceMatrix, DistError> {
    let adjacency = AdjacencyMatrix::from_tree(tree)?;
    let completed = complete_matrix(&adjacency, member_order(tree), tree)?;
    Ok(prune_branches(&completed, tree, include_branches))
}

/// All vertices of the tree: pre-order from the root first, then any vertex
/// the root does not reach, in arena order.
pub fn member_order(tree: &Tree) -> Vec<VertexIndex> {
    let mut seen = vec![false; tree.num_vertices()];
    let mut order: Vec<VertexIndex> = tree.pre_order_iter().map(|v| v.index()).collect();
    for &vertex in &order {
        seen[vertex] = true;
    }
    order.extend((0..tree.num_vertices()).filter(|&vertex| !seen[vertex]));
    order
}
