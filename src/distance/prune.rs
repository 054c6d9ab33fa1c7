//! Removal of internal vertices from a completed matrix.

use crate::distance::matrix::DistanceMatrix;
use crate::model::Tree;

/// Drops every non-leaf vertex (rows and columns) from `matrix`, unless
/// `include_branches` is set, in which case a copy of the matrix is returned
/// as is.
///
/// Internal vertices are needed to complete the matrix but rarely afterwards.
/// Pruning a matrix that only holds leaves returns an equal matrix.
pub fn prune_branches(matrix: &DistanceMatrix, tree: &Tree, include_branches: bool) -> DistanceMatrix {
    if include_branches || matrix.has_only_leaves(tree) {
        return matrix.clone();
    }
    matrix.restrict_to(|vertex| tree[vertex].is_leaf())
}
