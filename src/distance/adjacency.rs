//! Direct parent–child distances of a tree.

use crate::error::DistError;
use crate::model::{NodeMap, Tree, VertexIndex};
use tracing::debug;

// =#========================================================================#=
// ADJACENCY MATRIX
// =#========================================================================#=
/// For every vertex, the vertices it is directly connected to and the length
/// of the connecting branch.
///
/// # Invariants
/// - Symmetric: if `a` lists `b` at distance `d`, then `b` lists `a` at `d`
/// - Only parent/child pairs are present
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    neighbours: Vec<Vec<(VertexIndex, f64)>>,
}

impl AdjacencyMatrix {
    /// Builds the adjacency matrix of a tree via its [NodeMap].
    pub fn from_tree(tree: &Tree) -> Result<Self, DistError> {
        Self::from_node_map(&NodeMap::from_tree(tree), tree)
    }

    /// Builds the adjacency matrix from a [NodeMap], visiting every vertex
    /// once and inserting the edge to its parent in both directions.
    ///
    /// The root has no branch length, which is expected.
    ///
    /// # Errors
    /// [DistError::MissingBranchLength] if a vertex has a parent but no
    /// branch length.
    pub fn from_node_map(node_map: &NodeMap, tree: &Tree) -> Result<Self, DistError> {
        let mut neighbours = vec![Vec::new(); node_map.len()];

        for (vertex, link) in node_map.iter() {
            match link {
                (Some(parent), Some(length)) => {
                    neighbours[vertex].push((parent, length));
                    neighbours[parent].push((vertex, length));
                }
                (Some(_), None) => {
                    return Err(DistError::MissingBranchLength {
                        vertex: tree.tagged_name(vertex),
                    });
                }
                (None, _) => {}
            }
        }

        let adjacency = AdjacencyMatrix { neighbours };
        debug!(
            vertices = adjacency.num_vertices(),
            edges = adjacency.num_edges(),
            "built adjacency matrix"
        );
        Ok(adjacency)
    }

    /// Returns the direct neighbours of `vertex` with their distances.
    ///
    /// # Panics
    /// Panics if `vertex` is out of bounds.
    pub fn neighbours(&self, vertex: VertexIndex) -> &[(VertexIndex, f64)] {
        &self.neighbours[vertex]
    }

    /// Returns the length of the edge between `a` and `b`, if they are adjacent.
    pub fn distance(&self, a: VertexIndex, b: VertexIndex) -> Option<f64> {
        self.neighbours
            .get(a)?
            .iter()
            .find(|&&(neighbour, _)| neighbour == b)
            .map(|&(_, length)| length)
    }

    /// Returns the number of vertices covered.
    pub fn num_vertices(&self) -> usize {
        self.neighbours.len()
    }

    /// Returns the number of (undirected) edges.
    pub fn num_edges(&self) -> usize {
        self.neighbours.iter().map(Vec::len).sum::<usize>() / 2
    }
}
