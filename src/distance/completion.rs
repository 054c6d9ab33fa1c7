//! Expansion of direct adjacencies into all-pairs distances.
//!
//! Between two vertices of a tree there is exactly one simple path, and
//! their distance is the sum of branch lengths along it. The
//! [CompletionEngine] finds these paths by depth-first search over the
//! [AdjacencyMatrix]. A search from a vertex runs through its whole
//! component and memoizes the distance to every vertex it reaches, so each
//! member is searched from at most once and the matrix is completed in
//! quadratic time.

use crate::distance::adjacency::AdjacencyMatrix;
use crate::distance::matrix::DistanceMatrix;
use crate::error::DistError;
use crate::model::{Tree, VertexIndex};
use tracing::debug;

/// One vertex on the current search path.
struct Frame {
    vertex: VertexIndex,
    distance: f64,
    next_neighbour: usize,
}

// =#========================================================================#=
// COMPLETION ENGINE
// =#========================================================================#=
/// Completes a [DistanceMatrix] from an [AdjacencyMatrix].
///
/// Searches use an explicit stack, so their depth is bounded by the number
/// of vertices and not by the call stack. Scratch buffers are reused across
/// searches.
pub struct CompletionEngine<'a> {
    adjacency: &'a AdjacencyMatrix,
    on_path: Vec<bool>,
    best: Vec<Option<f64>>,
    reached: Vec<VertexIndex>,
    searches: usize,
}

impl<'a> CompletionEngine<'a> {
    /// Creates an engine over the given adjacency matrix.
    pub fn new(adjacency: &'a AdjacencyMatrix) -> Self {
        let num_vertices = adjacency.num_vertices();
        CompletionEngine {
            adjacency,
            on_path: vec![false; num_vertices],
            best: vec![None; num_vertices],
            reached: Vec::new(),
            searches: 0,
        }
    }

    /// Returns the number of path searches run so far.
    pub fn searches(&self) -> usize {
        self.searches
    }

    /// Computes the distance between every pair of `members`.
    ///
    /// Directly adjacent pairs take their branch length. For every other
    /// pair whose distance is still unknown a search runs from the first
    /// vertex of the pair, which also answers every later pair of that row.
    ///
    /// # Errors
    /// [DistError::DisconnectedGraph] once the whole matrix has been
    /// processed, if any pair of members is not connected.
    pub fn complete(&mut self, members: Vec<VertexIndex>, tree: &Tree) -> Result<DistanceMatrix, DistError> {
        let mut matrix = DistanceMatrix::new(members.clone());

        for &vertex in &members {
            for &(neighbour, length) in self.adjacency.neighbours(vertex) {
                matrix.set(vertex, neighbour, length);
            }
        }

        let pending: Vec<(VertexIndex, VertexIndex)> = matrix.missing_pairs().collect();
        debug!(
            members = matrix.len(),
            pending = pending.len(),
            "completing distance matrix"
        );

        let mut searched = vec![false; self.adjacency.num_vertices()];
        let mut unreachable = Vec::new();
        for (from, to) in pending {
            if matrix.get(from, to).is_some() {
                continue; // discovered by an earlier search
            }
            if !std::mem::replace(&mut searched[from], true) {
                self.search(from, &mut matrix);
            }
            if matrix.get(from, to).is_none() {
                unreachable.push((from, to));
            }
        }
        debug!(searches = self.searches, "distance matrix completed");

        if let Some(&(from, to)) = unreachable.first() {
            return Err(DistError::DisconnectedGraph {
                from: tree.tagged_name(from),
                to: tree.tagged_name(to),
                unreachable_pairs: unreachable.len(),
            });
        }

        Ok(matrix)
    }

    /// Depth-first search from `source` through its component, never
    /// revisiting a vertex already on the current path. If several paths
    /// reach a vertex, the shortest one counts.
    ///
    /// Distances from `source` to every vertex reached are memoized in
    /// `matrix` in both directions (as far as shorter than what it holds
    /// already).
    ///
    /// # Returns
    /// The number of vertices reached.
    fn search(&mut self, source: VertexIndex, matrix: &mut DistanceMatrix) -> usize {
        self.searches += 1;
        let adjacency = self.adjacency;

        let mut stack = vec![Frame {
            vertex: source,
            distance: 0.0,
            next_neighbour: 0,
        }];
        self.on_path[source] = true;

        while let Some(frame) = stack.last_mut() {
            let neighbours = adjacency.neighbours(frame.vertex);
            let Some(&(next, length)) = neighbours.get(frame.next_neighbour) else {
                self.on_path[frame.vertex] = false;
                stack.pop();
                continue;
            };
            frame.next_neighbour += 1;

            if self.on_path[next] {
                continue;
            }

            let distance = frame.distance + length;
            match self.best[next] {
                Some(known) if known <= distance => continue,
                Some(_) => self.best[next] = Some(distance),
                None => {
                    self.best[next] = Some(distance);
                    self.reached.push(next);
                }
            }

            self.on_path[next] = true;
            stack.push(Frame {
                vertex: next,
                distance,
                next_neighbour: 0,
            });
        }

        let num_reached = self.reached.len();
        for vertex in self.reached.drain(..) {
            if let Some(distance) = self.best[vertex].take() {
                if matrix.get(source, vertex).is_none_or(|known| distance < known) {
                    matrix.set(source, vertex, distance);
                }
            }
        }

        num_reached
    }
}

/// Convenience function: completes the matrix over `members` with a fresh
/// [CompletionEngine].
pub fn complete_matrix(
    adjacency: &AdjacencyMatrix,
    members: Vec<VertexIndex>,
    tree: &Tree,
) -> Result<DistanceMatrix, DistError> {
    CompletionEngine::new(adjacency).complete(members, tree)
}
