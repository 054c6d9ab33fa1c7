//! Dense, symmetric matrix of pairwise distances between tree vertices.

use crate::model::{Tree, VertexIndex};
use std::collections::HashMap;

// =#========================================================================#=
// DISTANCE MATRIX
// =#========================================================================#=
/// Pairwise distances between a list of member vertices.
///
/// Rows and columns follow the member order, which is the order rows are
/// reported in. Cells are `None` until a distance is known; the diagonal
/// stays `None`.
///
/// # Invariants
/// - Symmetric: `get(a, b) == get(b, a)`
/// - Members are distinct
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    members: Vec<VertexIndex>,
    positions: HashMap<VertexIndex, usize>,
    cells: Vec<Option<f64>>,
}

impl DistanceMatrix {
    /// Creates an empty matrix over the given members.
    pub(crate) fn new(members: Vec<VertexIndex>) -> Self {
        let positions = members
            .iter()
            .enumerate()
            .map(|(position, &vertex)| (vertex, position))
            .collect();
        let n = members.len();
        DistanceMatrix {
            members,
            positions,
            cells: vec![None; n * n],
        }
    }

    /// Returns the member vertices in row order.
    pub fn members(&self) -> &[VertexIndex] {
        &self.members
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the matrix has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` if `vertex` is a member of this matrix.
    pub fn contains(&self, vertex: VertexIndex) -> bool {
        self.positions.contains_key(&vertex)
    }

    /// Returns the distance between `a` and `b`, if known.
    ///
    /// `None` for the diagonal and for vertices that are not members.
    pub fn get(&self, a: VertexIndex, b: VertexIndex) -> Option<f64> {
        let (row, column) = (self.positions.get(&a)?, self.positions.get(&b)?);
        self.cells[row * self.len() + column]
    }

    /// Stores the distance between two members in both directions.
    /// Non-members and the diagonal are ignored.
    pub(crate) fn set(&mut self, a: VertexIndex, b: VertexIndex, distance: f64) {
        if a == b {
            return;
        }
        if let (Some(&row), Some(&column)) = (self.positions.get(&a), self.positions.get(&b)) {
            let n = self.len();
            self.cells[row * n + column] = Some(distance);
            self.cells[column * n + row] = Some(distance);
        }
    }

    /// Iterates over the known distances from `vertex` to the other
    /// members, in member order.
    pub fn row(&self, vertex: VertexIndex) -> impl Iterator<Item = (VertexIndex, f64)> + '_ {
        let n = self.len();
        let cells = match self.positions.get(&vertex) {
            Some(&row) => &self.cells[row * n..(row + 1) * n],
            None => &[][..],
        };
        self.members
            .iter()
            .zip(cells)
            .filter_map(|(&other, cell)| cell.map(|distance| (other, distance)))
    }

    /// Iterates over the unordered pairs of distinct members whose distance
    /// is still unknown, in row-major order.
    pub fn missing_pairs(&self) -> impl Iterator<Item = (VertexIndex, VertexIndex)> + '_ {
        let n = self.len();
        (0..n).flat_map(move |row| {
            ((row + 1)..n)
                .filter(move |&column| self.cells[row * n + column].is_none())
                .map(move |column| (self.members[row], self.members[column]))
        })
    }

    /// Returns `true` if the distance of every pair of distinct members is known.
    pub fn is_complete(&self) -> bool {
        self.missing_pairs().next().is_none()
    }

    /// Returns a copy of this matrix restricted to the given members, which
    /// keep the relative order they have in this matrix.
    pub fn restrict_to<F>(&self, mut keep: F) -> DistanceMatrix
    where
        F: FnMut(VertexIndex) -> bool,
    {
        let kept: Vec<VertexIndex> = self.members.iter().copied().filter(|&v| keep(v)).collect();
        let mut restricted = DistanceMatrix::new(kept.clone());
        for (i, &a) in kept.iter().enumerate() {
            for &b in &kept[i + 1..] {
                if let Some(distance) = self.get(a, b) {
                    restricted.set(a, b, distance);
                }
            }
        }
        restricted
    }

    /// Returns `true` if all members are leaves of `tree`.
    pub fn has_only_leaves(&self, tree: &Tree) -> bool {
        self.members.iter().all(|&v| tree[v].is_leaf())
    }
}
