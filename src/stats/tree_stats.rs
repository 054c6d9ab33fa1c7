//! Per-leaf and whole-tree statistics over a distance matrix.

use crate::distance::DistanceMatrix;
use crate::error::DistError;
use crate::model::{Tree, VertexIndex};
use crate::stats::config::StatConfig;
use crate::stats::{Spread, Summary, summarize};
use tracing::debug;

/// Distances from one leaf to all other leaves, summarized.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafStatistics {
    pub vertex: VertexIndex,
    pub label: String,
    pub summary: Summary,
}

/// Statistics of a whole tree.
///
/// The aggregate is a summary over the per-leaf centres, i.e. the mean of
/// means (or median of medians). Its three reported values depend on the
/// mode:
///
/// | mode   | `centre` | `adjusted`          | `per_site100` base |
/// |--------|----------|---------------------|--------------------|
/// | mean   | mean     | adjusted mean, or the mean without nominal size | `adjusted` |
/// | median | median   | MAD                 | `centre`           |
///
/// With a median input sequence length `MISL`, `per_site100` is the base
/// scaled by `100 / MISL`; otherwise it equals the base.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStatistics {
    /// Per-leaf summaries, in matrix row order
    pub leaves: Vec<LeafStatistics>,
    /// Summary over the per-leaf centres
    pub aggregate: Summary,
    /// Number of leaves
    pub n: usize,
    /// Nominal population size, `n` if none was configured
    pub nominal_n: usize,
    pub centre: f64,
    pub adjusted: f64,
    pub per_site100: f64,
    pub median: bool,
}

/// Computes per-leaf and aggregate statistics of the leaves in `matrix`.
///
/// Internal vertices in the matrix are ignored, both as rows and as
/// neighbours.
///
/// # Errors
/// [DistError::EmptySample] if the matrix has too few leaves for the
/// configured statistic (a single leaf has no distances at all).
///
/// # Example
/// ```
/// use treedist::distance::tree_to_matrix;
/// use treedist::newick::parse_str;
/// use treedist::stats::{StatConfig, tree_statistics};
///
/// let tree = parse_str("(A:1.0,B:1.0,C:1.0);")?;
/// let matrix = tree_to_matrix(&tree, false)?;
/// let stats = tree_statistics(&matrix, &tree, &StatConfig::new().with_nominal_n(3)?)?;
/// assert_eq!(stats.n, 3);
/// assert_eq!(stats.centre, 2.0);
/// assert_eq!(stats.adjusted, 2.0);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn tree_statistics(
    matrix: &DistanceMatrix,
    tree: &Tree,
    config: &StatConfig,
) -> Result<TreeStatistics, DistError> {
    let mut leaves = Vec::new();
    for &vertex in matrix.members().iter().filter(|&&v| tree[v].is_leaf()) {
        let distances: Vec<f64> = matrix
            .row(vertex)
            .filter(|&(other, _)| tree[other].is_leaf())
            .map(|(_, distance)| distance)
            .collect();
        let summary = summarize(&distances, config)?;
        leaves.push(LeafStatistics {
            vertex,
            label: tree[vertex].label().unwrap_or_default().to_string(),
            summary,
        });
    }

    let centres: Vec<f64> = leaves.iter().map(|leaf| leaf.summary.centre).collect();
    let aggregate = summarize(&centres, config)?;
    let n = centres.len();

    let centre = aggregate.centre;
    let (adjusted, base) = match aggregate.spread {
        Spread::MedianAbsoluteDeviation(mad) => (mad, centre),
        Spread::AdjustedMean(adjusted) => (adjusted, adjusted),
        Spread::StandardDeviation(_) => (centre, centre),
    };
    let per_site100 = match config.misl() {
        Some(misl) => 100.0 * base / misl as f64,
        None => base,
    };
    debug!(n, centre, adjusted, per_site100, "tree statistics");

    Ok(TreeStatistics {
        leaves,
        aggregate,
        n,
        nominal_n: config.nominal_n().unwrap_or(n),
        centre,
        adjusted,
        per_site100,
        median: config.median(),
    })
}
