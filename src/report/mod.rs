//! Text output: distance matrix, per-leaf table and summary line.
//!
//! All functions return the text as a `String` (every line terminated by a
//! newline); writing it is left to the caller.
//!
//! # Formats
//! Matrix, one line per member, here with the default blank separator:
//! ```text
//! L_A (L_B 3.0000) (L_C 4.0000)
//! ```
//! Per-leaf table, identifier padded to the longest identifier plus four:
//! ```text
//! A    3.500000  0.707107
//! ```
//! Summary line:
//! ```text
//! N 3  nominalN 3  mean 4.0000  adj_mean 4.0000  adj_mean_per_site100 4.0000
//! ```

use crate::distance::DistanceMatrix;
use crate::model::{Tree, VertexIndex};
use crate::stats::{StatConfig, TreeStatistics};

/// Extra padding after the longest leaf identifier in the per-leaf table
const IDENTIFIER_PADDING: usize = 4;

// ============================================================================
// Matrix
// ============================================================================
/// Renders the distance matrix, one line per leaf in row order.
///
/// Each line starts with the tagged name of the leaf (`L_<label>`),
/// followed by `<separator>(<name> <distance>)` for every other leaf.
/// Internal vertices of a matrix built with branches are skipped, both as
/// rows and as neighbours. Neighbours keep row order unless the
/// configuration asks for sorting by distance; descending order is the
/// reverse of ascending, ties included.
///
/// # Example
/// ```
/// use treedist::distance::tree_to_matrix;
/// use treedist::newick::parse_str;
/// use treedist::report::format_matrix;
/// use treedist::stats::StatConfig;
///
/// let tree = parse_str("(A:1.0,B:2.0);")?;
/// let matrix = tree_to_matrix(&tree, false)?;
/// let text = format_matrix(&matrix, &tree, &StatConfig::new().with_matrix_separator("\t"));
/// assert_eq!(text, "L_A\t(L_B 3.0000)\nL_B\t(L_A 3.0000)\n");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn format_matrix(matrix: &DistanceMatrix, tree: &Tree, config: &StatConfig) -> String {
    let separator = config.matrix_separator();
    let mut out = String::new();

    for &vertex in matrix.members().iter().filter(|&&v| tree[v].is_leaf()) {
        let mut neighbours: Vec<(VertexIndex, f64)> = matrix
            .row(vertex)
            .filter(|&(neighbour, _)| tree[neighbour].is_leaf())
            .collect();
        if config.sort_matrix() {
            neighbours.sort_by(|a, b| a.1.total_cmp(&b.1));
            if config.sort_descending() {
                neighbours.reverse();
            }
        }

        out.push_str(&tree.tagged_name(vertex));
        for (neighbour, distance) in neighbours {
            out.push_str(&format!(
                "{separator}({} {distance:.4})",
                tree.tagged_name(neighbour)
            ));
        }
        out.push('\n');
    }

    out
}

// ============================================================================
// Statistics
// ============================================================================
/// Renders one line per leaf: its identifier, centre and spread.
pub fn format_leaf_table(statistics: &TreeStatistics) -> String {
    let width = statistics
        .leaves
        .iter()
        .map(|leaf| leaf.label.chars().count())
        .max()
        .unwrap_or(0)
        + IDENTIFIER_PADDING;

    let mut out = String::new();
    for leaf in &statistics.leaves {
        out.push_str(&format!(
            "{:<width$}{:.6}  {:.6}\n",
            leaf.label,
            leaf.summary.centre,
            leaf.summary.spread.value()
        ));
    }
    out
}

/// Renders the summary line of the whole tree.
///
/// Mean mode prints `mean` and `adj_mean`, median mode `median` and `MAD`.
pub fn format_summary(statistics: &TreeStatistics) -> String {
    let (centre_label, adjusted_label) = if statistics.median {
        ("median", "MAD")
    } else {
        ("mean", "adj_mean")
    };
    format!(
        "N {}  nominalN {}  {centre_label} {:.4}  {adjusted_label} {:.4}  adj_mean_per_site100 {:.4}\n",
        statistics.n, statistics.nominal_n, statistics.centre, statistics.adjusted, statistics.per_site100
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::tree_to_matrix;
    use crate::newick::parse_str;
    use crate::stats::{LeafStatistics, Spread, Summary};

    fn leaf(vertex: VertexIndex, label: &str, centre: f64, spread: f64) -> LeafStatistics {
        LeafStatistics {
            vertex,
            label: label.to_string(),
            summary: Summary {
                centre,
                spread: Spread::StandardDeviation(spread),
                count: 2,
                nominal_size_warning: None,
            },
        }
    }

    fn statistics(median: bool) -> TreeStatistics {
        TreeStatistics {
            leaves: vec![leaf(0, "A", 3.5, 0.5), leaf(1, "Bee", 4.0, 1.0)],
            aggregate: Summary {
                centre: 3.75,
                spread: Spread::StandardDeviation(0.25),
                count: 2,
                nominal_size_warning: None,
            },
            n: 2,
            nominal_n: 10,
            centre: 3.75,
            adjusted: 0.75,
            per_site100: 0.25,
            median,
        }
    }

    #[test]
    fn leaf_table_pads_identifiers() {
        let text = format_leaf_table(&statistics(false));
        assert_eq!(text, "A      3.500000  0.500000\nBee    4.000000  1.000000\n");
    }

    #[test]
    fn summary_labels_follow_mode() {
        assert_eq!(
            format_summary(&statistics(false)),
            "N 2  nominalN 10  mean 3.7500  adj_mean 0.7500  adj_mean_per_site100 0.2500\n"
        );
        assert_eq!(
            format_summary(&statistics(true)),
            "N 2  nominalN 10  median 3.7500  MAD 0.7500  adj_mean_per_site100 0.2500\n"
        );
    }

    #[test]
    fn matrix_with_branches_renders_leaves_only() {
        let tree = parse_str("((A:1.0,B:2.0):0.5,C:3.0);").unwrap();
        let matrix = tree_to_matrix(&tree, true).unwrap();
        assert_eq!(matrix.len(), tree.num_vertices());

        let text = format_matrix(&matrix, &tree, &StatConfig::new());
        assert_eq!(
            text,
            "L_A (L_B 3.0000) (L_C 4.5000)\n\
             L_B (L_A 3.0000) (L_C 5.5000)\n\
             L_C (L_A 4.5000) (L_B 5.5000)\n"
        );
        assert!(!text.contains("B_"));
    }
}
