//! Treedist is a library to compute pairwise evolutionary distances between
//! the leaves of a phylogenetic tree and to summarize them.
//!
//! Core functionality provided:
//! - Newick: Parse a Newick string or the first tree of a file, including
//!   multifurcations, bootstrap values and comments.
//! - Distance matrix: Expand the parent–child branch lengths of a tree into
//!   the distance between every pair of vertices; optionally keep internal
//!   vertices (branches) in the matrix.
//! - Statistics: Per leaf, the mean and standard deviation (or median and
//!   median absolute deviation) of its distances to all other leaves, and
//!   the same statistic over all leaves.
//!   - Nominal population size: Treat the leaves as a sample of a larger
//!     population, which reduces the mean (adjusted mean).
//!   - MISL: Report distance per 100 sites given the median input sequence
//!     length.
//! - Report: The matrix, per-leaf table or summary line as text.
//!
//! Limitations:
//! - Only the first tree of a file is analysed
//! - Every non-root vertex needs a branch length
//!
//! # Usage patterns
//! 1. [run] executes the whole chain for one tree and a [StatConfig].
//! 2. The stages can be used on their own, see [crate::distance] and
//!    [crate::stats].
//!
//! ## Example
//! ```
//! use treedist::stats::{Action, StatConfig};
//!
//! let tree = treedist::parse_newick_str("((A:1.0,B:2.0):0.5,C:3.0);")?;
//! let config = StatConfig::new().with_action(Action::Matrix).with_sorted_matrix();
//! let report = treedist::run(&tree, &config)?;
//! assert_eq!(report.text().lines().next(), Some("L_A (L_B 3.0000) (L_C 4.5000)"));
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod distance;
pub mod error;
pub mod model;
pub mod newick;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use error::DistError;
pub use pipeline::{Report, run};
pub use stats::StatConfig;

use crate::model::Tree;
use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parse a Newick string using default settings, returning a [Tree].
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    newick::parse_str(newick)
}

/// Parse the first tree of a Newick file using default settings.
///
/// See [`newick::parse_file`] for full documentation of this convenience function.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<Tree, DistError> {
    newick::parse_file(path)
}
