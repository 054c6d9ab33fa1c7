//! One run from a parsed tree to its report.

use crate::distance::{DistanceMatrix, tree_to_matrix};
use crate::error::DistError;
use crate::model::Tree;
use crate::report::{format_leaf_table, format_matrix, format_summary};
use crate::stats::{Action, StatConfig, TreeStatistics, tree_statistics};
use std::fmt;
use tracing::debug;

/// Result of a run: the distance matrix, the statistics (unless the action
/// is [Action::Matrix]) and the rendered text.
#[derive(Debug, Clone)]
pub struct Report {
    action: Action,
    matrix: DistanceMatrix,
    statistics: Option<TreeStatistics>,
    text: String,
}

impl Report {
    pub fn action(&self) -> Action {
        self.action
    }

    /// Distance matrix, pruned to leaves unless branches were asked for.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn statistics(&self) -> Option<&TreeStatistics> {
        self.statistics.as_ref()
    }

    /// The text output of the run.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Computes the distance matrix of `tree` and then, depending on the
/// configured action, renders it or derives and renders statistics.
///
/// Nothing is rendered if any stage fails.
///
/// # Errors
/// - [DistError::MissingBranchLength] for a non-root vertex without branch length
/// - [DistError::DisconnectedGraph] if the tree is not connected
/// - [DistError::EmptySample] if the tree has too few leaves for the statistics
///
/// # Example
/// ```
/// use treedist::stats::{Action, StatConfig};
///
/// let tree = treedist::newick::parse_str("((A:1,B:2):0.5,C:3);")?;
/// let report = treedist::run(&tree, &StatConfig::new().with_action(Action::AllAve))?;
/// assert!(report.text().starts_with("N 3  nominalN 3  mean "));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn run(tree: &Tree, config: &StatConfig) -> Result<Report, DistError> {
    let action = config.action();
    debug!(%action, leaves = tree.num_leaves(), "starting run");

    let matrix = tree_to_matrix(tree, config.include_branches())?;

    if action == Action::Matrix {
        let text = format_matrix(&matrix, tree, config);
        return Ok(Report {
            action,
            matrix,
            statistics: None,
            text,
        });
    }

    let statistics = tree_statistics(&matrix, tree, config)?;
    let mut text = String::new();
    if action == Action::PerSeq {
        text.push_str(&format_leaf_table(&statistics));
    }
    text.push_str(&format_summary(&statistics));

    Ok(Report {
        action,
        matrix,
        statistics: Some(statistics),
        text,
    })
}
