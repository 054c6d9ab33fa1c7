//! Crate-wide error type.
//!
//! Every error is fatal for a pipeline run: nothing partial is reported once
//! one of these has been returned. A nominal population size smaller than
//! the observed count is not an error; see
//! [NominalSizeWarning](crate::stats::NominalSizeWarning).

use crate::parser::ParsingError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DistError {
    /// Malformed Newick text.
    #[error("Something went wrong with the parse of the Newick formatted string: {0}")]
    Parse(#[from] ParsingError),

    /// No path connects two vertices that should be connected.
    #[error(
        "No path between {from} and {to} ({unreachable_pairs} unreachable pair(s)); the tree is inconsistent"
    )]
    DisconnectedGraph {
        from: String,
        to: String,
        unreachable_pairs: usize,
    },

    /// A statistic was requested over too few values.
    #[error("Cannot compute {statistic} over {found} value(s), at least {required} needed")]
    EmptySample {
        statistic: &'static str,
        required: usize,
        found: usize,
    },

    /// A numeric option is not a positive integer.
    #[error("The value given for {flag} ({value}) is not a positive integer")]
    InvalidArgument { flag: String, value: String },

    /// A non-root vertex lacks the branch length needed for distances.
    #[error("Vertex {vertex} has no branch length")]
    MissingBranchLength { vertex: String },

    /// The input file could not be read.
    #[error("Cannot open file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
