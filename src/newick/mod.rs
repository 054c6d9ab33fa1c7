//! Newick format parser for phylogenetic trees.
//!
//! # Quick API
//! * [`parse_str`] - parses a single Newick string into a [Tree]
//! * [`parse_file`] - parses the (first) tree in a file
//!
//! # Format
//! The accepted grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex (',' vertex)* ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Comments are square brackets and can occur anywhere where whitespace
//!   is allowed, which covers a leading likelihood statement like
//!   `[ lh=-893.893018 ]`
//! * Labels may be single-quoted (`''` escapes a quote); unquoted labels may
//!   start with a digit (e.g. `3_ACH1_LONAC`)
//! * A numeric label after `)` is the bootstrap support of that clade,
//!   e.g. `(A:0.4,B:1.3)99:0.59`

mod defs;
pub mod parser;

pub use parser::NewickParser;

use crate::error::DistError;
use crate::model::Tree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::path::Path;
use tracing::warn;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string into a [Tree].
///
/// # Example
/// ```
/// use treedist::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata:1.0,(Fratercula_arctica:0.5,Fratercula_corniculata:0.5):0.5);")?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_str(&mut byte_parser)
}

/// Parses the tree in the given file.
///
/// Line breaks may occur anywhere whitespace is allowed. If the file holds
/// more than one tree only the first is returned and a warning is logged.
///
/// # Returns
/// * [Tree] - Tree parsed from the file
/// * [DistError::Io] - If the file cannot be read
/// * [DistError::Parse] - If the content is not a valid Newick string
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Tree, DistError> {
    let path = path.as_ref();
    let mut byte_parser = ByteParser::from_file(path).map_err(|source| DistError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let tree = NewickParser::new().parse_str(&mut byte_parser)?;

    byte_parser.skip_comment_and_whitespace()?;
    if !byte_parser.is_eof() {
        warn!(
            path = %path.display(),
            "input holds more than one tree, only the first one is analysed"
        );
    }

    Ok(tree)
}
