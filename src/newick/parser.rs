//! Structs and logic to parse a Newick string into a [Tree].

use crate::model::{BranchLength, Tree, VertexIndex};
use crate::newick::defs::{DEFAULT_NUM_VERTICES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use tracing::debug;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for a rooted Newick tree with arbitrary degree.
///
/// # Configuration
/// * [`with_num_vertices()`](Self::with_num_vertices) - Pre-allocation hint
///
/// A numeric label after `)` is read as bootstrap support, any other label
/// as the name of the clade.
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse a single tree
///
/// Parsing does not recurse: open clades live on an explicit stack, so
/// very deep (e.g. caterpillar) trees are fine.
///
/// # Example
/// ```
/// use treedist::newick::NewickParser;
/// use treedist::parser::ByteParser;
///
/// let input = "[ lh=-7360.43 ](3_ACH1_LONAC:1.06,(3_TRYP_STRGR:0.47,3_PRTA_STRGR:1.34)99:0.59,3_PLMN_HUMAN:0.67);";
/// let mut byte_parser = ByteParser::for_str(input);
/// let tree = NewickParser::new().parse_str(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_leaves(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    num_vertices_guess: usize,
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default settings.
    pub fn new() -> Self {
        Self {
            num_vertices_guess: DEFAULT_NUM_VERTICES_GUESS,
        }
    }

    /// Sets the expected number of vertices, for pre-allocation.
    pub fn with_num_vertices(mut self, num_vertices: usize) -> Self {
        self.num_vertices_guess = num_vertices;
        self
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// Leading comments and whitespace are skipped; parsing stops right after
    /// the terminating `;`.
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed tree
    /// * `Err(ParsingError)` - If the Newick string is invalid
    pub fn parse_str<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<Tree, ParsingError> {
        let mut tree = Tree::with_capacity(self.num_vertices_guess);

        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b'(') {
            return Err(unexpected(parser, "'(' at start of tree"));
        }

        // Children collected so far for each clade that is still open
        let mut open_clades: Vec<Vec<VertexIndex>> = vec![Vec::new()];
        let mut expect_vertex = true;

        loop {
            parser.skip_comment_and_whitespace()?;

            if expect_vertex {
                if parser.consume_if(b'(') {
                    open_clades.push(Vec::new());
                    continue;
                }
                let leaf = self.parse_leaf(parser, &mut tree)?;
                push_child(&mut open_clades, leaf);
                expect_vertex = false;
                continue;
            }

            match parser.next_byte() {
                Some(b',') => expect_vertex = true,
                Some(b')') => {
                    let children = open_clades.pop().unwrap_or_default();
                    if open_clades.is_empty() {
                        self.parse_root_tail(parser, &mut tree, children)?;
                        break;
                    }
                    let internal = self.parse_internal_vertex(parser, &mut tree, children)?;
                    push_child(&mut open_clades, internal);
                }
                Some(other) => {
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        format!("Expected ',' or ')' after vertex but found {:?}", char::from(other)),
                    ));
                }
                None => return Err(ParsingError::unexpected_eof(parser)),
            }
        }

        debug!(
            leaves = tree.num_leaves(),
            vertices = tree.num_vertices(),
            "parsed newick tree"
        );
        Ok(tree)
    }
}

fn push_child(open_clades: &mut [Vec<VertexIndex>], child: VertexIndex) {
    if let Some(children) = open_clades.last_mut() {
        children.push(child);
    }
}

fn unexpected<B: ByteSource>(parser: &ByteParser<B>, expected: &str) -> ParsingError {
    if parser.is_eof() {
        return ParsingError::unexpected_eof(parser);
    }
    let next_char = parser.peek().map(char::from);
    ParsingError::invalid_newick_string(
        parser,
        format!("Expected {} but found {:?}", expected, next_char),
    )
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Parses leaf `label[:branch_length]` and adds it to the tree.
    fn parse_leaf<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if label.is_empty() {
            return Err(unexpected(parser, "leaf label"));
        }
        let branch_length = parse_branch_length(parser)?;
        Ok(tree.add_leaf(branch_length, label))
    }

    /// Parses the part after `)` of an internal vertex,
    /// `[label][:branch_length]`, and adds the vertex to the tree.
    fn parse_internal_vertex<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut Tree,
        children: Vec<VertexIndex>,
    ) -> Result<VertexIndex, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let branch_length = parse_branch_length(parser)?;

        let (bootstrap, name) = match label.parse::<f64>() {
            _ if label.is_empty() => (None, None),
            Ok(support) => (Some(support), None),
            _ => (None, Some(label)),
        };

        let index = tree.add_internal_vertex(children, branch_length, bootstrap);
        if let Some(name) = name {
            tree.vertex_mut(index).set_name(name);
        }
        Ok(index)
    }

    /// Parses the part after the closing `)` of the root,
    /// `[label][:branch_length];`, and adds the root to the tree.
    ///
    /// A root label or branch length carries no distance information and is dropped.
    fn parse_root_tail<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut Tree,
        children: Vec<VertexIndex>,
    ) -> Result<(), ParsingError> {
        parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        parse_branch_length(parser)?;

        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            return Err(unexpected(parser, "';' at end of tree"));
        }

        tree.add_root(children);
        Ok(())
    }
}

/// Parses optional branch length `[:number]`:
/// - Skips comments/whitespace before and after `:`
/// - Supports scientific notation (e.g., `1.5e-10`)
///
/// # Returns
/// - `Ok(Some(branch_length))` if a valid branch length was found
/// - `Ok(None)` if there is no branch length
/// - [ParsingError] if the value is not a non-negative, finite number
fn parse_branch_length<B: ByteSource>(
    parser: &mut ByteParser<B>,
) -> Result<Option<BranchLength>, ParsingError> {
    parser.skip_comment_and_whitespace()?;
    if !parser.consume_if(b':') {
        return Ok(None);
    }
    parser.skip_comment_and_whitespace()?;

    let literal = parser.take_number_literal();
    literal
        .parse::<f64>()
        .ok()
        .and_then(BranchLength::try_new)
        .map(Some)
        .ok_or_else(|| {
            ParsingError::invalid_newick_string(parser, format!("Invalid branch length: {:?}", literal))
        })
}
