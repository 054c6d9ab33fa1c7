//! Basic low-level byte parser functionality.
//!
//! The [NewickParser](crate::newick::NewickParser) is built on top of
//! [ByteParser], which reports problems as [ParsingError].

pub mod byte_parser;
pub(crate) mod byte_source;
pub mod parsing_error;

pub use byte_parser::ByteParser;
pub use parsing_error::{ParsingError, ParsingErrorType};
