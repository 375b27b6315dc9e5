/**
 * Parsing regex pattern text into a typed syntax tree.
 */

mod ast;
mod error;
mod parser;

pub use ast::{Node, Quantifier, CharsetElement};
pub use error::{ParseError, ParseErrorKind};
pub use parser::parse;
