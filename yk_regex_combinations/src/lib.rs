/**
 * Bijective enumeration of the strings a bounded regex matches: the exact
 * number of matches, and the n-th match in a fixed order, without ever
 * materializing the whole set.
 */

extern crate yk_regex_parse;

mod combinations;
mod count;
mod decode;
mod error;
mod options;

pub use combinations::{Combinations, Iter};
pub use count::CountNode;
pub use error::{Error, Feature, Result};
pub use options::Options;
pub use yk_regex_parse::{Node, ParseError, ParseErrorKind};
