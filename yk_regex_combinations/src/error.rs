/**
 * Everything that can go wrong while building or querying an enumeration.
 */

use yk_regex_parse::ParseError;

pub type Result<T> = std::result::Result<T, Error>;

/// Syntactically valid pattern features that can not be enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    UnboundedRepeat,
    StartAnchor,
    EndAnchor,
    NegatedCharset,
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnboundedRepeat => write!(f, "unbounded repeat"),
            Self::StartAnchor => write!(f, "start of match '^'"),
            Self::EndAnchor => write!(f, "end of match '$'"),
            Self::NegatedCharset => write!(f, "negated charset"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    PatternInvalid(ParseError),
    UnsupportedFeature(Feature),
    /// The exact number of matches does not fit into an `u64`.
    TooManyCombinations,
    IndexOutOfRange {
        index: u64,
        size: u64,
    },
    /// The pattern uses '.' but the configured alphabet is empty.
    EmptyAlphabet,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PatternInvalid(e) => write!(f, "invalid pattern: {}", e),
            Self::UnsupportedFeature(feature) => write!(f, "{} not supported", feature),
            Self::TooManyCombinations => write!(f, "pattern has more than {} combinations", u64::MAX),
            Self::IndexOutOfRange { index, size } => {
                write!(f, "index {} is out of range for {} combinations", index, size)
            }
            Self::EmptyAlphabet => write!(f, "'.' used with an empty alphabet"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PatternInvalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::PatternInvalid(e)
    }
}
