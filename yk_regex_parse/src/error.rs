/**
 * Errors the regex parser can report.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedEnd,
    UnexpectedChar(char),
    UnmatchedParen,
    UnterminatedCharset,
    InvalidRange(char, char),
    InvalidRepetition,
    NothingToRepeat,
    UnknownEscape(char),
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedEnd => write!(f, "unexpected end of pattern"),
            Self::UnexpectedChar(c) => write!(f, "unexpected character {:?}", c),
            Self::UnmatchedParen => write!(f, "unmatched parenthesis"),
            Self::UnterminatedCharset => write!(f, "unterminated character set"),
            Self::InvalidRange(lo, hi) => write!(f, "invalid character range {:?}-{:?}", lo, hi),
            Self::InvalidRepetition => write!(f, "invalid repetition bounds"),
            Self::NothingToRepeat => write!(f, "quantifier without anything to repeat"),
            Self::UnknownEscape(c) => write!(f, "unknown escape sequence '\\{}'", c),
        }
    }
}

/// A parse failure, `position` counts characters from the start of the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    pub position: usize,
    pub kind: ParseErrorKind,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at position {}", self.kind, self.position)
    }
}

impl std::error::Error for ParseError {}
