/**
 * All of the regex syntax-tree (AST) data-structures.
 */

// TODO: Character classes, like [[:alpha:]], ...

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Exactly one of the branches matches.
    Alternative(Vec<Node>),

    /// All of the elements match, one after the other. Empty matches "".
    Sequence(Vec<Node>),

    Quantified{
        subnode: Box<Node>,
        quantifier: Quantifier,
    },

    /// A parenthesized sub-expression.
    Group(Box<Node>),

    Charset{
        negated: bool,
        elements: Vec<CharsetElement>,
    },

    /// The '.' wildcard.
    AnyChar,

    Literal(String),

    StartAnchor,
    EndAnchor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    AtLeast(usize),
    Between(usize, usize),
}

impl Quantifier {
    pub fn min(&self) -> usize {
        match self {
            Quantifier::AtLeast(min) | Quantifier::Between(min, _) => *min,
        }
    }

    /// The inclusive upper bound, `None` when unbounded.
    pub fn max(&self) -> Option<usize> {
        match self {
            Quantifier::AtLeast(_) => None,
            Quantifier::Between(_, max) => Some(*max),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetElement {
    Literal(char),
    Range(char, char),
}

impl Node {
    pub fn literal(s: &str) -> Self {
        Node::Literal(s.into())
    }
}
