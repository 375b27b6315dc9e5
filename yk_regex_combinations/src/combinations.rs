/**
 * The enumeration object: owns a parsed pattern with its count tree and hands
 * out the n-th matching string on request.
 */

use std::convert::TryFrom;
use std::iter::FusedIterator;
use yk_regex_parse::Node;
use crate::count::CountNode;
use crate::decode::decode;
use crate::error::{Error, Result};
use crate::options::Options;

#[derive(Debug, Clone)]
pub struct Combinations {
    pattern: String,
    ast: Node,
    tree: CountNode,
    options: Options,
}

impl Combinations {
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_options(pattern, Options::default())
    }

    pub fn with_options(pattern: &str, options: Options) -> Result<Self> {
        let ast = yk_regex_parse::parse(pattern)?;
        let tree = CountNode::build(&ast, &options)?;
        Ok(Self{ pattern: pattern.into(), ast, tree, options })
    }

    /// The number of distinct strings the pattern enumerates.
    pub fn size(&self) -> u64 {
        self.tree.combinations
    }

    /// The `n`-th string of the enumeration.
    pub fn at(&self, n: u64) -> Result<String> {
        if n >= self.size() {
            return Err(Error::IndexOutOfRange{ index: n, size: self.size() });
        }

        let mut result = String::new();
        decode(&self.ast, &self.tree, n, &self.options, &mut result)?;
        Ok(result)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter{ combinations: self, front: 0, back: self.size() }
    }

    /// Iterates starting from the `start`-th string, or yields nothing if it's
    /// past the end.
    pub fn iter_from(&self, start: u64) -> Iter<'_> {
        let back = self.size();
        Iter{ combinations: self, front: start.min(back), back }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn ast(&self) -> &Node {
        &self.ast
    }

    pub fn count_tree(&self) -> &CountNode {
        &self.tree
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl <'a> IntoIterator for &'a Combinations {
    type Item = String;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/**
 * Random-access view over the enumeration, every string is decoded lazily
 * when reached.
 */

#[derive(Debug, Clone)]
pub struct Iter<'a> {
    combinations: &'a Combinations,
    front: u64,
    back: u64,
}

impl <'a> Iter<'a> {
    /// The index of the string `next` yields.
    pub fn position(&self) -> u64 {
        self.front
    }

    pub fn remaining(&self) -> u64 {
        self.back - self.front
    }

    fn string_at(&self, n: u64) -> String {
        match self.combinations.at(n) {
            Ok(s) => s,
            // Construction already rejected everything decoding could
            Err(e) => unreachable!("decoding a valid index failed: {}", e),
        }
    }
}

impl <'a> Iterator for Iter<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.front == self.back {
            return None;
        }
        let s = self.string_at(self.front);
        self.front += 1;
        Some(s)
    }

    fn nth(&mut self, n: usize) -> Option<String> {
        let skip = u64::try_from(n).unwrap_or(u64::MAX);
        self.front = self.front.saturating_add(skip).min(self.back);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }

    fn count(self) -> usize {
        usize::try_from(self.remaining()).unwrap_or(usize::MAX)
    }

    fn last(mut self) -> Option<String> {
        self.next_back()
    }
}

impl <'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<String> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.string_at(self.back))
    }

    fn nth_back(&mut self, n: usize) -> Option<String> {
        let skip = u64::try_from(n).unwrap_or(u64::MAX);
        self.back = self.back.saturating_sub(skip).max(self.front);
        self.next_back()
    }
}

impl <'a> ExactSizeIterator for Iter<'a> {}

impl <'a> FusedIterator for Iter<'a> {}

// Tests ///////////////////////////////////////////////////////////////////////
