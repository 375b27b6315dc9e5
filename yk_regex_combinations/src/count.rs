/**
 * The combination-count tree, built once per pattern. Every node records how
 * many distinct strings the matching AST subtree can produce.
 */

use std::convert::TryFrom;
use yk_regex_parse::{Node, Quantifier, CharsetElement};
use crate::error::{Error, Feature, Result};
use crate::options::Options;

/// Mirrors the shape of the AST it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountNode {
    pub combinations: u64,
    pub children: Vec<CountNode>,
}

impl CountNode {
    fn leaf(combinations: u64) -> Self {
        Self{ combinations, children: Vec::new() }
    }

    fn with_children(combinations: u64, children: Vec<CountNode>) -> Self {
        Self{ combinations, children }
    }

    /// Builds the count tree of `node`, rejecting the whole pattern if any
    /// part of it can not be enumerated.
    pub(crate) fn build(node: &Node, options: &Options) -> Result<Self> {
        match node {
            Node::Literal(_) => Ok(Self::leaf(1)),

            Node::AnyChar => {
                match options.any_char_alphabet().len() {
                    0 => Err(Error::EmptyAlphabet),
                    n => Ok(Self::leaf(n as u64)),
                }
            },

            Node::Charset{ negated: true, .. } => Err(Error::UnsupportedFeature(Feature::NegatedCharset)),

            Node::Charset{ negated: false, elements } => {
                let children: Vec<_> = elements.iter()
                    .map(|e| Self::leaf(element_combinations(e)))
                    .collect();
                let combinations = checked_sum(&children)?;
                Ok(Self::with_children(combinations, children))
            },

            Node::Sequence(elements) => {
                let children = Self::build_all(elements, options)?;
                let combinations = children.iter()
                    .try_fold(1u64, |acc, c| acc.checked_mul(c.combinations))
                    .ok_or(Error::TooManyCombinations)?;
                Ok(Self::with_children(combinations, children))
            },

            Node::Alternative(branches) => {
                let children = Self::build_all(branches, options)?;
                let combinations = checked_sum(&children)?;
                Ok(Self::with_children(combinations, children))
            },

            Node::Group(subnode) => {
                let child = Self::build(subnode, options)?;
                Ok(Self::with_children(child.combinations, vec![child]))
            },

            Node::Quantified{ subnode, quantifier } => {
                let child = Self::build(subnode, options)?;
                let combinations = quantified_combinations(child.combinations, *quantifier)?;
                Ok(Self::with_children(combinations, vec![child]))
            },

            Node::StartAnchor => Err(Error::UnsupportedFeature(Feature::StartAnchor)),
            Node::EndAnchor => Err(Error::UnsupportedFeature(Feature::EndAnchor)),
        }
    }

    fn build_all(nodes: &[Node], options: &Options) -> Result<Vec<Self>> {
        nodes.iter().map(|n| Self::build(n, options)).collect()
    }
}

fn checked_sum(children: &[CountNode]) -> Result<u64> {
    children.iter()
        .try_fold(0u64, |acc, c| acc.checked_add(c.combinations))
        .ok_or(Error::TooManyCombinations)
}

pub(crate) fn element_combinations(element: &CharsetElement) -> u64 {
    match element {
        CharsetElement::Literal(_) => 1,
        CharsetElement::Range(lo, hi) => scalar::range_len(*lo, *hi),
    }
}

/// Counts the strings of `q`-combination subpattern repeated `min..=max` times.
fn quantified_combinations(q: u64, quantifier: Quantifier) -> Result<u64> {
    let max = quantifier.max().ok_or(Error::UnsupportedFeature(Feature::UnboundedRepeat))?;
    let min = quantifier.min();

    let combinations = if q == 1 {
        // Every repeat count yields the same single string
        u64::try_from(max - min).ok().and_then(|n| n.checked_add(1))
    }
    else if min > 0 {
        geometric::partial_sum_range(q, min - 1, max)
    }
    else {
        geometric::partial_sum(q, max)
    };
    combinations.ok_or(Error::TooManyCombinations)
}

/**
 * Geometric series helpers. Powers are taken in 128 bits, a result is only
 * reported when it fits into 64.
 */

pub(crate) mod geometric {
    use std::convert::TryFrom;

    /// `q^0 + q^1 + ... + q^n`
    pub fn partial_sum(q: u64, n: usize) -> Option<u64> {
        debug_assert!(q > 0);
        if q == 1 {
            return u64::try_from(n).ok()?.checked_add(1);
        }

        let q = u128::from(q);
        let top = pow(q, n.checked_add(1)?)?;
        u64::try_from((top - 1) / (q - 1)).ok()
    }

    /// `q^(a+1) + ... + q^b`, the telescoped `q * (q^a - q^b) / (1 - q)`.
    pub fn partial_sum_range(q: u64, a: usize, b: usize) -> Option<u64> {
        debug_assert!(q > 0 && a <= b);
        if q == 1 {
            return u64::try_from(b - a).ok();
        }

        let q = u128::from(q);
        let high = pow(q, b.checked_add(1)?)?;
        let low = pow(q, a + 1)?;
        u64::try_from((high - low) / (q - 1)).ok()
    }

    pub fn pow(q: u128, exp: usize) -> Option<u128> {
        q.checked_pow(u32::try_from(exp).ok()?)
    }
}

/**
 * Character ranges count Unicode scalar values, so the surrogate block is
 * skipped.
 */

pub(crate) mod scalar {
    use std::convert::TryFrom;

    const SURROGATE_START: u32 = 0xD800;
    const SURROGATE_LEN: u32 = 0x800;

    fn spans_surrogates(lo: u32, hi: u32) -> bool {
        lo < SURROGATE_START && hi >= SURROGATE_START + SURROGATE_LEN
    }

    pub fn range_len(lo: char, hi: char) -> u64 {
        let (lo, hi) = (lo as u32, hi as u32);
        let span = u64::from(hi.saturating_sub(lo)) + 1;
        if spans_surrogates(lo, hi) {
            span - u64::from(SURROGATE_LEN)
        }
        else {
            span
        }
    }

    /// The `n`-th scalar value at or after `lo`.
    pub fn nth_from(lo: char, n: u64) -> Option<char> {
        let mut code = u64::from(lo as u32).checked_add(n)?;
        if (lo as u32) < SURROGATE_START && code >= u64::from(SURROGATE_START) {
            code += u64::from(SURROGATE_LEN);
        }
        u32::try_from(code).ok().and_then(std::char::from_u32)
    }
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod count_tree_tests {
    use super::*;

    fn count(pattern: &str) -> Result<u64> {
        let ast = yk_regex_parse::parse(pattern)?;
        CountNode::build(&ast, &Options::default()).map(|t| t.combinations)
    }

    #[test]
    fn literal_counts_one() {
        assert_eq!(count("hello"), Ok(1));
    }

    #[test]
    fn any_char_counts_alphabet() {
        assert_eq!(count("."), Ok(26));
        let ast = yk_regex_parse::parse(".").unwrap();
        let opts = Options::with_any_char_alphabet("01".chars());
        assert_eq!(CountNode::build(&ast, &opts).map(|t| t.combinations), Ok(2));
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        let ast = yk_regex_parse::parse("a.").unwrap();
        let opts = Options::with_any_char_alphabet(Vec::new());
        assert_eq!(CountNode::build(&ast, &opts), Err(Error::EmptyAlphabet));
    }

    #[test]
    fn charset_sums_elements() {
        assert_eq!(count("[a-cx_]"), Ok(5));
    }

    #[test]
    fn sequence_multiplies() {
        assert_eq!(count("[ab][0-2]c"), Ok(6));
    }

    #[test]
    fn alternative_adds() {
        assert_eq!(count("a|[bc]|d"), Ok(4));
    }

    #[test]
    fn group_is_transparent() {
        assert_eq!(count("([ab])"), Ok(2));
    }

    #[test]
    fn single_string_repeats() {
        assert_eq!(count("a{2,3}"), Ok(2));
        assert_eq!(count("a{0,4}"), Ok(5));
        assert_eq!(count("a?"), Ok(2));
    }

    #[test]
    fn multi_string_repeats() {
        // 2^2 + 2^3
        assert_eq!(count("[ab]{2,3}"), Ok(12));
        // 1 + 3 + 9
        assert_eq!(count("[abc]{0,2}"), Ok(13));
        assert_eq!(count("[abc]{2}"), Ok(9));
    }

    #[test]
    fn tree_mirrors_ast() {
        let ast = yk_regex_parse::parse("x(a|[bc]){1,2}").unwrap();
        let tree = CountNode::build(&ast, &Options::default()).unwrap();
        assert_eq!(tree.combinations, 3 + 9);
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0], CountNode::leaf(1));

        let quantified = &tree.children[1];
        assert_eq!(quantified.children.len(), 1);
        let group = &quantified.children[0];
        assert_eq!(group.combinations, 3);
        let alternative = &group.children[0];
        assert_eq!(alternative.children.len(), 2);
        assert_eq!(alternative.children[1].children.len(), 2);
    }

    fn unsupported(feature: Feature) -> Result<u64> {
        Err(Error::UnsupportedFeature(feature))
    }

    #[test]
    fn unsupported_features() {
        assert_eq!(count("a*"), unsupported(Feature::UnboundedRepeat));
        assert_eq!(count("a+"), unsupported(Feature::UnboundedRepeat));
        assert_eq!(count("a{2,}"), unsupported(Feature::UnboundedRepeat));
        assert_eq!(count("^a"), unsupported(Feature::StartAnchor));
        assert_eq!(count("a$"), unsupported(Feature::EndAnchor));
        assert_eq!(count("[^a]"), unsupported(Feature::NegatedCharset));
        assert_eq!(count(r"b|\W"), unsupported(Feature::NegatedCharset));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(count("[a-z]{20}"), Err(Error::TooManyCombinations));
        assert_eq!(count("[a-z]{13}"), Ok(26u64.pow(13)));
        assert_eq!(count("(.|.){64}"), Err(Error::TooManyCombinations));
    }

    #[test]
    fn geometric_sums() {
        assert_eq!(geometric::partial_sum(1, 4), Some(5));
        assert_eq!(geometric::partial_sum(2, 3), Some(15));
        assert_eq!(geometric::partial_sum_range(2, 1, 3), Some(12));
        assert_eq!(geometric::partial_sum_range(3, 0, 2), Some(12));
        assert_eq!(geometric::partial_sum(2, 63), Some(u64::MAX));
        assert_eq!(geometric::partial_sum(2, 64), None);
    }

    #[test]
    fn ranges_skip_surrogates() {
        assert_eq!(scalar::range_len('a', 'z'), 26);
        assert_eq!(scalar::range_len('\u{D7FF}', '\u{E000}'), 2);
        assert_eq!(scalar::nth_from('\u{D7FF}', 1), Some('\u{E000}'));
        assert_eq!(scalar::nth_from('a', 2), Some('c'));
    }
}
