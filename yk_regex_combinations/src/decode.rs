/**
 * Maps an index of the combination space back to the string it stands for.
 *
 * Every node treats the index as a digit of a mixed-radix number: branches
 * (alternatives, charset elements) are searched by subtracting the weights of
 * the preceding ones, consecutive parts (sequence elements, repeated copies)
 * take `n mod base` and pass `n div base` on. The leftmost part is the least
 * significant digit.
 */

use yk_regex_parse::{Node, Quantifier, CharsetElement};
use crate::count::{CountNode, geometric, scalar};
use crate::error::{Error, Feature, Result};
use crate::options::Options;

/// Appends the `n`-th string of `node` to `output`. `tree` must be the count
/// tree built from `node` and `n` must be less than its combinations.
pub(crate) fn decode(node: &Node, tree: &CountNode, n: u64, options: &Options,
    output: &mut String) -> Result<()> {

    debug_assert!(n < tree.combinations);

    match node {
        Node::Literal(s) => {
            output.push_str(s);
            Ok(())
        },

        Node::AnyChar => {
            match options.any_char_alphabet().get(n as usize) {
                Some(c) => output.push(*c),
                None => unreachable!("index {} outside of the any-char alphabet", n),
            }
            Ok(())
        },

        Node::Charset{ negated: true, .. } => Err(Error::UnsupportedFeature(Feature::NegatedCharset)),

        Node::Charset{ negated: false, elements } => {
            let (i, n) = select(&tree.children, n);
            match &elements[i] {
                CharsetElement::Literal(c) => output.push(*c),
                CharsetElement::Range(lo, _) => match scalar::nth_from(*lo, n) {
                    Some(c) => output.push(c),
                    None => unreachable!("range starting at {:?} has no element {}", lo, n),
                },
            }
            Ok(())
        },

        Node::Alternative(branches) => {
            let (i, n) = select(&tree.children, n);
            decode(&branches[i], &tree.children[i], n, options, output)
        },

        Node::Sequence(elements) => {
            let mut n = n;
            for (element, child) in elements.iter().zip(&tree.children) {
                decode(element, child, n % child.combinations, options, output)?;
                n /= child.combinations;
            }
            Ok(())
        },

        Node::Group(subnode) => decode(subnode, &tree.children[0], n, options, output),

        Node::Quantified{ subnode, quantifier } =>
            decode_quantified(subnode, *quantifier, tree, n, options, output),

        Node::StartAnchor => Err(Error::UnsupportedFeature(Feature::StartAnchor)),
        Node::EndAnchor => Err(Error::UnsupportedFeature(Feature::EndAnchor)),
    }
}

/// Finds the branch owning `n`, returning its position and the index inside
/// of it.
fn select(branches: &[CountNode], mut n: u64) -> (usize, u64) {
    for (i, branch) in branches.iter().enumerate() {
        if n < branch.combinations {
            return (i, n);
        }
        n -= branch.combinations;
    }
    unreachable!("index exceeds the combinations of every branch")
}

fn decode_quantified(subnode: &Node, quantifier: Quantifier, tree: &CountNode, n: u64,
    options: &Options, output: &mut String) -> Result<()> {

    let max = quantifier.max().ok_or(Error::UnsupportedFeature(Feature::UnboundedRepeat))?;
    let min = quantifier.min();
    let child = &tree.children[0];
    let q = child.combinations;

    if q == 1 {
        return decode_copies(subnode, child, min + n as usize, 0, options, output);
    }

    // Shorter repetitions come first, the bucket of `count` copies holds q^count strings
    let mut n = n;
    for count in min..=max {
        match geometric::pow(u128::from(q), count) {
            Some(bucket) if u128::from(n) >= bucket => n -= bucket as u64,
            _ => return decode_copies(subnode, child, count, n, options, output),
        }
    }
    unreachable!("index exceeds every repetition bucket")
}

fn decode_copies(subnode: &Node, child: &CountNode, count: usize, mut n: u64,
    options: &Options, output: &mut String) -> Result<()> {

    for _ in 0..count {
        decode(subnode, child, n % child.combinations, options, output)?;
        n /= child.combinations;
    }
    Ok(())
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod decoder_tests {
    use super::*;

    fn all(pattern: &str) -> Vec<String> {
        let options = Options::default();
        let ast = yk_regex_parse::parse(pattern).unwrap();
        let tree = CountNode::build(&ast, &options).unwrap();
        (0..tree.combinations).map(|n| {
            let mut s = String::new();
            decode(&ast, &tree, n, &options, &mut s).unwrap();
            s
        }).collect()
    }

    #[test]
    fn literal() {
        assert_eq!(all("abc"), vec!["abc"]);
    }

    #[test]
    fn charset_in_order() {
        assert_eq!(all("[a-cx]"), vec!["a", "b", "c", "x"]);
    }

    #[test]
    fn alternative_in_order() {
        assert_eq!(all("x|[ab]|yz"), vec!["x", "a", "b", "yz"]);
    }

    #[test]
    fn sequence_first_element_varies_fastest() {
        assert_eq!(all("[ab][01]"), vec!["a0", "b0", "a1", "b1"]);
    }

    #[test]
    fn sequence_threads_the_quotient() {
        assert_eq!(all("[ab][01][xy]"), vec![
            "a0x", "b0x", "a1x", "b1x",
            "a0y", "b0y", "a1y", "b1y",
        ]);
    }

    #[test]
    fn repeat_of_single_string() {
        assert_eq!(all("(ab){0,2}"), vec!["", "ab", "abab"]);
    }

    #[test]
    fn repeat_shorter_first() {
        assert_eq!(all("[ab]{1,2}"), vec!["a", "b", "aa", "ba", "ab", "bb"]);
    }

    #[test]
    fn optional() {
        assert_eq!(all("x[ab]?"), vec!["x", "xa", "xb"]);
    }

    #[test]
    fn any_char() {
        let strings = all(".");
        assert_eq!(strings.len(), 26);
        assert_eq!(strings[0], "a");
        assert_eq!(strings[25], "z");
    }

    #[test]
    fn unsupported_nodes_fail() {
        let options = Options::default();
        let tree = CountNode{ combinations: 1, children: Vec::new() };
        let mut s = String::new();
        assert_eq!(decode(&Node::StartAnchor, &tree, 0, &options, &mut s),
            Err(Error::UnsupportedFeature(Feature::StartAnchor)));
        assert_eq!(decode(&Node::EndAnchor, &tree, 0, &options, &mut s),
            Err(Error::UnsupportedFeature(Feature::EndAnchor)));
        let negated = Node::Charset{ negated: true, elements: vec![CharsetElement::Literal('a')] };
        assert_eq!(decode(&negated, &tree, 0, &options, &mut s),
            Err(Error::UnsupportedFeature(Feature::NegatedCharset)));
    }
}
