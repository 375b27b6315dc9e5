mod common;

use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use yk_regex_combinations::Combinations;
use common::full_match;

const PATTERNS: &[&str] = &[
    "[a-z]{3,6}@(example|test)\\.(com|org)",
    "(GET|POST|PUT) /[a-z0-9]{1,8}( HTTP/1\\.[01])?",
    r"\d{4}-\d{2}-\d{2}",
    ".{0,5}",
];

#[test]
fn random_indices_are_deterministic_and_match() {
    let mut rng = Mcg128Xsl64::seed_from_u64(0x5eed);
    for pattern in PATTERNS {
        let c = Combinations::new(pattern).unwrap();
        let re = full_match(pattern);
        for _ in 0..200 {
            let n = rng.gen_range(0, c.size());
            let s = c.at(n).unwrap();
            assert!(re.is_match(&s), "{:?} does not match {:?}", s, pattern);
            assert_eq!(c.at(n).unwrap(), s);
        }
    }
}

#[test]
fn distinct_indices_give_distinct_strings() {
    let mut rng = Mcg128Xsl64::seed_from_u64(42);
    let c = Combinations::new(PATTERNS[0]).unwrap();
    for _ in 0..500 {
        let a = rng.gen_range(0, c.size());
        let b = rng.gen_range(0, c.size());
        if a != b {
            assert_ne!(c.at(a).unwrap(), c.at(b).unwrap());
        }
    }
}

#[test]
fn skipping_agrees_with_indexing() {
    let mut rng = Mcg128Xsl64::seed_from_u64(7);
    let c = Combinations::new(PATTERNS[2]).unwrap();
    for _ in 0..50 {
        let n = rng.gen_range(0, c.size());
        assert_eq!(c.iter().nth(n as usize), c.at(n).ok());
        assert_eq!(c.iter_from(n).next(), c.at(n).ok());
    }
}

#[test]
fn concurrent_reads_agree() {
    let c = Combinations::new(PATTERNS[1]).unwrap();
    let expected: Vec<String> = (0..400).map(|n| c.at(n).unwrap()).collect();

    std::thread::scope(|s| {
        for t in 0..4u64 {
            let c = &c;
            let expected = &expected;
            s.spawn(move || {
                for n in (t..400).step_by(4) {
                    assert_eq!(&c.at(n).unwrap(), &expected[n as usize]);
                }
            });
        }
    });
}
