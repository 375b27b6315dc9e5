/**
 * String generation strategies over the enumeration of a pattern.
 */

use yk_regex_combinations::Combinations;

pub trait StringGenStrategy {
    /// The next index and its string, `None` once exhausted.
    fn generate(&mut self) -> Option<(u64, String)>;
}

/**
 * Walks the enumeration in order from a starting index.
 */

pub struct SequentialGenerator<'a> {
    combinations: &'a Combinations,
    next: u64,
}

impl <'a> SequentialGenerator<'a> {
    pub fn starting_at(combinations: &'a Combinations, start: u64) -> Self {
        Self{ combinations, next: start }
    }
}

impl <'a> StringGenStrategy for SequentialGenerator<'a> {
    fn generate(&mut self) -> Option<(u64, String)> {
        let index = self.next;
        let s = self.combinations.at(index).ok()?;
        self.next += 1;
        Some((index, s))
    }
}

/**
 * Jumps a fixed stride through the enumeration, wrapping around at the end.
 * A stride coprime to the size visits every string once per cycle.
 */

pub struct StridedGenerator<'a> {
    combinations: &'a Combinations,
    next: u64,
    stride: u64,
}

impl <'a> StridedGenerator<'a> {
    pub fn with_stride(combinations: &'a Combinations, start: u64, stride: u64) -> Self {
        Self{ combinations, next: start % combinations.size(), stride }
    }
}

impl <'a> StringGenStrategy for StridedGenerator<'a> {
    fn generate(&mut self) -> Option<(u64, String)> {
        let index = self.next;
        let s = self.combinations.at(index).ok()?;
        let size = u128::from(self.combinations.size());
        // The sum is below 2 * size, so it fits back after the modulo
        self.next = ((u128::from(index) + u128::from(self.stride) % size) % size) as u64;
        Some((index, s))
    }
}
