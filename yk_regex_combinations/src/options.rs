/**
 * Knobs of the enumeration.
 */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    any_char_alphabet: Vec<char>,
}

impl Options {
    /// The characters '.' enumerates, in order. Duplicates are dropped,
    /// keeping the first occurrence.
    pub fn with_any_char_alphabet<I>(chars: I) -> Self where I : IntoIterator<Item = char> {
        let mut any_char_alphabet: Vec<char> = Vec::new();
        for c in chars {
            if !any_char_alphabet.contains(&c) {
                any_char_alphabet.push(c);
            }
        }
        Self{ any_char_alphabet }
    }

    pub fn any_char_alphabet(&self) -> &[char] {
        &self.any_char_alphabet
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::with_any_char_alphabet('a'..='z')
    }
}
