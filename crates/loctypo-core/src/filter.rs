//! Word cleaning and noise filtering.

use crate::normalize;

/// Characters trimmed from both ends of every word.
pub const DEFAULT_PUNCTUATION: &str = ".!?,;:\"'()[]®\\";

/// Tokens that are never counted as words.
pub const DEFAULT_RESERVED_TOKENS: &[&str] = &["l_english:"];

/// Cleans raw word fields and decides which of them count as words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCleaner {
    punctuation: Vec<char>,
    reserved: Vec<String>,
}

impl Default for WordCleaner {
    fn default() -> Self {
        Self::new(
            DEFAULT_PUNCTUATION,
            DEFAULT_RESERVED_TOKENS.iter().map(|t| (*t).to_string()),
        )
    }
}

impl WordCleaner {
    /// Create a cleaner trimming the characters of `punctuation` and
    /// rejecting the given reserved tokens.
    pub fn new<I, S>(punctuation: &str, reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            punctuation: punctuation.chars().collect(),
            reserved: reserved.into_iter().map(Into::into).collect(),
        }
    }

    /// Trim boundary punctuation, lower-case, then trim whitespace.
    ///
    /// Punctuation inside the word (the apostrophe in `don't`) is kept.
    pub fn clean(&self, word: &str) -> String {
        word.trim_matches(|c: char| self.punctuation.contains(&c))
            .to_lowercase()
            .trim()
            .to_string()
    }

    /// Returns `true` if a cleaned word is noise and must not be counted.
    pub fn discard(&self, word: &str) -> bool {
        word.is_empty()
            || self.reserved.iter().any(|r| r == word)
            || word.chars().any(char::is_numeric)
    }

    /// Normalize a raw line and return its countable words in order.
    pub fn words(&self, line: &str) -> Vec<String> {
        normalize::clean_line(line)
            .iter()
            .map(|field| self.clean(field))
            .filter(|word| !self.discard(word))
            .collect()
    }
}
