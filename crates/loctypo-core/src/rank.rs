//! Suspicion ranking.
//!
//! Common words have more chances to spawn a typo, and longer words have
//! more characters that can go wrong, so each word is weighted by
//! `count × length`.

use serde::Serialize;

use crate::corpus::WordCounts;

/// A word together with its frequency and priority score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedWord {
    /// The word.
    pub word: String,
    /// Occurrences across the corpus.
    pub count: usize,
    /// `count × length`, length counted in characters.
    pub prior_weight: usize,
}

/// Words occurring exactly once, in first-seen order.
///
/// Entries are removed as they get matched so a rare word is reported at
/// most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingletonSet {
    words: Vec<String>,
}

impl SingletonSet {
    /// Words still available for matching.
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    /// Number of words still available.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if every singleton has been matched.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns `true` if `word` is still available.
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Drop every listed word from the set, keeping the order of the rest.
    pub fn remove_all(&mut self, matched: &[String]) {
        self.words.retain(|w| !matched.contains(w));
    }
}

impl<S: Into<String>> FromIterator<S> for SingletonSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Output of [`rank`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    /// Every word, by descending priority score. Ties keep first-seen order.
    pub ranked: Vec<RankedWord>,
    /// Words occurring exactly once.
    pub singletons: SingletonSet,
}

/// Priority score of a word seen `count` times.
pub fn priority_score(word: &str, count: usize) -> usize {
    count * word.chars().count()
}

/// Derive the singleton set and the descending priority ranking.
#[tracing::instrument(skip_all, fields(unique = counts.unique_words()))]
pub fn rank(counts: &WordCounts) -> Ranking {
    let singletons = counts
        .iter()
        .filter(|&(_, count)| count == 1)
        .map(|(word, _)| word)
        .collect();

    let mut ranked: Vec<RankedWord> = counts
        .iter()
        .map(|(word, count)| RankedWord {
            word: word.to_string(),
            count,
            prior_weight: priority_score(word, count),
        })
        .collect();
    // stable: equal scores stay in first-seen order
    ranked.sort_by(|a, b| b.prior_weight.cmp(&a.prior_weight));

    Ranking { ranked, singletons }
}
