//! Typo matching.
//!
//! Walks the ranked words from most to least suspicious and pairs each one
//! with the singleton words a single edit away from it.

use tracing::{debug, instrument, trace};

use crate::levenshtein::is_one_edit_apart;
use crate::rank::{RankedWord, SingletonSet};
use crate::report::TypoCandidate;

/// Priority score below which the scan stops.
pub const DEFAULT_DETECTION_THRESHOLD: usize = 3000;

/// Common words shorter than this (in characters) are skipped.
pub const DEFAULT_MINIMUM_WORD_LENGTH: usize = 4;

/// Cut-offs applied by [`find_typos`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSettings {
    /// The scan ends at the first ranked word scoring below this.
    pub detection_threshold: usize,
    /// Ranked words shorter than this are not matched.
    pub minimum_word_length: usize,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            detection_threshold: DEFAULT_DETECTION_THRESHOLD,
            minimum_word_length: DEFAULT_MINIMUM_WORD_LENGTH,
        }
    }
}

/// Pair ranked common words with the singletons one edit away from them.
///
/// `ranked` must be sorted by descending score. Matched singletons are
/// removed from `singletons`, so each rare word shows up in at most one
/// candidate. Candidates come out in ranking order, then singleton order.
#[instrument(skip_all, fields(ranked = ranked.len(), singletons = singletons.len()))]
pub fn find_typos(
    ranked: &[RankedWord],
    singletons: &mut SingletonSet,
    settings: &MatchSettings,
) -> Vec<TypoCandidate> {
    let mut candidates = Vec::new();

    for common in ranked {
        if common.prior_weight < settings.detection_threshold {
            debug!(word = %common.word, prior_weight = common.prior_weight, "below threshold, stopping");
            break;
        }
        if common.word.chars().count() < settings.minimum_word_length {
            trace!(word = %common.word, "too short, skipping");
            continue;
        }

        let matched: Vec<String> = singletons
            .as_slice()
            .iter()
            .filter(|rare| is_one_edit_apart(&common.word, rare.as_str()))
            .cloned()
            .collect();
        if matched.is_empty() {
            continue;
        }

        singletons.remove_all(&matched);
        for rare in matched {
            debug!(common = %common.word, rare = %rare, "possible typo");
            candidates.push(TypoCandidate {
                common_word: common.word.clone(),
                rare_word: rare,
                prior_weight: common.prior_weight,
            });
        }
    }

    candidates
}
