//! Fuzzy matching of episode titles.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::distance::levenshtein;
use crate::matching::{by_priority, Matching, TitleMatching};
use crate::normalize::NormalizedString;
use crate::source::{EpisodeTitleEntry, SeriesDetails};
use crate::weight::{weight, Thresholds};

/// Series details with every title normalised once.
#[derive(Debug, Clone)]
pub struct PreparedSeries<E> {
    titles: Vec<(NormalizedString, EpisodeTitleEntry<E>)>,
    numbers: HashMap<String, E>,
}

impl<E: Clone + Eq + Hash> PreparedSeries<E> {
    /// Normalise the titles of `details`. Titles without content are dropped.
    pub fn new(details: SeriesDetails<E>) -> Self {
        let titles = details
            .titles
            .into_iter()
            .map(|entry| (NormalizedString::new(&entry.text), entry))
            .filter(|(label, _)| !label.is_empty())
            .collect();
        Self {
            titles,
            numbers: details.numbers,
        }
    }

    /// Look up an episode by positional key.
    pub fn episode_for(&self, key: &str) -> Option<&E> {
        self.numbers.get(key)
    }

    /// Number of searchable titles.
    pub fn title_count(&self) -> usize {
        self.titles.len()
    }

    /// Rank every title against the text of `text` starting at normalised
    /// offset `from`.
    ///
    /// Each title is aligned against the text with suffix tolerance; the
    /// aligned prefix is then stretched to the end of the word it stops in,
    /// the stretch counting as extra edits. Titles outside the suggestion
    /// allowance are dropped, the rest are sorted with [`by_priority`].
    pub(crate) fn rank(
        &self,
        text: &NormalizedString,
        from: usize,
        thresholds: &Thresholds,
        expected: Option<&HashSet<E>>,
    ) -> Vec<Candidate<E>> {
        let from = text.skip_space(from);
        let Some(rest) = text.as_str().get(from..).filter(|rest| !rest.is_empty()) else {
            return Vec::new();
        };

        let mut candidates: Vec<Candidate<E>> = self
            .titles
            .iter()
            .filter_map(|(label, entry)| {
                let alignment = levenshtein(label.as_str(), rest);
                let aligned = alignment.length_without_suffix;
                let word_end = rest[aligned..]
                    .find(' ')
                    .map_or(rest.len(), |i| aligned + i);
                let distance =
                    alignment.distance_without_suffix + rest[aligned..word_end].chars().count();
                if word_end == 0 {
                    return None;
                }

                let length = rest[..word_end].chars().count();
                let w = weight(distance as f64, length);
                if w > thresholds.suggestion_weight(length) {
                    return None;
                }

                let span = text.original_span(from..from + word_end);
                Some(Candidate {
                    title: TitleMatching {
                        matching: Matching::new(
                            span.start,
                            span.end,
                            entry.text.clone(),
                            Some(entry.episode.clone()),
                        ),
                        exact: w <= thresholds.exact_weight(length),
                        primary_title: entry.primary,
                        weight: w,
                    },
                    end: from + word_end,
                })
            })
            .collect();

        let order = by_priority(expected);
        candidates.sort_by(|a, b| order(&a.title, &b.title));
        candidates
    }

    /// Public face of [`Self::rank`] for a raw string.
    pub fn closest_episodes(
        &self,
        text: &str,
        thresholds: &Thresholds,
        expected: Option<&HashSet<E>>,
    ) -> Vec<TitleMatching<E>> {
        let normalized = NormalizedString::new(text);
        self.rank(&normalized, 0, thresholds, expected)
            .into_iter()
            .map(|c| c.title)
            .collect()
    }
}

/// A ranked title match plus where it ends in normalised text.
#[derive(Debug, Clone)]
pub(crate) struct Candidate<E> {
    pub(crate) title: TitleMatching<E>,
    pub(crate) end: usize,
}
