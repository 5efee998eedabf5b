//! Finding series names inside file names.

use std::collections::HashSet;

use crate::matching::Matching;
use crate::normalize::NormalizedString;
use crate::source::Item;

/// Where a series label came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// The series title.
    Title,
    /// An alternative description.
    Description,
    /// A title with its leading "the " removed.
    WithoutArticle,
}

/// One searchable series label.
#[derive(Debug, Clone)]
pub struct SeriesLabel<S> {
    /// The normalised label.
    pub label: NormalizedString,
    /// The series it names.
    pub series: S,
    /// Where it came from.
    pub kind: LabelKind,
}

/// All series labels, deduplicated on their normalised text.
///
/// When two series share a label, the first one listed keeps it.
#[derive(Debug, Clone)]
pub struct SeriesIndex<S> {
    labels: Vec<SeriesLabel<S>>,
}

impl<S: Clone> SeriesIndex<S> {
    /// Build the index from series titles and descriptions.
    ///
    /// Every title starting with "the " is also indexed without it.
    pub fn new(titles: Vec<Item<S>>, descriptions: Vec<Item<S>>) -> Self {
        let mut seen = HashSet::new();
        let mut labels = Vec::new();
        let mut push = |label: NormalizedString, series: S, kind| {
            if !label.is_empty() && seen.insert(label.as_str().to_string()) {
                labels.push(SeriesLabel { label, series, kind });
            }
        };

        for item in titles {
            let label = NormalizedString::new(&item.label);
            let stripped = label
                .as_str()
                .starts_with("the ")
                .then(|| NormalizedString::new(&label.original()[label.original_offset(4)..]));
            push(label, item.id.clone(), LabelKind::Title);
            if let Some(stripped) = stripped {
                push(stripped, item.id, LabelKind::WithoutArticle);
            }
        }
        for item in descriptions {
            push(NormalizedString::new(&item.label), item.id, LabelKind::Description);
        }

        Self { labels }
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there are no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All labels.
    pub fn labels(&self) -> &[SeriesLabel<S>] {
        &self.labels
    }

    fn matching(&self, entry: &SeriesLabel<S>, text: &NormalizedString, start: usize) -> Matching<S> {
        let span = text.original_span(start..start + entry.label.len());
        Matching::new(
            span.start,
            span.end,
            entry.label.original(),
            Some(entry.series.clone()),
        )
    }

    /// Find the label that is a prefix of `text` covering the most original
    /// text.
    pub fn match_series(&self, text: &NormalizedString) -> Option<Matching<S>> {
        self.labels
            .iter()
            .filter(|entry| text.as_str().starts_with(entry.label.as_str()))
            .map(|entry| self.matching(entry, text, 0))
            .max_by_key(|m| m.len())
    }

    /// Find the label that equals the whole of `text`.
    pub fn match_whole(&self, text: &NormalizedString) -> Option<Matching<S>> {
        self.labels
            .iter()
            .find(|entry| entry.label == *text)
            .map(|entry| self.matching(entry, text, 0))
    }

    /// Every word-delimited label occurrence starting within `max_prefix`
    /// normalised characters of the start, earliest first, longer labels first
    /// among those starting together.
    pub fn matches_allowing_prefix(&self, text: &NormalizedString, max_prefix: usize) -> Vec<Matching<S>> {
        self.occurrences(text, max_prefix)
            .into_iter()
            .map(|o| o.matching)
            .collect()
    }

    pub(crate) fn occurrences(&self, text: &NormalizedString, max_prefix: usize) -> Vec<Occurrence<S>> {
        let haystack = text.as_str();
        let mut found: Vec<(usize, usize, &SeriesLabel<S>)> = Vec::new();

        for entry in &self.labels {
            let needle = entry.label.as_str();
            for (start, _) in haystack.match_indices(needle) {
                if haystack[..start].chars().count() > max_prefix {
                    break;
                }
                let end = start + needle.len();
                if text.is_word_boundary(start) && text.is_word_boundary(end) {
                    found.push((start, end, entry));
                }
            }
        }

        found.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)));
        found
            .into_iter()
            .map(|(start, end, entry)| Occurrence {
                start,
                end,
                matching: self.matching(entry, text, start),
            })
            .collect()
    }

    /// The best word-delimited occurrence within `max_prefix` characters of
    /// the start.
    pub fn match_series_allowing_prefix(&self, text: &NormalizedString, max_prefix: usize) -> Option<Matching<S>> {
        self.matches_allowing_prefix(text, max_prefix).into_iter().next()
    }
}

/// A label occurrence with its normalised bounds.
#[derive(Debug, Clone)]
pub(crate) struct Occurrence<S> {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) matching: Matching<S>,
}
