//! Match records produced by the recognition engine.
//!
//! All spans are byte offsets into the string that was searched. Records are
//! immutable once built; the resolver only ever creates shifted copies when
//! it moves a result from a substring's coordinates into its parent's.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;
use std::ops::{Deref, Range};

/// A recognised span of the searched string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matching<I> {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Canonical text recovered for the span (a catalogue label, a keyword
    /// list, or the span's own text when nothing better is known).
    pub text: String,
    /// What the span resolved to, if anything.
    pub id: Option<I>,
}

impl<I> Matching<I> {
    /// Create a new match record.
    pub fn new(start: usize, end: usize, text: impl Into<String>, id: Option<I>) -> Self {
        debug_assert!(start <= end, "span {start}..{end} is reversed");
        Self {
            start,
            end,
            text: text.into(),
            id,
        }
    }

    /// A record for a piece of text that explains nothing.
    pub fn unresolved(span: Range<usize>, text: impl Into<String>) -> Self {
        Self::new(span.start, span.end, text, None)
    }

    /// Byte range of the span.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Move the span `offset` bytes to the right.
    #[must_use]
    pub fn shifted(mut self, offset: usize) -> Self {
        self.start += offset;
        self.end += offset;
        self
    }
}

/// A fuzzy match between some text and an episode title or description.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TitleMatching<I> {
    /// The matched span; `id` is the episode and `text` the catalogue label.
    pub matching: Matching<I>,
    /// Within the tight error allowance.
    pub exact: bool,
    /// Matched an episode title rather than a description.
    pub primary_title: bool,
    /// Normalised error rate of the match; lower is better.
    pub weight: f64,
}

impl<I> TitleMatching<I> {
    /// The episode this title belongs to.
    pub fn episode(&self) -> Option<&I> {
        self.matching.id.as_ref()
    }

    /// Move the span `offset` bytes to the right.
    #[must_use]
    pub fn shifted(mut self, offset: usize) -> Self {
        self.matching = self.matching.shifted(offset);
        self
    }
}

impl<I> Deref for TitleMatching<I> {
    type Target = Matching<I>;

    fn deref(&self) -> &Self::Target {
        &self.matching
    }
}

/// Order title matches from most to least convincing.
///
/// Criteria, first difference wins:
/// 1. exact before inexact,
/// 2. episodes in `expected` before the rest (when a set is given),
/// 3. titles before descriptions,
/// 4. lower weight first,
/// 5. longer span first.
pub fn by_priority<'a, I: Eq + Hash>(
    expected: Option<&'a HashSet<I>>,
) -> impl Fn(&TitleMatching<I>, &TitleMatching<I>) -> Ordering + 'a {
    move |a, b| {
        let in_expected = |m: &TitleMatching<I>| match (expected, m.episode()) {
            (Some(set), Some(id)) => set.contains(id),
            _ => false,
        };

        b.exact
            .cmp(&a.exact)
            .then_with(|| in_expected(b).cmp(&in_expected(a)))
            .then_with(|| b.primary_title.cmp(&a.primary_title))
            .then_with(|| a.weight.total_cmp(&b.weight))
            .then_with(|| b.len().cmp(&a.len()))
    }
}

/// The outcome of recognising one file name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilenameMatch<E> {
    /// The recognised episode.
    pub episode: E,
    /// Whether the evidence was conclusive. Inexact matches are suggestions
    /// that should be confirmed by a person.
    pub exact: bool,
    /// Parts of the name that did not contribute to the match, in order.
    pub ignored: Vec<Matching<E>>,
}

impl<E> FilenameMatch<E> {
    /// Move every ignored span `offset` bytes to the right.
    #[must_use]
    pub fn shifted(mut self, offset: usize) -> Self {
        self.ignored = self
            .ignored
            .into_iter()
            .map(|m| m.shifted(offset))
            .collect();
        self
    }
}
