//! Text normalisation with a map back to the original string.
//!
//! Every comparison the engine makes happens on normalised text: lowercase,
//! punctuation and whitespace runs collapsed to a single space, `&` spelled
//! out as `and`. Matches found in normalised text are reported against the
//! caller's original string, so each normalised byte remembers the original
//! byte offset it came from.

use logos::Logos;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// Runs of input characters as seen by the normaliser.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    /// Letters and digits (combining marks stay with their letter).
    #[regex(r"[\p{L}\p{N}\p{M}]+")]
    Content,

    /// `&`, spelled out as "and".
    #[token("&")]
    Ampersand,

    /// Everything else: whitespace, punctuation, symbols.
    #[regex(r"[^\p{L}\p{N}\p{M}&]+")]
    Separator,
}

/// A string paired with its normalised form and a position map.
///
/// `positions` has one entry per byte of the normalised text plus a final
/// entry. Entry `i` is the byte offset in the original string that
/// normalised byte `i` derives from; the final entry is one past the last
/// content character consumed (0 when there was no content).
///
/// Equality and hashing look only at the normalised text, so case and
/// punctuation variants of one label compare equal.
///
/// # Examples
///
/// ```
/// use tvsort_matcher::NormalizedString;
///
/// let s = NormalizedString::new("Tom & Jerry: The_Movie!");
/// assert_eq!(s.as_str(), "tom and jerry the movie");
/// assert_eq!(s.original_span(0..3), 0..3);
/// assert_eq!(&s.original()[s.original_span(14..23)], "The_Movie");
/// ```
#[derive(Clone)]
pub struct NormalizedString {
    original: String,
    text: String,
    positions: Vec<usize>,
}

impl NormalizedString {
    /// Normalise `original`.
    pub fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut positions = Vec::with_capacity(original.len() + 1);
        let mut pending_space = None;
        let mut end = 0;

        for (run, span) in Run::lexer(original).spanned() {
            let Ok(run) = run else { continue };
            match run {
                Run::Separator => {
                    if !text.is_empty() {
                        pending_space = Some(span.start);
                    }
                }
                Run::Ampersand => {
                    if let Some(at) = pending_space.take() {
                        text.push(' ');
                        positions.push(at);
                    }
                    text.push_str("and");
                    positions.extend([span.start; 3]);
                    end = span.end;
                }
                Run::Content => {
                    if let Some(at) = pending_space.take() {
                        text.push(' ');
                        positions.push(at);
                    }
                    for (i, ch) in original[span.clone()].char_indices() {
                        for lower in ch.to_lowercase() {
                            text.push(lower);
                            positions.extend(std::iter::repeat(span.start + i).take(lower.len_utf8()));
                        }
                    }
                    end = span.end;
                }
            }
        }
        positions.push(end);

        Self {
            original: original.to_string(),
            text,
            positions,
        }
    }

    /// The string this was built from.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The normalised text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the normalised text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the original contained no letters, digits or `&`.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The position map (see the type-level docs).
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Original byte offset for a normalised byte offset.
    ///
    /// Offsets past the end clamp to the final entry.
    pub fn original_offset(&self, offset: usize) -> usize {
        let last = self.positions.len() - 1;
        self.positions[offset.min(last)]
    }

    /// Original byte range covered by a normalised byte range.
    pub fn original_span(&self, range: Range<usize>) -> Range<usize> {
        self.original_offset(range.start)..self.original_offset(range.end)
    }

    /// Whether `offset` sits on a word edge: the start or end of the text,
    /// or next to a space.
    pub fn is_word_boundary(&self, offset: usize) -> bool {
        let bytes = self.text.as_bytes();
        offset == 0
            || offset >= bytes.len()
            || bytes[offset] == b' '
            || bytes[offset - 1] == b' '
    }

    /// Step over a single separating space at `offset`, if there is one.
    pub fn skip_space(&self, offset: usize) -> usize {
        if self.text.as_bytes().get(offset) == Some(&b' ') {
            offset + 1
        } else {
            offset
        }
    }

    /// Whether nothing but the end of the text follows `offset`.
    pub fn is_exhausted_at(&self, offset: usize) -> bool {
        self.skip_space(offset) >= self.text.len()
    }
}

/// Normalise a string. Shorthand for [`NormalizedString::new`].
pub fn normalize(s: &str) -> NormalizedString {
    NormalizedString::new(s)
}

impl PartialEq for NormalizedString {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for NormalizedString {}

impl Hash for NormalizedString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl Borrow<str> for NormalizedString {
    fn borrow(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for NormalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedString")
            .field("original", &self.original)
            .field("text", &self.text)
            .finish()
    }
}

impl fmt::Display for NormalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_collapses_punctuation() {
        assert_eq!(normalize("this..is.a.test.").as_str(), "this is a test");
    }

    #[test]
    fn test_leading_and_trailing_runs_dropped() {
        let s = normalize("  --Hello, World!!  ");
        assert_eq!(s.as_str(), "hello world");
        assert_eq!(s.original_offset(0), 4);
        // Final slot is one past the last content character.
        assert_eq!(s.original_offset(s.len()), 16);
    }

    #[test]
    fn test_ampersand_expands() {
        let s = normalize("Law&Order");
        assert_eq!(s.as_str(), "lawandorder");
        assert_eq!(&s.positions()[3..6], &[3, 3, 3]);
        assert_eq!(s.original_offset(6), 4);
    }

    #[test]
    fn test_spaced_ampersand() {
        assert_eq!(normalize("Tom & Jerry").as_str(), "tom and jerry");
    }

    #[test]
    fn test_no_content() {
        let s = normalize(" .- ");
        assert!(s.is_empty());
        assert_eq!(s.positions(), &[0]);
        assert_eq!(normalize("").positions(), &[0]);
    }

    #[test]
    fn test_unicode_letters() {
        let s = normalize("Café_Été");
        assert_eq!(s.as_str(), "café été");
        let span = s.original_span(6..s.len());
        assert_eq!(&s.original()[span], "Été");
    }

    #[test]
    fn test_idempotent() {
        for input in ["The.Show - 1x01 [720p]", "A&B", "  ", "ÀÉÎ õü", "x__y..z"] {
            let once = normalize(input);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice);
            assert_eq!(once.as_str(), twice.as_str());
        }
    }

    #[test]
    fn test_positions_point_at_source_characters() {
        let input = "Some.Show_S01E02-Title (2010)";
        let s = normalize(input);
        assert_eq!(s.positions().len(), s.len() + 1);
        for (i, ch) in s.as_str().char_indices() {
            if ch == ' ' {
                continue;
            }
            let orig = s.original_offset(i);
            let source = input[orig..].chars().next().unwrap();
            assert!(source.is_alphanumeric());
            assert!(source.to_lowercase().any(|c| c == ch));
        }
        for pair in s.positions().windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_equality_ignores_original() {
        let a = normalize("Doctor Who");
        let b = normalize("doctor.who!");
        assert_eq!(a, b);
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert!(set.contains("doctor who"));
    }

    #[test]
    fn test_word_boundaries() {
        let s = normalize("ab cd");
        assert!(s.is_word_boundary(0));
        assert!(s.is_word_boundary(2));
        assert!(s.is_word_boundary(3));
        assert!(!s.is_word_boundary(1));
        assert!(s.is_word_boundary(5));
        assert_eq!(s.skip_space(2), 3);
        assert_eq!(s.skip_space(1), 1);
        assert!(s.is_exhausted_at(5));
        assert!(!s.is_exhausted_at(2));
    }
}
