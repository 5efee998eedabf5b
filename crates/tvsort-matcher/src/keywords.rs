//! Stripping known noise words after a match.
//!
//! Release tags, codec names and similar keywords often trail a title or
//! episode code. When the only text left after a match is a run of known
//! keywords, the match explains the whole name.

use std::collections::HashSet;

use crate::matching::Matching;
use crate::normalize::NormalizedString;

/// A run of consecutive keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRun {
    /// Normalised offset where the first keyword starts.
    pub start: usize,
    /// Normalised offset just past the last keyword.
    pub end: usize,
    /// The recognised keywords joined by single spaces.
    pub text: String,
}

impl KeywordRun {
    /// Report the run against the original text it was found in.
    pub fn to_matching<I>(&self, source: &NormalizedString) -> Matching<I> {
        let span = source.original_span(self.start..self.end);
        Matching::new(span.start, span.end, self.text.clone(), None)
    }
}

/// The keyword vocabulary, longest keyword first.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    keywords: Vec<NormalizedString>,
}

impl KeywordSet {
    /// Build a set from raw keywords; duplicates after normalisation and
    /// keywords with no content are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut keywords: Vec<NormalizedString> = keywords
            .into_iter()
            .map(|k| NormalizedString::new(k.as_ref()))
            .filter(|k| !k.is_empty() && seen.insert(k.as_str().to_string()))
            .collect();
        keywords.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.as_str().cmp(b.as_str())));
        Self { keywords }
    }

    /// Number of distinct keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Consume keywords from `from` onwards, one per step, until none fits.
    ///
    /// Each keyword must end on a word boundary. Returns `None` when not
    /// even one keyword matched.
    pub fn scan(&self, text: &NormalizedString, from: usize) -> Option<KeywordRun> {
        let haystack = text.as_str();
        let start = text.skip_space(from);
        let mut pos = start;
        let mut found: Vec<&str> = Vec::new();

        'outer: loop {
            let next = text.skip_space(pos);
            let rest = &haystack[next.min(haystack.len())..];
            for keyword in &self.keywords {
                let k = keyword.as_str();
                if rest.starts_with(k) && text.is_word_boundary(next + k.len()) {
                    found.push(k);
                    pos = next + k.len();
                    continue 'outer;
                }
            }
            break;
        }

        if found.is_empty() {
            return None;
        }
        Some(KeywordRun {
            start,
            end: pos,
            text: found.join(" "),
        })
    }

    /// Match keywords at the start of a raw string.
    ///
    /// # Examples
    ///
    /// ```
    /// use tvsort_matcher::KeywordSet;
    ///
    /// let keywords = KeywordSet::new(["720p", "HDTV", "x264"]);
    /// let m = keywords.match_keywords::<()>(" [HDTV.x264] extra").unwrap();
    /// assert_eq!(m.text, "hdtv x264");
    /// assert_eq!(m.span(), 2..11);
    /// ```
    pub fn match_keywords<I>(&self, text: &str) -> Option<Matching<I>> {
        let normalized = NormalizedString::new(text);
        self.scan(&normalized, 0)
            .map(|run| run.to_matching(&normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_keywords() {
        let set = KeywordSet::new(["hdtv", "xvid", "lol"]);
        let text = NormalizedString::new("title HDTV XviD-LOL");
        let run = set.scan(&text, 5).unwrap();
        assert_eq!(run.text, "hdtv xvid lol");
        assert_eq!(run.end, text.len());
        assert!(text.is_exhausted_at(run.end));
    }

    #[test]
    fn test_longest_keyword_first() {
        let set = KeywordSet::new(["web", "web dl"]);
        let text = NormalizedString::new("WEB-DL");
        let run = set.scan(&text, 0).unwrap();
        assert_eq!(run.text, "web dl");
    }

    #[test]
    fn test_requires_word_boundary() {
        let set = KeywordSet::new(["hd"]);
        let text = NormalizedString::new("hdtv");
        assert!(set.scan(&text, 0).is_none());
    }

    #[test]
    fn test_stops_at_unknown_word() {
        let set = KeywordSet::new(["proper"]);
        let text = NormalizedString::new("PROPER something PROPER");
        let run = set.scan(&text, 0).unwrap();
        assert_eq!(run.text, "proper");
        assert_eq!(run.end, 6);
        assert!(!text.is_exhausted_at(run.end));
    }

    #[test]
    fn test_dedup_and_empty() {
        let set = KeywordSet::new(["HDTV", "hdtv", "h.d.t.v", "..."]);
        assert_eq!(set.len(), 2);
        assert!(KeywordSet::new(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_match_keywords_reports_original_span() {
        let set = KeywordSet::new(["repack"]);
        let m: Matching<()> = set.match_keywords("  .REPACK!").unwrap();
        assert_eq!(m.span(), 3..9);
        assert_eq!(m.text, "repack");
        assert!(set.match_keywords::<()>("nothing here").is_none());
    }
}
