//! Recognising episodes in file paths.
//!
//! [`FilenameProcessor`] anchors on a series name, then explains the rest of
//! the name with numbering codes, an air date, an episode title and trailing
//! keywords. Recognition either yields an episode, flagged exact when the
//! evidence agrees, or nothing. Contradictory numbering with no title to
//! settle it yields nothing.

use std::collections::HashSet;
use std::fmt;

use tvsort_common::paths::{split_path, strip_extension};
use tvsort_common::Result;

use crate::cache::DetailsCache;
use crate::config::MatcherConfig;
use crate::keywords::{KeywordRun, KeywordSet};
use crate::matching::{FilenameMatch, Matching, TitleMatching};
use crate::normalize::NormalizedString;
use crate::numbering::{leading_code, leading_date, Grammar, GRAMMARS};
use crate::series::SeriesIndex;
use crate::source::{KeywordSource, SeriesDataSource};
use crate::weight::Thresholds;

type SeriesOf<D> = <D as SeriesDataSource>::SeriesId;
type EpisodeOf<D> = <D as SeriesDataSource>::EpisodeId;

/// Recognises episodes in file names against a series catalogue.
///
/// Series labels and keywords are read once, at construction. Episode
/// details are fetched per series on first use and cached, which is why
/// recognition takes `&mut self`. Wrap the processor in a lock to share it
/// between threads.
///
/// # Examples
///
/// ```
/// use tvsort_common::{EpisodeId, SeriesId};
/// use tvsort_matcher::{FilenameProcessor, InMemoryCatalogue, MatcherConfig};
///
/// let show = SeriesId::new("example-show");
/// let mut catalogue = InMemoryCatalogue::new();
/// catalogue
///     .add_series(show.clone(), "Example Show")
///     .add_episode(&show, EpisodeId::new("e1"), 1, 1, Some(1))
///     .add_title(&show, EpisodeId::new("e1"), "Named Episode");
///
/// let keywords: Vec<String> = Vec::new();
/// let mut processor =
///     FilenameProcessor::new(catalogue, &keywords, MatcherConfig::default()).unwrap();
///
/// let found = processor
///     .process("/tv/Example Show - 1 - Named Episode.mov")
///     .unwrap()
///     .unwrap();
/// assert_eq!(found.episode.as_str(), "e1");
/// assert!(found.exact);
/// ```
pub struct FilenameProcessor<D: SeriesDataSource> {
    source: D,
    config: MatcherConfig,
    thresholds: Thresholds,
    series: SeriesIndex<D::SeriesId>,
    keywords: KeywordSet,
    grammars: Vec<Grammar>,
    cache: DetailsCache<D::SeriesId, D::EpisodeId>,
}

impl<D: SeriesDataSource> fmt::Debug for FilenameProcessor<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilenameProcessor")
            .field("config", &self.config)
            .field("series_labels", &self.series.len())
            .field("keywords", &self.keywords.len())
            .field("grammars", &self.grammars)
            .field("cached_series", &self.cache.len())
            .finish()
    }
}

impl<D: SeriesDataSource> FilenameProcessor<D> {
    /// Build a processor over `source`, reading its series labels and the
    /// keywords of `keywords`.
    pub fn new<K>(source: D, keywords: &K, config: MatcherConfig) -> Result<Self>
    where
        K: KeywordSource + ?Sized,
    {
        config.validate()?;
        let series = SeriesIndex::new(source.series_titles()?, source.series_descriptions()?);
        let keywords = KeywordSet::new(keywords.keywords()?);
        tracing::debug!(
            series_labels = series.len(),
            keywords = keywords.len(),
            "filename processor ready"
        );

        Ok(Self {
            thresholds: config.thresholds(),
            source,
            config,
            series,
            keywords,
            grammars: GRAMMARS.to_vec(),
            cache: DetailsCache::new(),
        })
    }

    /// Replace the numbering grammars. They are tried in the order given.
    pub fn with_grammars(mut self, grammars: impl IntoIterator<Item = Grammar>) -> Self {
        self.grammars = grammars.into_iter().collect();
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// The data source.
    pub fn source(&self) -> &D {
        &self.source
    }

    /// Number of series whose details have been fetched.
    pub fn cached_series(&self) -> usize {
        self.cache.len()
    }

    /// Recognise the episode a path refers to.
    ///
    /// A directory named exactly like a series sets the series context for
    /// file names that do not name one; the innermost such directory wins.
    /// Ignored spans are reported as byte ranges of `path`.
    pub fn process(&mut self, path: &str) -> Result<Option<FilenameMatch<EpisodeOf<D>>>> {
        let parts = split_path(path);
        let directory_series = parts.directories.iter().rev().find_map(|dir| {
            self.series
                .match_whole(&NormalizedString::new(dir.text))
                .and_then(|m| m.id)
        });

        let name = strip_extension(parts.file_name.text, self.config.max_extension_len);
        tracing::debug!(path, name, directory_series = ?directory_series, "processing path");

        let found = self.process_name(name, directory_series.as_ref())?;
        Ok(found.map(|m| m.shifted(parts.file_name.start)))
    }

    /// Recognise the episode a bare file name refers to.
    ///
    /// Series names may start after a little leading chaff, which is then
    /// reported as ignored. Every series occurrence is tried in turn; when
    /// the name mentions no series at all, `directory_series` is assumed.
    pub fn process_name(
        &mut self,
        name: &str,
        directory_series: Option<&SeriesOf<D>>,
    ) -> Result<Option<FilenameMatch<EpisodeOf<D>>>> {
        let text = NormalizedString::new(name);
        let occurrences = self.series.occurrences(&text, self.config.max_chaff_prefix);

        if occurrences.is_empty() {
            return match directory_series {
                Some(series) => {
                    tracing::debug!(%series, name, "no series in name, assuming directory series");
                    self.process_from_series(series, &text, 0, false)
                }
                None => {
                    tracing::debug!(name, "no series found");
                    Ok(None)
                }
            };
        }

        for occurrence in occurrences {
            let Some(series) = occurrence.matching.id else {
                continue;
            };
            let inconsistent = directory_series.is_some_and(|dir| *dir != series);
            tracing::debug!(%series, start = occurrence.start, inconsistent, "trying series");

            let Some(mut found) =
                self.process_from_series(&series, &text, occurrence.end, inconsistent)?
            else {
                continue;
            };
            if occurrence.start > 0 {
                let chaff = text.original_offset(0)..occurrence.matching.start;
                let chaff_text = name[chaff.clone()].to_string();
                found.ignored.insert(0, Matching::unresolved(chaff, chaff_text));
            }
            return Ok(Some(found));
        }

        tracing::debug!(name, "no series occurrence explained the name");
        Ok(None)
    }

    /// Explain `text` from normalised offset `from` as an episode of
    /// `series`.
    fn process_from_series(
        &mut self,
        series: &SeriesOf<D>,
        text: &NormalizedString,
        from: usize,
        inconsistent: bool,
    ) -> Result<Option<FilenameMatch<EpisodeOf<D>>>> {
        let source = &self.source;
        let details = self.cache.get_or_fetch(series, |s| source.series_details(s))?;

        let haystack = text.as_str();
        let years = self.config.date_years();
        let mut pos = text.skip_space(from);
        let mut ignored = Vec::new();

        // Numbering codes, stopping short of an air date so the bare number
        // grammar cannot claim its digits.
        let mut claimed = false;
        let mut guesses = HashSet::new();
        while leading_date(&haystack[pos..], years.clone()).is_none() {
            let Some(code) = leading_code(&haystack[pos..], &self.grammars) else {
                break;
            };
            if code.len == 0 {
                break;
            }
            for number in &code.numbers {
                let episode = number.key().and_then(|key| details.episode_for(&key));
                tracing::debug!(
                    grammar = code.grammar,
                    %number,
                    known = episode.is_some(),
                    "numbering code"
                );
                if let Some(episode) = episode {
                    guesses.insert(episode.clone());
                }
            }
            claimed = true;
            pos = text.skip_space(pos + code.len);
        }

        if let Some((date, len)) = leading_date(&haystack[pos..], years) {
            tracing::debug!(%date, "air date");
            ignored.push(Matching::unresolved(
                text.original_span(pos..pos + len),
                date.to_string(),
            ));
            pos = text.skip_space(pos + len);
        }

        let expected = (!guesses.is_empty()).then_some(&guesses);
        let candidates = details.rank(text, pos, &self.thresholds, expected);
        tracing::debug!(
            candidates = candidates.len(),
            guesses = guesses.len(),
            claimed,
            "ranked episode titles"
        );

        // A title that explains everything up to trailing keywords.
        for candidate in &candidates {
            let Some(episode) = candidate.title.episode() else {
                continue;
            };
            let keywords = self.keywords.scan(text, candidate.end);
            let end = keywords.as_ref().map_or(candidate.end, |run| run.end);
            if !text.is_exhausted_at(end) {
                continue;
            }

            let numbers_agree = !claimed || guesses.contains(episode);
            let exact = candidate.title.exact && numbers_agree && !inconsistent;
            tracing::debug!(title = %candidate.title.text, exact, "title explains the name");
            ignored.extend(keywords.map(|run| run.to_matching(text)));
            return Ok(Some(FilenameMatch {
                episode: episode.clone(),
                exact,
                ignored,
            }));
        }

        // The best title, with unexplained text left over.
        if let Some(best) = candidates.first() {
            return Ok(self.accept_best_title(&best.title, best.end, text, &guesses, ignored));
        }

        // Numbering alone.
        if guesses.len() != 1 {
            tracing::debug!(guesses = guesses.len(), "no title and no single episode number");
            return Ok(None);
        }
        let Some(episode) = guesses.into_iter().next() else {
            return Ok(None);
        };

        let keywords = self.keywords.scan(text, pos);
        let end = keywords.as_ref().map_or(pos, |run| run.end);
        ignored.extend(keywords.map(|run| run.to_matching(text)));
        if text.is_exhausted_at(end) {
            return Ok(Some(FilenameMatch {
                episode,
                exact: !inconsistent,
                ignored,
            }));
        }

        let rest = text.skip_space(end);
        let leftover = haystack[rest..].chars().count();
        if leftover > self.config.max_ignored_leftover {
            tracing::debug!(leftover, "too much unexplained text after the episode number");
            return Ok(None);
        }
        ignored.push(leftover_matching(text, rest));
        Ok(Some(FilenameMatch {
            episode,
            exact: false,
            ignored,
        }))
    }

    fn accept_best_title(
        &self,
        title: &TitleMatching<EpisodeOf<D>>,
        end: usize,
        text: &NormalizedString,
        guesses: &HashSet<EpisodeOf<D>>,
        mut ignored: Vec<Matching<EpisodeOf<D>>>,
    ) -> Option<FilenameMatch<EpisodeOf<D>>> {
        let episode = title.episode()?;
        let agrees = title.exact || guesses.is_empty() || guesses.contains(episode);
        if !agrees {
            tracing::debug!(title = %title.text, "best title contradicts the episode number");
            return None;
        }

        tracing::debug!(title = %title.text, "best title leaves text unexplained");
        ignored.push(leftover_matching(text, text.skip_space(end)));
        Some(FilenameMatch {
            episode: episode.clone(),
            exact: false,
            ignored,
        })
    }

    /// The longest series label that starts `text`.
    pub fn match_series(&self, text: &str) -> Option<Matching<SeriesOf<D>>> {
        self.series.match_series(&NormalizedString::new(text))
    }

    /// The earliest word-delimited series label within the chaff allowance.
    pub fn match_series_allowing_prefix(&self, text: &str) -> Option<Matching<SeriesOf<D>>> {
        self.series
            .match_series_allowing_prefix(&NormalizedString::new(text), self.config.max_chaff_prefix)
    }

    /// Episode titles of `series` resembling the start of `text`, best first.
    ///
    /// Episodes in `expected` rank above equally exact ones outside it.
    pub fn closest_episodes(
        &mut self,
        series: &SeriesOf<D>,
        text: &str,
        expected: Option<&HashSet<EpisodeOf<D>>>,
    ) -> Result<Vec<TitleMatching<EpisodeOf<D>>>> {
        let source = &self.source;
        let details = self.cache.get_or_fetch(series, |s| source.series_details(s))?;
        Ok(details.closest_episodes(text, &self.thresholds, expected))
    }

    /// Keywords at the start of `text`.
    pub fn match_keywords<I>(&self, text: &str) -> Option<Matching<I>> {
        self.keywords.match_keywords(text)
    }

    /// The raw keyword run at the start of `text`, in normalised offsets.
    pub fn keyword_run(&self, text: &NormalizedString) -> Option<KeywordRun> {
        self.keywords.scan(text, 0)
    }
}

fn leftover_matching<I>(text: &NormalizedString, from: usize) -> Matching<I> {
    let span = text.original_span(from..text.len());
    let leftover = text.original()[span.clone()].to_string();
    Matching::unresolved(span, leftover)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::InMemoryCatalogue;
    use tvsort_common::{EpisodeId, SeriesId};

    fn processor() -> FilenameProcessor<InMemoryCatalogue> {
        let show = SeriesId::new("show");
        let mut catalogue = InMemoryCatalogue::new();
        catalogue
            .add_series(show.clone(), "Example Show")
            .add_episode(&show, EpisodeId::new("e1"), 1, 1, Some(1))
            .add_title(&show, EpisodeId::new("e1"), "Named Episode")
            .add_episode(&show, EpisodeId::new("e2"), 1, 2, Some(2))
            .add_title(&show, EpisodeId::new("e2"), "Another One");
        let keywords = vec!["HDTV".to_string(), "x264".to_string()];
        FilenameProcessor::new(catalogue, &keywords, MatcherConfig::default()).unwrap()
    }

    fn id(found: &FilenameMatch<EpisodeId>) -> &str {
        found.episode.as_str()
    }

    #[test]
    fn test_number_and_title_agree() {
        let mut p = processor();
        let found = p.process_name("Example Show 1x02 Another One", None).unwrap().unwrap();
        assert_eq!(id(&found), "e2");
        assert!(found.exact);
        assert!(found.ignored.is_empty());
    }

    #[test]
    fn test_number_only_with_keywords() {
        let mut p = processor();
        let found = p.process_name("Example.Show.S01E01.HDTV.x264", None).unwrap().unwrap();
        assert_eq!(id(&found), "e1");
        assert!(found.exact);
        assert_eq!(found.ignored.len(), 1);
        assert_eq!(found.ignored[0].text, "hdtv x264");
    }

    #[test]
    fn test_number_only_with_short_leftover() {
        let mut p = processor();
        let name = "Example Show 1x01 proper";
        let found = p.process_name(name, None).unwrap().unwrap();
        assert_eq!(id(&found), "e1");
        assert!(!found.exact);
        assert_eq!(found.ignored[0].span(), 18..24);
    }

    #[test]
    fn test_number_only_with_long_leftover_fails() {
        let mut p = processor();
        let found = p
            .process_name("Example Show 1x01 something entirely different", None)
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_unknown_name() {
        let mut p = processor();
        assert!(p.process_name("holiday photos 2019", None).unwrap().is_none());
        assert_eq!(p.cached_series(), 0);
    }

    #[test]
    fn test_custom_grammars() {
        let mut p = processor().with_grammars(
            GRAMMARS.iter().copied().filter(|g| g.name != "bare"),
        );
        assert!(p.process_name("Example Show 2", None).unwrap().is_none());

        let mut p = processor();
        assert_eq!(id(&p.process_name("Example Show 2", None).unwrap().unwrap()), "e2");
    }

    #[test]
    fn test_primitives() {
        let mut p = processor();
        let series = p.match_series("Example Show - 1x01").unwrap();
        assert_eq!(series.span(), 0..12);
        assert!(p.match_series("The Example Show").is_none());
        assert!(p.match_series_allowing_prefix("Watch Example Show").is_some());

        let show = SeriesId::new("show");
        let titles = p.closest_episodes(&show, "Another Oen", None).unwrap();
        assert_eq!(titles[0].episode().map(EpisodeId::as_str), Some("e2"));
        assert_eq!(p.cached_series(), 1);

        let keywords = p.match_keywords::<()>("HDTV x264 rest").unwrap();
        assert_eq!(keywords.span(), 0..9);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = MatcherConfig::builder().exact_error_divisor(-1.0).build();
        let keywords: Vec<String> = Vec::new();
        let err = FilenameProcessor::new(InMemoryCatalogue::new(), &keywords, config).unwrap_err();
        assert!(matches!(err, tvsort_common::Error::Validation(_)));
    }
}
