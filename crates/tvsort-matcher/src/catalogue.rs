//! An in-memory catalogue.
//!
//! Embedders whose series data already sits in memory (or is loaded once at
//! start-up) can fill an [`InMemoryCatalogue`] and hand it to the resolver
//! as both its data source and its keyword source.

use std::collections::HashMap;

use tvsort_common::{EpisodeId, Error, Result, SeriesId};

use crate::source::{Item, KeywordSource, SeriesDataSource, SeriesDetails};

/// Series, episodes and keywords held in plain collections.
///
/// # Examples
///
/// ```
/// use tvsort_matcher::{InMemoryCatalogue, SeriesDataSource};
/// use tvsort_common::{EpisodeId, SeriesId};
///
/// let show = SeriesId::new("show");
/// let mut catalogue = InMemoryCatalogue::new();
/// catalogue
///     .add_series(show.clone(), "Example Show")
///     .add_episode(&show, EpisodeId::new("e1"), 1, 1, Some(1))
///     .add_title(&show, EpisodeId::new("e1"), "Named Episode");
///
/// let details = catalogue.series_details(&show).unwrap();
/// assert_eq!(details.episode_for("1x1"), Some(&EpisodeId::new("e1")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogue {
    titles: Vec<Item<SeriesId>>,
    descriptions: Vec<Item<SeriesId>>,
    details: HashMap<SeriesId, SeriesDetails<EpisodeId>>,
    keywords: Vec<String>,
}

impl InMemoryCatalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series under its title.
    pub fn add_series(&mut self, series: SeriesId, title: impl Into<String>) -> &mut Self {
        self.titles.push(Item::new(title, series.clone()));
        self.details.entry(series).or_default();
        self
    }

    /// Add an alternative name for a series.
    pub fn add_description(&mut self, series: &SeriesId, description: impl Into<String>) -> &mut Self {
        self.descriptions.push(Item::new(description, series.clone()));
        self
    }

    /// Register an episode's numbering.
    pub fn add_episode(
        &mut self,
        series: &SeriesId,
        episode: EpisodeId,
        season: u32,
        number: u32,
        absolute: Option<u32>,
    ) -> &mut Self {
        let details = self.details.entry(series.clone()).or_default();
        details.insert_seasonal(season, number, episode.clone());
        if let Some(absolute) = absolute {
            details.insert_absolute(absolute, episode);
        }
        self
    }

    /// Add an episode title.
    pub fn add_title(&mut self, series: &SeriesId, episode: EpisodeId, title: impl Into<String>) -> &mut Self {
        self.details
            .entry(series.clone())
            .or_default()
            .push_title(episode, title, true);
        self
    }

    /// Add an episode description.
    pub fn add_episode_description(
        &mut self,
        series: &SeriesId,
        episode: EpisodeId,
        description: impl Into<String>,
    ) -> &mut Self {
        self.details
            .entry(series.clone())
            .or_default()
            .push_title(episode, description, false);
        self
    }

    /// Add a noise keyword.
    pub fn add_keyword(&mut self, keyword: impl Into<String>) -> &mut Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Number of series with details.
    pub fn series_count(&self) -> usize {
        self.details.len()
    }
}

impl SeriesDataSource for InMemoryCatalogue {
    type SeriesId = SeriesId;
    type EpisodeId = EpisodeId;

    fn series_titles(&self) -> Result<Vec<Item<SeriesId>>> {
        Ok(self.titles.clone())
    }

    fn series_descriptions(&self) -> Result<Vec<Item<SeriesId>>> {
        Ok(self.descriptions.clone())
    }

    fn series_details(&self, series: &SeriesId) -> Result<SeriesDetails<EpisodeId>> {
        self.details
            .get(series)
            .cloned()
            .ok_or_else(|| Error::data_unavailable(series))
    }
}

impl KeywordSource for InMemoryCatalogue {
    fn keywords(&self) -> Result<Vec<String>> {
        Ok(self.keywords.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_series_is_data_unavailable() {
        let catalogue = InMemoryCatalogue::new();
        let err = catalogue
            .series_details(&SeriesId::new("missing"))
            .unwrap_err();
        assert!(err.is_data_unavailable());
        assert_eq!(err.to_string(), "Series data unavailable: missing");
    }

    #[test]
    fn test_titles_and_descriptions() {
        let show = SeriesId::new("s");
        let mut catalogue = InMemoryCatalogue::new();
        catalogue
            .add_series(show.clone(), "Show")
            .add_description(&show, "The Show (2004)")
            .add_episode_description(&show, EpisodeId::new("e"), "In which things happen")
            .add_keyword("HDTV");

        assert_eq!(catalogue.series_titles().unwrap().len(), 1);
        assert_eq!(catalogue.series_descriptions().unwrap()[0].label, "The Show (2004)");
        let details = catalogue.series_details(&show).unwrap();
        assert!(!details.titles[0].primary);
        assert_eq!(catalogue.keywords().unwrap(), vec!["HDTV".to_string()]);
        assert_eq!(catalogue.series_count(), 1);
    }
}
