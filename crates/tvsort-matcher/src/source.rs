//! Interfaces to the catalogue the engine matches against.
//!
//! The engine does not store series data. A [`SeriesDataSource`] lists
//! series labels up front and hands out per-series details on demand; a
//! [`KeywordSource`] lists noise words. Identifiers stay opaque throughout.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::Arc;

use tvsort_common::Result;

use crate::numbering::{absolute_key, seasonal_key};

/// A human readable label bound to a series.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<I> {
    /// Title or description text.
    pub label: String,
    /// The series it names.
    pub id: I,
}

impl<I> Item<I> {
    /// Create a new item.
    pub fn new(label: impl Into<String>, id: I) -> Self {
        Self {
            label: label.into(),
            id,
        }
    }
}

/// A title or description of one episode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeTitleEntry<E> {
    /// The episode.
    pub episode: E,
    /// Title or description text.
    pub text: String,
    /// `true` for the episode's title, `false` for a description.
    pub primary: bool,
}

/// Everything the engine needs to know about one series.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesDetails<E: Eq + Hash> {
    /// Episode lookup by positional key (see [`absolute_key`] and
    /// [`seasonal_key`]).
    pub numbers: HashMap<String, E>,
    /// Titles and descriptions, in catalogue order.
    pub titles: Vec<EpisodeTitleEntry<E>>,
}

impl<E: Eq + Hash> Default for SeriesDetails<E> {
    fn default() -> Self {
        Self {
            numbers: HashMap::new(),
            titles: Vec::new(),
        }
    }
}

impl<E: Clone + Eq + Hash> SeriesDetails<E> {
    /// Create empty details.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an episode under its absolute number.
    pub fn insert_absolute(&mut self, number: u32, episode: E) -> &mut Self {
        self.numbers.insert(absolute_key(number), episode);
        self
    }

    /// Register an episode under its season and episode number.
    pub fn insert_seasonal(&mut self, season: u32, number: u32, episode: E) -> &mut Self {
        self.numbers.insert(seasonal_key(season, number), episode);
        self
    }

    /// Add a title (`primary = true`) or description for an episode.
    pub fn push_title(&mut self, episode: E, text: impl Into<String>, primary: bool) -> &mut Self {
        self.titles.push(EpisodeTitleEntry {
            episode,
            text: text.into(),
            primary,
        });
        self
    }

    /// Look up an episode by positional key.
    pub fn episode_for(&self, key: &str) -> Option<&E> {
        self.numbers.get(key)
    }
}

/// Supplies series labels and details.
pub trait SeriesDataSource {
    /// Series handle.
    type SeriesId: Clone + Eq + Hash + Debug + Display;
    /// Episode handle.
    type EpisodeId: Clone + Eq + Hash + Debug;

    /// All series titles.
    fn series_titles(&self) -> Result<Vec<Item<Self::SeriesId>>>;

    /// All series descriptions (alternative names).
    fn series_descriptions(&self) -> Result<Vec<Item<Self::SeriesId>>>;

    /// Numbering and titles for one series.
    ///
    /// Fails with [`tvsort_common::Error::DataUnavailable`] for an unknown
    /// series.
    fn series_details(&self, series: &Self::SeriesId) -> Result<SeriesDetails<Self::EpisodeId>>;
}

/// Supplies noise words that may trail a match.
pub trait KeywordSource {
    /// All keywords.
    fn keywords(&self) -> Result<Vec<String>>;
}

impl<T: SeriesDataSource + ?Sized> SeriesDataSource for &T {
    type SeriesId = T::SeriesId;
    type EpisodeId = T::EpisodeId;

    fn series_titles(&self) -> Result<Vec<Item<Self::SeriesId>>> {
        (**self).series_titles()
    }

    fn series_descriptions(&self) -> Result<Vec<Item<Self::SeriesId>>> {
        (**self).series_descriptions()
    }

    fn series_details(&self, series: &Self::SeriesId) -> Result<SeriesDetails<Self::EpisodeId>> {
        (**self).series_details(series)
    }
}

impl<T: SeriesDataSource + ?Sized> SeriesDataSource for Arc<T> {
    type SeriesId = T::SeriesId;
    type EpisodeId = T::EpisodeId;

    fn series_titles(&self) -> Result<Vec<Item<Self::SeriesId>>> {
        (**self).series_titles()
    }

    fn series_descriptions(&self) -> Result<Vec<Item<Self::SeriesId>>> {
        (**self).series_descriptions()
    }

    fn series_details(&self, series: &Self::SeriesId) -> Result<SeriesDetails<Self::EpisodeId>> {
        (**self).series_details(series)
    }
}

impl<T: KeywordSource + ?Sized> KeywordSource for &T {
    fn keywords(&self) -> Result<Vec<String>> {
        (**self).keywords()
    }
}

impl<T: KeywordSource + ?Sized> KeywordSource for Arc<T> {
    fn keywords(&self) -> Result<Vec<String>> {
        (**self).keywords()
    }
}

impl KeywordSource for [String] {
    fn keywords(&self) -> Result<Vec<String>> {
        Ok(self.to_vec())
    }
}

impl KeywordSource for Vec<String> {
    fn keywords(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_keys() {
        let mut details = SeriesDetails::new();
        details
            .insert_absolute(12, "e12")
            .insert_seasonal(2, 1, "e12")
            .push_title("e12", "The Return", true);

        assert_eq!(details.episode_for("12"), Some(&"e12"));
        assert_eq!(details.episode_for("2x1"), Some(&"e12"));
        assert_eq!(details.episode_for("2x01"), None);
        assert_eq!(details.titles.len(), 1);
        assert!(details.titles[0].primary);
    }

    #[test]
    fn test_keyword_vec_source() {
        let words = vec!["720p".to_string(), "x264".to_string()];
        assert_eq!(words.keywords().unwrap().len(), 2);
        assert_eq!(words.as_slice().keywords().unwrap()[1], "x264");
    }
}
