//! tvsort - television episode recognition for media libraries
//!
//! This crate ties the matcher to configuration files and logging:
//!
//! ```
//! use tvsort::config::Config;
//! use tvsort_common::{EpisodeId, SeriesId};
//! use tvsort_matcher::InMemoryCatalogue;
//!
//! let show = SeriesId::new("show");
//! let mut catalogue = InMemoryCatalogue::new();
//! catalogue
//!     .add_series(show.clone(), "Example Show")
//!     .add_episode(&show, EpisodeId::new("e1"), 1, 1, None);
//!
//! let keywords = catalogue.clone();
//! let shared = tvsort::build_shared(catalogue, &keywords, &Config::default()).unwrap();
//! let found = shared.process("Example.Show.S01E01.mkv").unwrap().unwrap();
//! assert_eq!(found.episode.as_str(), "e1");
//! ```

pub mod config;
pub mod logging;
pub mod shared;

pub use shared::SharedProcessor;
pub use tvsort_common::{EpisodeId, Error, SeriesId};
pub use tvsort_matcher::{FilenameMatch, FilenameProcessor, InMemoryCatalogue, MatcherConfig};

use anyhow::{Context, Result};
use tvsort_matcher::{KeywordSource, SeriesDataSource};

/// Build a processor from loaded configuration
pub fn build_processor<D, K>(source: D, keywords: &K, config: &config::Config) -> Result<FilenameProcessor<D>>
where
    D: SeriesDataSource,
    K: KeywordSource + ?Sized,
{
    FilenameProcessor::new(source, keywords, config.matcher.clone())
        .context("Failed to build filename processor")
}

/// Build a processor from loaded configuration, ready to share between threads
pub fn build_shared<D, K>(source: D, keywords: &K, config: &config::Config) -> Result<SharedProcessor<D>>
where
    D: SeriesDataSource,
    K: KeywordSource + ?Sized,
{
    build_processor(source, keywords, config).map(SharedProcessor::new)
}
