//! # tvsort-matcher
//!
//! Recognises television episodes in arbitrary file names.
//!
//! Given a catalogue of series and their episodes, the matcher explains a
//! name such as `Example Show - 1x02 - Named Episode [HDTV].mkv` as a
//! series name, an episode code, an episode title and noise, then reports
//! the episode along with how sure it is.
//!
//! ## Quick Start
//!
//! ```
//! use tvsort_common::{EpisodeId, SeriesId};
//! use tvsort_matcher::{FilenameProcessor, InMemoryCatalogue, MatcherConfig};
//!
//! let show = SeriesId::new("example");
//! let mut catalogue = InMemoryCatalogue::new();
//! catalogue
//!     .add_series(show.clone(), "Example Show")
//!     .add_episode(&show, EpisodeId::new("s1e2"), 1, 2, None)
//!     .add_title(&show, EpisodeId::new("s1e2"), "Named Episode")
//!     .add_keyword("HDTV");
//!
//! let keywords = catalogue.clone();
//! let mut processor =
//!     FilenameProcessor::new(catalogue, &keywords, MatcherConfig::default()).unwrap();
//!
//! let found = processor
//!     .process("Example Show - 1x02 - Named Episode [HDTV].mkv")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(found.episode.as_str(), "s1e2");
//! assert!(found.exact);
//! ```
//!
//! ## Building blocks
//!
//! The pieces the processor is made of are public for callers that need
//! partial recognition, such as a UI confirming a guess:
//! [`NormalizedString`], [`distance::levenshtein`], [`weight::Thresholds`],
//! [`numbering::GRAMMARS`], [`KeywordSet`] and [`bktree::BkTree`].

pub mod bktree;
pub mod cache;
pub mod catalogue;
pub mod config;
pub mod distance;
pub mod episodes;
pub mod keywords;
pub mod matching;
pub mod normalize;
pub mod numbering;
pub mod resolver;
pub mod series;
pub mod source;
pub mod weight;

// Re-export main types for convenience
pub use catalogue::InMemoryCatalogue;
pub use config::{MatcherConfig, MatcherConfigBuilder};
pub use keywords::KeywordSet;
pub use matching::{by_priority, FilenameMatch, Matching, TitleMatching};
pub use normalize::{normalize, NormalizedString};
pub use numbering::{EpisodeNumber, Grammar, GRAMMARS};
pub use resolver::FilenameProcessor;
pub use source::{EpisodeTitleEntry, Item, KeywordSource, SeriesDataSource, SeriesDetails};
