//! Tvsort-Common: Shared types and utilities.
//!
//! This crate provides common functionality used across tvsort:
//!
//! - **Typed IDs**: String-backed identifiers for series and episodes
//! - **Path Utilities**: Splitting a path into directory segments and a file name
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use tvsort_common::{EpisodeId, Error, Result, SeriesId};
//! use tvsort_common::paths::strip_extension;
//!
//! let series = SeriesId::new("urn:series:example-show");
//! let episode = EpisodeId::new("urn:episode:example-show:1x1");
//! assert_eq!(series.as_str(), "urn:series:example-show");
//! assert_eq!(episode.to_string(), "urn:episode:example-show:1x1");
//!
//! assert_eq!(strip_extension("Show - 1x01.mkv", 4), "Show - 1x01");
//!
//! fn example() -> Result<()> {
//!     Err(Error::data_unavailable("urn:series:missing"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod paths;

pub use error::{Error, Result};
pub use ids::*;
