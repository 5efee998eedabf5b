//! Common error types used throughout tvsort.
//!
//! Recognition itself never fails: "no match" and "ambiguous match" are plain
//! `None` results. Errors are reserved for collaborators that cannot do what
//! the caller asked, such as a catalogue that cannot supply a series.

/// Common error type for tvsort.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The data source has no details for a series the caller claims exists.
    #[error("Series data unavailable: {series}")]
    DataUnavailable {
        /// Display form of the series identifier that was looked up.
        series: String,
    },

    /// A configuration value was out of range.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Create a new DataUnavailable error.
    pub fn data_unavailable<S: ToString>(series: S) -> Self {
        Self::DataUnavailable {
            series: series.to_string(),
        }
    }

    /// Create a new Validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether this error means the catalogue is missing data, as opposed to
    /// a local failure.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
