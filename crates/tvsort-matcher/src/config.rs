//! Matcher configuration.
//!
//! The defaults are the tuned constants the recognition heuristics were
//! built around. They are exposed so embedders can experiment, not because
//! other values are known to work better.

use std::ops::Range;

use tvsort_common::{Error, Result};

use crate::weight::Thresholds;

/// Configuration for the matcher.
///
/// Use the builder pattern to override individual values:
///
/// ```
/// use tvsort_matcher::MatcherConfig;
///
/// let config = MatcherConfig::builder()
///     .max_chaff_prefix(20)
///     .build();
/// assert_eq!(config.max_chaff_prefix, 20);
/// assert_eq!(config.max_ignored_leftover, 12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatcherConfig {
    /// How far into a name (normalised characters) a series name may start.
    /// Default: 10
    pub max_chaff_prefix: usize,

    /// Longest leftover (normalised characters) tolerated when only an
    /// episode number identifies the episode.
    /// Default: 12
    pub max_ignored_leftover: usize,

    /// Longest file suffix treated as an extension.
    /// Default: 4
    pub max_extension_len: usize,

    /// An input of length `n` may carry `n / exact_error_divisor` edits and
    /// still be exact.
    /// Default: 5.0
    pub exact_error_divisor: f64,

    /// Suggestions may carry this many times the exact allowance.
    /// Default: 2.5
    pub suggestion_factor: f64,

    /// Earliest year an eight digit air date may carry.
    /// Default: 1900
    pub min_date_year: u32,

    /// Year (exclusive) air dates must precede.
    /// Default: 3000
    pub max_date_year: u32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            max_chaff_prefix: 10,
            max_ignored_leftover: 12,
            max_extension_len: 4,
            exact_error_divisor: thresholds.exact_error_divisor,
            suggestion_factor: thresholds.suggestion_factor,
            min_date_year: 1900,
            max_date_year: 3000,
        }
    }
}

impl MatcherConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder.
    pub fn builder() -> MatcherConfigBuilder {
        MatcherConfigBuilder::default()
    }

    /// The distance thresholds.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            exact_error_divisor: self.exact_error_divisor,
            suggestion_factor: self.suggestion_factor,
        }
    }

    /// Years accepted in air dates.
    pub fn date_years(&self) -> Range<u32> {
        self.min_date_year..self.max_date_year
    }

    /// Reject values the matcher cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.exact_error_divisor > 0.0) {
            return Err(Error::validation(format!(
                "exact_error_divisor must be positive, got {}",
                self.exact_error_divisor
            )));
        }
        if !(self.suggestion_factor > 0.0) {
            return Err(Error::validation(format!(
                "suggestion_factor must be positive, got {}",
                self.suggestion_factor
            )));
        }
        if self.min_date_year >= self.max_date_year {
            return Err(Error::validation(format!(
                "date year range {}..{} is empty",
                self.min_date_year, self.max_date_year
            )));
        }
        Ok(())
    }
}

/// Builder for `MatcherConfig`.
#[derive(Debug, Clone, Default)]
pub struct MatcherConfigBuilder {
    max_chaff_prefix: Option<usize>,
    max_ignored_leftover: Option<usize>,
    max_extension_len: Option<usize>,
    exact_error_divisor: Option<f64>,
    suggestion_factor: Option<f64>,
    date_years: Option<Range<u32>>,
}

impl MatcherConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how far into a name a series name may start.
    pub fn max_chaff_prefix(mut self, chars: usize) -> Self {
        self.max_chaff_prefix = Some(chars);
        self
    }

    /// Set the leftover tolerated after a number-only match.
    pub fn max_ignored_leftover(mut self, chars: usize) -> Self {
        self.max_ignored_leftover = Some(chars);
        self
    }

    /// Set the longest suffix treated as a file extension.
    pub fn max_extension_len(mut self, chars: usize) -> Self {
        self.max_extension_len = Some(chars);
        self
    }

    /// Set the exact error divisor.
    pub fn exact_error_divisor(mut self, divisor: f64) -> Self {
        self.exact_error_divisor = Some(divisor);
        self
    }

    /// Set the suggestion factor.
    pub fn suggestion_factor(mut self, factor: f64) -> Self {
        self.suggestion_factor = Some(factor);
        self
    }

    /// Set the years accepted in air dates.
    pub fn date_years(mut self, years: Range<u32>) -> Self {
        self.date_years = Some(years);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> MatcherConfig {
        let defaults = MatcherConfig::default();
        let years = self.date_years.unwrap_or_else(|| defaults.date_years());
        MatcherConfig {
            max_chaff_prefix: self.max_chaff_prefix.unwrap_or(defaults.max_chaff_prefix),
            max_ignored_leftover: self
                .max_ignored_leftover
                .unwrap_or(defaults.max_ignored_leftover),
            max_extension_len: self.max_extension_len.unwrap_or(defaults.max_extension_len),
            exact_error_divisor: self
                .exact_error_divisor
                .unwrap_or(defaults.exact_error_divisor),
            suggestion_factor: self.suggestion_factor.unwrap_or(defaults.suggestion_factor),
            min_date_year: years.start,
            max_date_year: years.end,
        }
    }
}
