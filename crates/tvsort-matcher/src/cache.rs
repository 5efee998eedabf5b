//! Per-series detail cache.
//!
//! Details are fetched from the data source the first time a series is
//! needed and kept for the cache's lifetime. Failed fetches are not cached.
//! The cache has a single owner; sharing it across threads needs an outer
//! lock.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tvsort_common::Result;

use crate::episodes::PreparedSeries;
use crate::source::SeriesDetails;

/// Fetch-on-miss cache of prepared series details.
#[derive(Debug)]
pub struct DetailsCache<S, E> {
    entries: HashMap<S, Arc<PreparedSeries<E>>>,
}

impl<S, E> Default for DetailsCache<S, E> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<S, E> DetailsCache<S, E>
where
    S: Clone + Eq + Hash + std::fmt::Debug,
    E: Clone + Eq + Hash,
{
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached entry for `series`, calling `fetch` on a miss.
    pub fn get_or_fetch<F>(&mut self, series: &S, fetch: F) -> Result<Arc<PreparedSeries<E>>>
    where
        F: FnOnce(&S) -> Result<SeriesDetails<E>>,
    {
        if let Some(entry) = self.entries.get(series) {
            tracing::trace!(?series, "series details cache hit");
            return Ok(Arc::clone(entry));
        }

        tracing::trace!(?series, "series details cache miss");
        let prepared = Arc::new(PreparedSeries::new(fetch(series)?));
        self.entries.insert(series.clone(), Arc::clone(&prepared));
        Ok(prepared)
    }

    /// Whether `series` is cached.
    pub fn contains(&self, series: &S) -> bool {
        self.entries.contains_key(series)
    }

    /// Number of cached series.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
