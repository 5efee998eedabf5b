//! A filename processor shared between threads.
//!
//! [`FilenameProcessor`] caches series details as it goes and so needs
//! exclusive access. `SharedProcessor` puts one processor behind a single
//! mutex; clones share the processor and its cache.

use std::sync::Arc;

use parking_lot::Mutex;
use tvsort_common::Result;
use tvsort_matcher::{FilenameMatch, FilenameProcessor, SeriesDataSource};

type EpisodeOf<D> = <D as SeriesDataSource>::EpisodeId;

/// A cloneable handle to one mutex-guarded [`FilenameProcessor`].
pub struct SharedProcessor<D: SeriesDataSource> {
    inner: Arc<Mutex<FilenameProcessor<D>>>,
}

impl<D: SeriesDataSource> Clone for SharedProcessor<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: SeriesDataSource> SharedProcessor<D> {
    /// Share `processor`.
    pub fn new(processor: FilenameProcessor<D>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(processor)),
        }
    }

    /// See [`FilenameProcessor::process`].
    pub fn process(&self, path: &str) -> Result<Option<FilenameMatch<EpisodeOf<D>>>> {
        self.inner.lock().process(path)
    }

    /// See [`FilenameProcessor::process_name`].
    pub fn process_name(
        &self,
        name: &str,
        directory_series: Option<&D::SeriesId>,
    ) -> Result<Option<FilenameMatch<EpisodeOf<D>>>> {
        self.inner.lock().process_name(name, directory_series)
    }

    /// Run `f` with exclusive access to the processor.
    pub fn with<R>(&self, f: impl FnOnce(&mut FilenameProcessor<D>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
