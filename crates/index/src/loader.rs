//! Batched bulk loading
//!
//! The index is written in chunks of at most `max_batch_size` entries, one
//! `bulk_insert` per chunk, strictly one after another. A single call over
//! a large index risks overrunning transport buffers; chunking bounds the
//! payload of each call.
//!
//! # Failure
//!
//! The first failing batch aborts the load with `StoreWrite`. There is no
//! retry and no rollback: with [`BatchLoader::load`] earlier batches stay in
//! the live set. [`BatchLoader::load_and_swap`] writes to a staging set and
//! renames it over the live set only after every batch succeeded.
//!
//! Each swap stages into its own `<set>:staging:<pid>:<n>` set, so concurrent
//! rebuilds never write into or delete each other's staging data. When two
//! swaps race, the last rename wins and the live set holds one complete index.

use crate::builder::Index;
use lexis_core::{Key, LexisError, LexisResult, Score, DEFAULT_MAX_BATCH_SIZE};
use lexis_storage::SortedSetStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Suffix marking the sets a shadow rebuild writes into
pub const STAGING_SUFFIX: &str = ":staging";

static NEXT_STAGING_ID: AtomicU64 = AtomicU64::new(0);

/// Outcome of a completed load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Bulk-insert calls issued
    pub batches: usize,
    /// Entries sent across all batches
    pub entries: usize,
    /// Wall-clock time of the whole load
    pub elapsed: Duration,
}

/// Writes an [`Index`] into a sorted-set store in bounded batches
pub struct BatchLoader<'a, S: SortedSetStore + ?Sized> {
    store: &'a S,
    set: String,
    max_batch_size: usize,
}

impl<'a, S: SortedSetStore + ?Sized> BatchLoader<'a, S> {
    /// Loader for `set` with the default batch size
    pub fn new(store: &'a S, set: impl Into<String>) -> Self {
        Self {
            store,
            set: set.into(),
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }

    /// Set the maximum entries per bulk insert. Zero is rejected.
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> LexisResult<Self> {
        if max_batch_size == 0 {
            return Err(LexisError::invalid_input("max batch size must be at least 1"));
        }
        self.max_batch_size = max_batch_size;
        Ok(self)
    }

    /// Target set name
    pub fn set(&self) -> &str {
        &self.set
    }

    /// Maximum entries per bulk insert
    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// Write the index straight into the live set
    pub fn load(&self, index: &Index) -> LexisResult<LoadReport> {
        self.load_into(&self.set, index)
    }

    /// Write the index into a staging set, then atomically replace the live
    /// set with it.
    ///
    /// On a failed batch the staging set is dropped and the live set is left
    /// exactly as it was.
    pub fn load_and_swap(&self, index: &Index) -> LexisResult<LoadReport> {
        let staging = self.staging_set();
        let report = match self.load_into(&staging, index) {
            Ok(report) => report,
            Err(e) => {
                if let Err(cleanup) = self.store.delete(&staging) {
                    tracing::warn!(
                        target: "lexis::loader",
                        set = %staging,
                        error = %cleanup,
                        "Failed to drop staging set"
                    );
                }
                return Err(e);
            }
        };

        if index.is_empty() {
            // Nothing was written, so there is no staging set to rename.
            self.store.delete(&self.set)?;
        } else {
            self.store.rename(&staging, &self.set)?;
        }
        tracing::info!(
            target: "lexis::loader",
            set = %self.set,
            version = %index.version(),
            "Swapped rebuilt index into place"
        );
        Ok(report)
    }

    /// Name of a staging set no other swap in this process will use
    fn staging_set(&self) -> String {
        let id = NEXT_STAGING_ID.fetch_add(1, Ordering::Relaxed);
        format!(
            "{}{}:{}:{}",
            self.set,
            STAGING_SUFFIX,
            std::process::id(),
            id
        )
    }

    fn load_into(&self, set: &str, index: &Index) -> LexisResult<LoadReport> {
        let started = Instant::now();

        // Only one batch is materialized at a time.
        let mut chunk: Vec<(Key, Score)> =
            Vec::with_capacity(self.max_batch_size.min(index.len()));
        let mut entries = index.iter().peekable();
        let mut batches = 0;
        while entries.peek().is_some() {
            chunk.clear();
            chunk.extend(
                entries
                    .by_ref()
                    .take(self.max_batch_size)
                    .map(|(k, s)| (k.clone(), s)),
            );
            tracing::info!(
                target: "lexis::loader",
                set,
                batch = batches,
                entries = chunk.len(),
                "Inserting batch"
            );
            self.store
                .bulk_insert(set, &chunk)
                .map_err(|e| LexisError::StoreWrite {
                    batch: batches,
                    entries: chunk.len(),
                    reason: e.to_string(),
                })?;
            batches += 1;
        }

        let report = LoadReport {
            batches,
            entries: index.len(),
            elapsed: started.elapsed(),
        };
        tracing::info!(
            target: "lexis::loader",
            set,
            batches = report.batches,
            entries = report.entries,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Loaded index"
        );
        Ok(report)
    }
}
