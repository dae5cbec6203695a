//! Autocomplete facade
//!
//! Bundles a shared store with a validated configuration and exposes the
//! whole lifecycle: rebuild from a corpus, query, update single words, and
//! time queries.
//!
//! # Design
//!
//! `Autocomplete` holds only an `Arc` to the store plus its config. Clones
//! share the same store, so one thread can rebuild while others query; the
//! rebuild swaps the new index in with a single rename.

use lexis_core::{Key, LexisConfig, LexisResult};
use lexis_index::{
    BatchLoader, CorpusSource, Index, IndexBuilder, IndexUpdater, LatencyHarness, LatencyReport,
    LoadReport, QueryEngine,
};
use lexis_storage::SortedSetStore;
use std::sync::Arc;

/// Prefix autocomplete over a shared sorted-set store
pub struct Autocomplete<S: SortedSetStore + ?Sized> {
    store: Arc<S>,
    config: LexisConfig,
}

impl<S: SortedSetStore + ?Sized> Clone for Autocomplete<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: SortedSetStore + ?Sized> Autocomplete<S> {
    /// Create a facade. The config is validated up front.
    pub fn new(store: Arc<S>, config: LexisConfig) -> LexisResult<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Active configuration
    pub fn config(&self) -> &LexisConfig {
        &self.config
    }

    /// Shared store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Name of the live index set
    pub fn index_name(&self) -> &str {
        &self.config.store.index_name
    }

    /// Fetch a corpus and build its index without touching the store
    pub fn build(&self, source: &CorpusSource) -> LexisResult<Index> {
        IndexBuilder::build_from_source(
            source,
            self.config.corpus.timeout(),
            self.config.index.invalid_words,
        )
    }

    /// Build an index from `source` and swap it in over the live set.
    ///
    /// Queries running concurrently see either the old index or the new one.
    /// Concurrent rebuilds each publish a complete index; the last rename wins.
    pub fn rebuild(&self, source: &CorpusSource) -> LexisResult<LoadReport> {
        let index = self.build(source)?;
        let report = self.load(&index)?;
        tracing::info!(
            target: "lexis::autocomplete",
            source = %source.name(),
            version = %index.version(),
            entries = report.entries,
            batches = report.batches,
            "Rebuilt index"
        );
        Ok(report)
    }

    /// Corpus named by `[corpus] url`: an http(s) URL or a local path
    pub fn configured_source(&self) -> CorpusSource {
        CorpusSource::parse(&self.config.corpus.url)
    }

    /// Rebuild from the corpus named in the config
    pub fn rebuild_from_config(&self) -> LexisResult<LoadReport> {
        self.rebuild(&self.configured_source())
    }

    /// Swap a prebuilt index in over the live set
    pub fn load(&self, index: &Index) -> LexisResult<LoadReport> {
        self.loader()?.load_and_swap(index)
    }

    /// Up to `result_limit` keys starting with `prefix`
    pub fn scan(&self, prefix: &str) -> LexisResult<Vec<Key>> {
        self.engine().scan(prefix, self.config.query.result_limit)
    }

    /// Up to `limit` keys starting with `prefix`
    pub fn scan_with_limit(&self, prefix: &str, limit: usize) -> LexisResult<Vec<Key>> {
        self.engine().scan(prefix, limit)
    }

    /// Complete words starting with `prefix`, marker stripped.
    ///
    /// Keeps scanning past prefix keys until `result_limit` words are found
    /// or the range is exhausted.
    pub fn suggest(&self, prefix: &str) -> LexisResult<Vec<String>> {
        let limit = self.config.query.result_limit;
        let engine = self.engine();
        let mut words = Vec::new();
        let mut offset = 0;
        while words.len() < limit {
            let page = engine.scan_page(prefix, offset, limit)?;
            offset += page.len();
            let exhausted = page.len() < limit;
            words.extend(page.iter().filter_map(Key::word));
            if exhausted {
                break;
            }
        }
        words.truncate(limit);
        Ok(words)
    }

    /// Add one word to the live index. Returns `true` if it was new.
    pub fn insert_word(&self, word: &str) -> LexisResult<bool> {
        self.updater().insert_word(word)
    }

    /// Remove one word from the live index. Returns `true` if it was indexed.
    pub fn remove_word(&self, word: &str) -> LexisResult<bool> {
        self.updater().remove_word(word)
    }

    /// Is `word` indexed as a complete word?
    pub fn contains_word(&self, word: &str) -> LexisResult<bool> {
        self.updater().contains_word(word)
    }

    /// Number of keys in the live index
    pub fn len(&self) -> LexisResult<usize> {
        self.store.cardinality(self.index_name())
    }

    /// Check if the live index is empty or missing
    pub fn is_empty(&self) -> LexisResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Run the latency harness from the `[bench]` section
    pub fn bench(&self) -> LexisResult<LatencyReport> {
        LatencyHarness::from_config(&self.config.bench, self.config.query.result_limit)?
            .run(&self.engine())
    }

    fn loader(&self) -> LexisResult<BatchLoader<'_, S>> {
        BatchLoader::new(&*self.store, self.index_name())
            .with_max_batch_size(self.config.index.max_batch_size)
    }

    fn engine(&self) -> QueryEngine<'_, S> {
        QueryEngine::new(&*self.store, self.index_name())
    }

    fn updater(&self) -> IndexUpdater<'_, S> {
        IndexUpdater::new(&*self.store, self.index_name())
    }
}
