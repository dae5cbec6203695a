//! Index construction
//!
//! The builder merges the expansion of every corpus word into one
//! deduplicated key -> score mapping. Keys are kept in a BTreeMap so the
//! built index iterates in store order and batches are deterministic.

use crate::corpus::{Corpus, CorpusSource};
use crate::expand::expand_word;
use lexis_core::{
    CorpusVersion, InvalidWordPolicy, Key, LexisError, LexisResult, Score, DEFAULT_SCORE,
};
use std::collections::BTreeMap;
use std::time::Duration;

/// Counters gathered while building
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Words expanded into the index
    pub words: usize,
    /// Words rejected by the expander and skipped
    pub skipped: usize,
    /// Keys produced before deduplication
    pub expanded_keys: usize,
}

/// A built index: the deduplicated key mapping plus the corpus it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    entries: BTreeMap<Key, Score>,
    version: CorpusVersion,
    stats: BuildStats,
}

impl Index {
    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Corpus version this index was built from
    pub fn version(&self) -> CorpusVersion {
        self.version
    }

    /// Build counters
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Check if a key is present
    pub fn contains(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&Key, Score)> {
        self.entries.iter().map(|(k, s)| (k, *s))
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }
}

/// Accumulates words into an [`Index`]
///
/// # Example
///
/// ```
/// use lexis_index::IndexBuilder;
///
/// let mut builder = IndexBuilder::new();
/// builder.add_words(["fin", "fine", "fig"]).unwrap();
/// let index = builder.finish();
/// assert_eq!(index.len(), 6);
/// ```
#[derive(Debug, Default)]
pub struct IndexBuilder {
    entries: BTreeMap<Key, Score>,
    policy: InvalidWordPolicy,
    stats: BuildStats,
}

impl IndexBuilder {
    /// Create an empty builder that skips invalid words
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with the given invalid-word policy
    pub fn with_policy(policy: InvalidWordPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Distinct keys collected so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been collected
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counters so far
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Merge one word's keys.
    ///
    /// Returns `Ok(true)` if the word was indexed and `Ok(false)` if it was
    /// skipped under [`InvalidWordPolicy::Skip`]. Re-adding a word leaves the
    /// mapping unchanged.
    pub fn add_word(&mut self, word: &str) -> LexisResult<bool> {
        let keys = match expand_word(word) {
            Ok(keys) => keys,
            Err(e) if self.policy == InvalidWordPolicy::Skip && e.is_invalid_input() => {
                tracing::warn!(target: "lexis::builder", word, error = %e, "Skipping word");
                self.stats.skipped += 1;
                return Ok(false);
            }
            Err(e) => return Err(e),
        };
        self.stats.words += 1;
        self.stats.expanded_keys += keys.len();
        for key in keys {
            self.entries.insert(key, DEFAULT_SCORE);
        }
        Ok(true)
    }

    /// Merge every word of an iterator
    pub fn add_words<I, S>(&mut self, words: I) -> LexisResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.add_word(word.as_ref())?;
        }
        Ok(())
    }

    /// Merge every word of a fetched corpus
    pub fn add_corpus(&mut self, corpus: &Corpus) -> LexisResult<()> {
        self.add_words(corpus.words())
    }

    /// Finish with an unversioned index
    pub fn finish(self) -> Index {
        self.finish_with_version(CorpusVersion::default())
    }

    /// Finish, stamping the index with a corpus version
    pub fn finish_with_version(self, version: CorpusVersion) -> Index {
        Index {
            entries: self.entries,
            version,
            stats: self.stats,
        }
    }

    /// Fetch a corpus and build its index in one step.
    ///
    /// Fails fast: an unavailable corpus, or an invalid word under
    /// [`InvalidWordPolicy::Abort`], returns an error and no index.
    pub fn build_from_source(
        source: &CorpusSource,
        timeout: Duration,
        policy: InvalidWordPolicy,
    ) -> LexisResult<Index> {
        let corpus = source.fetch(timeout)?;
        let mut builder = IndexBuilder::with_policy(policy);
        builder.add_corpus(&corpus)?;
        if builder.stats.words == 0 {
            return Err(LexisError::corpus_unavailable(
                &corpus.source_name,
                "corpus contains no indexable words",
            ));
        }
        let index = builder.finish_with_version(corpus.version);
        tracing::info!(
            target: "lexis::builder",
            words = index.stats.words,
            skipped = index.stats.skipped,
            entries = index.len(),
            version = %index.version,
            "Built index"
        );
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(index: &Index) -> Vec<String> {
        index.keys().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_dedup_across_words() {
        let mut builder = IndexBuilder::new();
        builder.add_words(["fin", "fine", "fig"]).unwrap();
        let index = builder.finish();

        // 3 + 4 + 3 expanded keys collapse to 6 distinct ones
        assert_eq!(index.stats().expanded_keys, 10);
        assert_eq!(
            rendered(&index),
            vec!["f", "fi", "fig*", "fin", "fin*", "fine*"]
        );
    }

    #[test]
    fn test_every_score_is_default() {
        let mut builder = IndexBuilder::new();
        builder.add_words(["apple", "apply"]).unwrap();
        let index = builder.finish();
        assert!(index.iter().all(|(_, score)| score == DEFAULT_SCORE));
    }

    #[test]
    fn test_readding_word_is_idempotent() {
        let mut once = IndexBuilder::new();
        once.add_words(["fin", "fig"]).unwrap();
        let mut twice = IndexBuilder::new();
        twice.add_words(["fin", "fig", "fin", "fig"]).unwrap();
        assert_eq!(rendered(&once.finish()), rendered(&twice.finish()));
    }

    #[test]
    fn test_overlapping_corpora_merge_without_duplicates() {
        let mut builder = IndexBuilder::new();
        builder.add_words(["see", "seed"]).unwrap();
        builder.add_words(["seed", "seen"]).unwrap();
        let index = builder.finish();
        let keys = rendered(&index);
        let mut deduped = keys.clone();
        deduped.dedup();
        assert_eq!(keys, deduped);
        assert!(index.contains(&Key::complete("see")));
        assert!(index.contains(&Key::from("see")));
        assert!(index.contains(&Key::complete("seen")));
    }

    #[test]
    fn test_skip_policy_counts_invalid_words() {
        let mut builder = IndexBuilder::new();
        builder.add_words(["ok", "a*b", "fine"]).unwrap();
        let stats = builder.stats();
        assert_eq!(stats.words, 2);
        assert_eq!(stats.skipped, 1);
        assert!(!builder.finish().contains(&Key::from("a")));
    }

    #[test]
    fn test_abort_policy_fails_build() {
        let mut builder = IndexBuilder::with_policy(InvalidWordPolicy::Abort);
        let err = builder.add_words(["ok", "a*b"]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_build_from_source_stamps_version() {
        let source = CorpusSource::from_words(["fin", "fine", "fig"]);
        let index =
            IndexBuilder::build_from_source(&source, Duration::from_secs(1), InvalidWordPolicy::Skip)
                .unwrap();
        assert_eq!(index.len(), 6);
        assert_eq!(index.version(), CorpusVersion::of("fin\nfine\nfig\n"));
    }

    #[test]
    fn test_build_from_unavailable_source_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let source = CorpusSource::File(dir.path().join("missing.txt"));
        let err =
            IndexBuilder::build_from_source(&source, Duration::from_secs(1), InvalidWordPolicy::Skip)
                .unwrap_err();
        assert!(matches!(err, LexisError::CorpusUnavailable { .. }));
    }

    #[test]
    fn test_build_from_empty_corpus_fails() {
        let source = CorpusSource::Inline("\n\n".to_string());
        let err =
            IndexBuilder::build_from_source(&source, Duration::from_secs(1), InvalidWordPolicy::Skip)
                .unwrap_err();
        assert!(matches!(err, LexisError::CorpusUnavailable { .. }));
    }
}
