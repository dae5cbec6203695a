//! Incremental index updates
//!
//! Adds or removes single words without a full rebuild.
//!
//! Removing a word deletes its marker key, then walks its prefixes from
//! longest to shortest and deletes each prefix key that no longer has any
//! extension in the set. The walk stops at the first prefix still shared
//! with another word, since every shorter prefix is shared too.
//!
//! Updates are a sequence of store calls, not one atomic step. Run them
//! from a single writer.

use crate::expand::{expand_word, validate_word};
use lexis_core::{Key, LexBound, LexRange, LexisError, LexisResult, DEFAULT_SCORE};
use lexis_storage::SortedSetStore;

/// Applies single-word changes to a loaded index
pub struct IndexUpdater<'a, S: SortedSetStore + ?Sized> {
    store: &'a S,
    set: String,
}

impl<'a, S: SortedSetStore + ?Sized> IndexUpdater<'a, S> {
    /// Updater over `set`
    pub fn new(store: &'a S, set: impl Into<String>) -> Self {
        Self {
            store,
            set: set.into(),
        }
    }

    /// Add a word. Returns `true` if the word was not indexed before.
    pub fn insert_word(&self, word: &str) -> LexisResult<bool> {
        let keys = expand_word(word)?;
        let members: Vec<_> = keys.into_iter().map(|k| (k, DEFAULT_SCORE)).collect();
        let marker = Key::complete(word);
        let existed = self.contains(&marker)?;
        self.store
            .bulk_insert(&self.set, &members)
            .map_err(|e| LexisError::StoreWrite {
                batch: 0,
                entries: members.len(),
                reason: e.to_string(),
            })?;
        tracing::debug!(target: "lexis::updater", word, new = !existed, "Inserted word");
        Ok(!existed)
    }

    /// Remove a word and purge prefix keys no other word needs.
    ///
    /// Returns `false`, changing nothing, if the word is not indexed.
    pub fn remove_word(&self, word: &str) -> LexisResult<bool> {
        validate_word(word)?;
        let marker = Key::complete(word);
        if self.remove_key(marker)? == 0 {
            return Ok(false);
        }

        let bytes = word.as_bytes();
        let mut purged = 0;
        for end in (1..bytes.len()).rev() {
            let prefix = &bytes[..end];
            if self.has_extension(prefix)? {
                break;
            }
            purged += self.remove_key(Key::from(prefix))?;
        }
        tracing::debug!(target: "lexis::updater", word, purged, "Removed word");
        Ok(true)
    }

    /// Is `word` indexed as a complete word?
    pub fn contains_word(&self, word: &str) -> LexisResult<bool> {
        validate_word(word)?;
        self.contains(&Key::complete(word))
    }

    fn contains(&self, key: &Key) -> LexisResult<bool> {
        let range = LexRange::new(
            LexBound::Inclusive(key.clone()),
            LexBound::Inclusive(key.clone()),
        );
        let hits = self
            .store
            .range_by_lex(&self.set, &range, 0, 1)
            .map_err(LexisError::store_query)?;
        Ok(!hits.is_empty())
    }

    /// True if a longer word still starts with `prefix`.
    ///
    /// Only the prefix key itself and the marker key of a word equal to the
    /// prefix can match without being an extension, so three hits suffice.
    fn has_extension(&self, prefix: &[u8]) -> LexisResult<bool> {
        let hits = self
            .store
            .range_by_lex(&self.set, &LexRange::prefix(prefix), 0, 3)
            .map_err(LexisError::store_query)?;
        Ok(hits.iter().any(|k| k.stem() != prefix))
    }

    fn remove_key(&self, key: Key) -> LexisResult<usize> {
        self.store
            .remove(&self.set, std::slice::from_ref(&key))
            .map_err(|e| LexisError::StoreWrite {
                batch: 0,
                entries: 1,
                reason: e.to_string(),
            })
    }
}
