//! Prefix queries
//!
//! A prefix `p` becomes the range `[p, successor(p))`: inclusive on the
//! prefix itself, exclusive on the prefix with its last byte incremented.
//! Every key that starts with `p` sorts inside that range and every other
//! key sorts outside it, so one scan returns exactly the completions of `p`
//! in lexicographic order. The empty prefix scans the whole set.

use lexis_core::{Key, LexRange, LexisError, LexisResult};
use lexis_storage::SortedSetStore;

/// Issues prefix scans against one sorted set
pub struct QueryEngine<'a, S: SortedSetStore + ?Sized> {
    store: &'a S,
    set: String,
}

impl<'a, S: SortedSetStore + ?Sized> QueryEngine<'a, S> {
    /// Engine over `set`
    pub fn new(store: &'a S, set: impl Into<String>) -> Self {
        Self {
            store,
            set: set.into(),
        }
    }

    /// Set being queried
    pub fn set(&self) -> &str {
        &self.set
    }

    /// Up to `limit` keys starting with `prefix`, ascending.
    ///
    /// Results mix prefix keys and complete-word keys; check
    /// [`Key::is_complete`] to tell them apart. An unknown prefix yields an
    /// empty result, not an error.
    pub fn scan(&self, prefix: &str, limit: usize) -> LexisResult<Vec<Key>> {
        self.scan_page(prefix, 0, limit)
    }

    /// Like [`scan`](Self::scan), skipping the first `offset` matches
    pub fn scan_page(&self, prefix: &str, offset: usize, limit: usize) -> LexisResult<Vec<Key>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let range = LexRange::prefix(prefix.as_bytes());
        self.store
            .range_by_lex(&self.set, &range, offset, limit)
            .map_err(LexisError::store_query)
    }

    /// Complete words among the first `limit` keys of the scan, marker
    /// stripped.
    pub fn complete_words(&self, prefix: &str, limit: usize) -> LexisResult<Vec<String>> {
        Ok(self
            .scan(prefix, limit)?
            .iter()
            .filter_map(Key::word)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::IndexBuilder;
    use crate::loader::BatchLoader;
    use lexis_core::{LexisError, Score};
    use lexis_storage::MemoryStore;

    fn store_with(keys: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        let members: Vec<(Key, Score)> = keys.iter().map(|k| (Key::from(*k), 0.0)).collect();
        store.bulk_insert("word_index", &members).unwrap();
        store
    }

    fn indexed(words: &[&str]) -> MemoryStore {
        let mut builder = IndexBuilder::new();
        builder.add_words(words.iter().copied()).unwrap();
        let store = MemoryStore::new();
        BatchLoader::new(&store, "word_index")
            .load(&builder.finish())
            .unwrap();
        store
    }

    fn rendered(keys: Vec<Key>) -> Vec<String> {
        keys.into_iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_scan_returns_only_matching_prefix() {
        let store = store_with(&["ab", "ab*", "abc*", "ac*"]);
        let engine = QueryEngine::new(&store, "word_index");
        assert_eq!(
            rendered(engine.scan("ab", 10).unwrap()),
            vec!["ab", "ab*", "abc*"]
        );
    }

    #[test]
    fn test_scan_fin() {
        let store = indexed(&["fin", "fine", "fig"]);
        let engine = QueryEngine::new(&store, "word_index");
        assert_eq!(
            rendered(engine.scan("fin", 10).unwrap()),
            vec!["fin", "fin*", "fine*"]
        );
    }

    #[test]
    fn test_complete_word_is_in_its_own_range() {
        let store = indexed(&["fin", "fine"]);
        let engine = QueryEngine::new(&store, "word_index");
        assert_eq!(rendered(engine.scan("fin", 10).unwrap()), vec!["fin", "fin*", "fine*"]);
        assert_eq!(rendered(engine.scan("fine", 10).unwrap()), vec!["fine*"]);
    }

    #[test]
    fn test_empty_prefix_returns_full_order_up_to_limit() {
        let store = indexed(&["fin", "fine", "fig"]);
        let engine = QueryEngine::new(&store, "word_index");
        assert_eq!(
            rendered(engine.scan("", 3).unwrap()),
            vec!["f", "fi", "fig*"]
        );
        assert_eq!(engine.scan("", 100).unwrap().len(), 6);
    }

    #[test]
    fn test_absent_prefix_is_empty() {
        let store = indexed(&["fin", "fine", "fig"]);
        let engine = QueryEngine::new(&store, "word_index");
        assert!(engine.scan("zebra", 10).unwrap().is_empty());
    }

    #[test]
    fn test_prefix_longer_than_any_word_is_empty() {
        let store = indexed(&["fin", "fine"]);
        let engine = QueryEngine::new(&store, "word_index");
        assert!(engine.scan("finest", 10).unwrap().is_empty());
    }

    #[test]
    fn test_limit_truncates_in_order() {
        let store = indexed(&["pa", "pack", "page", "pal"]);
        let engine = QueryEngine::new(&store, "word_index");
        assert_eq!(
            rendered(engine.scan("pa", 3).unwrap()),
            vec!["pa", "pa*", "pac"]
        );
        assert!(engine.scan("pa", 0).unwrap().is_empty());
    }

    #[test]
    fn test_scan_page_continues_where_previous_page_ended() {
        let store = indexed(&["pa", "pack", "page", "pal"]);
        let engine = QueryEngine::new(&store, "word_index");
        let all = engine.scan("pa", 100).unwrap();
        let first = engine.scan_page("pa", 0, 4).unwrap();
        let second = engine.scan_page("pa", 4, 100).unwrap();
        assert_eq!([first, second].concat(), all);
    }

    #[test]
    fn test_complete_words() {
        let store = indexed(&["pa", "pack", "page", "pal"]);
        let engine = QueryEngine::new(&store, "word_index");
        assert_eq!(
            engine.complete_words("pa", 100).unwrap(),
            vec!["pa", "pack", "page", "pal"]
        );
    }

    #[test]
    fn test_neighbouring_prefix_is_excluded() {
        // "fio" sorts right at the exclusive upper bound of "fin"
        let store = indexed(&["fin", "fio", "fim"]);
        let engine = QueryEngine::new(&store, "word_index");
        assert_eq!(rendered(engine.scan("fin", 10).unwrap()), vec!["fin*"]);
    }

    #[test]
    fn test_store_failure_is_query_error() {
        struct BrokenStore;
        impl SortedSetStore for BrokenStore {
            fn bulk_insert(&self, _: &str, _: &[(Key, Score)]) -> LexisResult<usize> {
                Ok(0)
            }
            fn range_by_lex(&self, _: &str, _: &LexRange, _: usize, _: usize) -> LexisResult<Vec<Key>> {
                Err(LexisError::storage("timed out"))
            }
            fn remove(&self, _: &str, _: &[Key]) -> LexisResult<usize> {
                Ok(0)
            }
            fn cardinality(&self, _: &str) -> LexisResult<usize> {
                Ok(0)
            }
            fn rename(&self, _: &str, _: &str) -> LexisResult<()> {
                Ok(())
            }
            fn delete(&self, _: &str) -> LexisResult<bool> {
                Ok(false)
            }
        }

        let engine = QueryEngine::new(&BrokenStore, "word_index");
        let err = engine.scan("fin", 10).unwrap_err();
        assert!(matches!(err, LexisError::StoreQuery { .. }));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scan_matches_iff_key_starts_with_prefix(
                words in proptest::collection::vec("[a-d]{1,5}", 1..20),
                prefix in "[a-d]{0,3}",
            ) {
                let mut builder = IndexBuilder::new();
                builder.add_words(&words).unwrap();
                let index = builder.finish();
                let store = MemoryStore::new();
                BatchLoader::new(&store, "s").load(&index).unwrap();

                let hits = QueryEngine::new(&store, "s").scan(&prefix, usize::MAX).unwrap();
                let expected: Vec<Key> = index
                    .keys()
                    .filter(|k| k.starts_with(prefix.as_bytes()))
                    .cloned()
                    .collect();
                prop_assert_eq!(hits, expected);
            }
        }
    }
}
