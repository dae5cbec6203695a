//! In-memory sorted-set store
//!
//! Named sets in one FxHashMap behind a parking_lot RwLock, each set a
//! BTreeMap ordered by member bytes.
//!
//! # Design
//!
//! - FxHashMap: O(1) set lookup by name, fast non-crypto hash
//! - BTreeMap per set: O(log N + k) lexicographic range scans
//! - One RwLock: scans run concurrently, writes are serialized,
//!   and `rename` swaps a whole set in under a single write lock
//!
//! # Ordering
//!
//! `range_by_lex` walks member order and ignores scores. The index writes
//! every member with the same score, where member order and score order
//! coincide. With mixed scores the lexicographic result is unspecified, as
//! it is for any sorted-set store.

use crate::SortedSetStore;
use lexis_core::{Key, LexRange, LexisError, LexisResult, Score};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// One named sorted set
#[derive(Debug, Default, Clone)]
pub struct SortedSet {
    pub(crate) members: BTreeMap<Key, Score>,
}

impl SortedSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Score of a member
    pub fn score(&self, member: &Key) -> Option<Score> {
        self.members.get(member).copied()
    }

    fn scan(&self, range: &LexRange, offset: usize, limit: usize) -> Vec<Key> {
        if limit == 0 || range.is_empty() {
            return Vec::new();
        }
        // PosInfinity lower / NegInfinity upper are caught by is_empty above.
        let bounds = (range.lower.as_range_bound(), range.upper.as_range_bound());
        self.members
            .range::<Key, _>(bounds)
            .skip(offset)
            .take(limit)
            .map(|(k, _)| k.clone())
            .collect()
    }
}

/// In-memory [`SortedSetStore`]
///
/// # Thread Safety
///
/// All operations are thread-safe. Scans take the read lock and run in
/// parallel; inserts, removals and renames take the write lock.
///
/// # Example
///
/// ```
/// use lexis_core::{Key, LexRange};
/// use lexis_storage::{MemoryStore, SortedSetStore};
///
/// let store = MemoryStore::new();
/// store.bulk_insert("words", &[(Key::from("ab"), 0.0), (Key::from("ab*"), 0.0)]).unwrap();
/// let hits = store.range_by_lex("words", &LexRange::prefix(b"ab"), 0, 10).unwrap();
/// assert_eq!(hits.len(), 2);
/// ```
pub struct MemoryStore {
    sets: RwLock<FxHashMap<String, SortedSet>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            sets: RwLock::new(FxHashMap::default()),
        }
    }

    /// Number of named sets
    pub fn set_count(&self) -> usize {
        self.sets.read().len()
    }

    /// Check if a set exists
    pub fn has_set(&self, set: &str) -> bool {
        self.sets.read().contains_key(set)
    }

    /// Total members across all sets
    pub fn total_members(&self) -> usize {
        self.sets.read().values().map(SortedSet::len).sum()
    }

    /// Score of a member, if present
    pub fn score(&self, set: &str, member: &Key) -> Option<Score> {
        self.sets.read().get(set).and_then(|s| s.score(member))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("set_count", &self.set_count())
            .field("total_members", &self.total_members())
            .finish()
    }
}

impl SortedSetStore for MemoryStore {
    fn bulk_insert(&self, set: &str, members: &[(Key, Score)]) -> LexisResult<usize> {
        if let Some((key, score)) = members.iter().find(|(_, s)| s.is_nan()) {
            return Err(LexisError::storage(format!(
                "score {} for member {} is not a number",
                score, key
            )));
        }
        let mut sets = self.sets.write();
        let target = sets.entry(set.to_string()).or_default();
        let mut added = 0;
        for (key, score) in members {
            if target.members.insert(key.clone(), *score).is_none() {
                added += 1;
            }
        }
        Ok(added)
    }

    fn range_by_lex(
        &self,
        set: &str,
        range: &LexRange,
        offset: usize,
        limit: usize,
    ) -> LexisResult<Vec<Key>> {
        let sets = self.sets.read();
        Ok(sets
            .get(set)
            .map(|s| s.scan(range, offset, limit))
            .unwrap_or_default())
    }

    fn remove(&self, set: &str, members: &[Key]) -> LexisResult<usize> {
        let mut sets = self.sets.write();
        let Some(target) = sets.get_mut(set) else {
            return Ok(0);
        };
        let removed = members
            .iter()
            .filter(|k| target.members.remove(*k).is_some())
            .count();
        if target.is_empty() {
            sets.remove(set);
        }
        Ok(removed)
    }

    fn cardinality(&self, set: &str) -> LexisResult<usize> {
        Ok(self.sets.read().get(set).map(SortedSet::len).unwrap_or(0))
    }

    fn rename(&self, from: &str, to: &str) -> LexisResult<()> {
        let mut sets = self.sets.write();
        let moved = sets
            .remove(from)
            .ok_or_else(|| LexisError::storage(format!("no such set: {}", from)))?;
        let replaced = sets.insert(to.to_string(), moved).is_some();
        tracing::debug!(target: "lexis::storage", from, to, replaced, "Renamed sorted set");
        Ok(())
    }

    fn delete(&self, set: &str) -> LexisResult<bool> {
        Ok(self.sets.write().remove(set).is_some())
    }
}
