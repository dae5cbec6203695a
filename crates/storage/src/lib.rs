//! Sorted-set storage for Lexis
//!
//! The index is built against the [`SortedSetStore`] trait: named sets of
//! scored members with a lexicographic range scan. [`MemoryStore`] is the
//! in-process implementation used by the CLI, tests and benches.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;

pub use memory::MemoryStore;

use lexis_core::{Key, LexRange, LexisResult, Score};

/// A store of named sorted sets.
///
/// Members with equal scores are ordered by their bytes; `range_by_lex`
/// assumes that ordering. Every call is atomic with respect to other calls.
pub trait SortedSetStore: Send + Sync {
    /// Insert or update members. Returns how many members were new.
    fn bulk_insert(&self, set: &str, members: &[(Key, Score)]) -> LexisResult<usize>;

    /// Members within `range`, ascending, skipping `offset` and returning at most `limit`.
    ///
    /// A missing set scans as empty.
    fn range_by_lex(
        &self,
        set: &str,
        range: &LexRange,
        offset: usize,
        limit: usize,
    ) -> LexisResult<Vec<Key>>;

    /// Remove members. Returns how many were present.
    fn remove(&self, set: &str, members: &[Key]) -> LexisResult<usize>;

    /// Number of members in the set (0 if missing)
    fn cardinality(&self, set: &str) -> LexisResult<usize>;

    /// Replace `to` with `from` in one step. `from` must exist.
    fn rename(&self, from: &str, to: &str) -> LexisResult<()>;

    /// Drop a whole set. Returns whether it existed.
    fn delete(&self, set: &str) -> LexisResult<bool>;
}

impl<S: SortedSetStore + ?Sized> SortedSetStore for std::sync::Arc<S> {
    fn bulk_insert(&self, set: &str, members: &[(Key, Score)]) -> LexisResult<usize> {
        (**self).bulk_insert(set, members)
    }

    fn range_by_lex(
        &self,
        set: &str,
        range: &LexRange,
        offset: usize,
        limit: usize,
    ) -> LexisResult<Vec<Key>> {
        (**self).range_by_lex(set, range, offset, limit)
    }

    fn remove(&self, set: &str, members: &[Key]) -> LexisResult<usize> {
        (**self).remove(set, members)
    }

    fn cardinality(&self, set: &str) -> LexisResult<usize> {
        (**self).cardinality(set)
    }

    fn rename(&self, from: &str, to: &str) -> LexisResult<()> {
        (**self).rename(from, to)
    }

    fn delete(&self, set: &str) -> LexisResult<bool> {
        (**self).delete(set)
    }
}
