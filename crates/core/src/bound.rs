//! Lexicographic range bounds
//!
//! A bound is an operator (inclusive, exclusive, or one of the infinities)
//! plus key bytes, held as separate fields. Bounds are never rendered into a
//! single string, so a key that happens to start with `[` or `(` cannot be
//! mistaken for an operator.

use crate::key::Key;
use std::ops::Bound;

/// One end of a lexicographic range
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexBound {
    /// Below every key
    NegInfinity,
    /// Above every key
    PosInfinity,
    /// Includes the key itself
    Inclusive(Key),
    /// Excludes the key itself
    Exclusive(Key),
}

impl LexBound {
    /// Inclusive bound on `key`
    pub fn inclusive(key: impl Into<Key>) -> Self {
        LexBound::Inclusive(key.into())
    }

    /// Exclusive bound on `key`
    pub fn exclusive(key: impl Into<Key>) -> Self {
        LexBound::Exclusive(key.into())
    }

    /// Does `key` satisfy this bound when used as the lower end?
    pub fn admits_from_below(&self, key: &[u8]) -> bool {
        match self {
            LexBound::NegInfinity => true,
            LexBound::PosInfinity => false,
            LexBound::Inclusive(b) => key >= b.as_bytes(),
            LexBound::Exclusive(b) => key > b.as_bytes(),
        }
    }

    /// Does `key` satisfy this bound when used as the upper end?
    pub fn admits_from_above(&self, key: &[u8]) -> bool {
        match self {
            LexBound::NegInfinity => false,
            LexBound::PosInfinity => true,
            LexBound::Inclusive(b) => key <= b.as_bytes(),
            LexBound::Exclusive(b) => key < b.as_bytes(),
        }
    }

    /// Convert to a `std::ops::Bound` for `BTreeMap::range`.
    ///
    /// Infinities map to `Unbounded`; callers handle the degenerate
    /// `PosInfinity` lower / `NegInfinity` upper cases before ranging.
    pub fn as_range_bound(&self) -> Bound<&Key> {
        match self {
            LexBound::NegInfinity | LexBound::PosInfinity => Bound::Unbounded,
            LexBound::Inclusive(k) => Bound::Included(k),
            LexBound::Exclusive(k) => Bound::Excluded(k),
        }
    }
}

/// A lower/upper bound pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexRange {
    /// Lower end
    pub lower: LexBound,
    /// Upper end
    pub upper: LexBound,
}

impl LexRange {
    /// Build a range from two bounds
    pub fn new(lower: LexBound, upper: LexBound) -> Self {
        LexRange { lower, upper }
    }

    /// The range covering every key
    pub fn full() -> Self {
        LexRange::new(LexBound::NegInfinity, LexBound::PosInfinity)
    }

    /// The range covering every key that starts with `prefix`.
    ///
    /// `[prefix, successor(prefix))`, or the full range for an empty prefix.
    pub fn prefix(prefix: &[u8]) -> Self {
        if prefix.is_empty() {
            return LexRange::full();
        }
        let upper = match prefix_successor(prefix) {
            Some(next) => LexBound::Exclusive(Key::new(next)),
            None => LexBound::PosInfinity,
        };
        LexRange::new(LexBound::inclusive(prefix), upper)
    }

    /// True if `key` lies within both bounds
    pub fn contains(&self, key: &[u8]) -> bool {
        self.lower.admits_from_below(key) && self.upper.admits_from_above(key)
    }

    /// True if no key can satisfy the range
    pub fn is_empty(&self) -> bool {
        match (&self.lower, &self.upper) {
            (LexBound::PosInfinity, _) | (_, LexBound::NegInfinity) => true,
            (LexBound::NegInfinity, _) | (_, LexBound::PosInfinity) => false,
            (LexBound::Inclusive(lo), LexBound::Inclusive(hi)) => lo > hi,
            (LexBound::Inclusive(lo), LexBound::Exclusive(hi))
            | (LexBound::Exclusive(lo), LexBound::Inclusive(hi))
            | (LexBound::Exclusive(lo), LexBound::Exclusive(hi)) => lo >= hi,
        }
    }
}

/// Smallest byte string greater than every string starting with `prefix`.
///
/// Increments the last byte. A trailing `0xFF` cannot be incremented, so it
/// is dropped and the carry moves left; `None` when every byte is `0xFF`
/// (no finite successor exists).
pub fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut next = prefix.to_vec();
    while let Some(last) = next.pop() {
        if last < u8::MAX {
            next.push(last + 1);
            return Some(next);
        }
    }
    None
}
