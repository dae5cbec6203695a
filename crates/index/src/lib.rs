//! Prefix index for Lexis
//!
//! Turns a word corpus into prefix keys, loads them into a sorted-set store
//! in bounded batches, and answers prefix queries with one range scan.
//!
//! Data flow:
//!
//! ```text
//! CorpusSource -> IndexBuilder (expand_word per word) -> Index
//!     -> BatchLoader -> SortedSetStore
//! prefix -> QueryEngine -> LexRange -> SortedSetStore::range_by_lex
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod corpus;
pub mod expand;
pub mod harness;
pub mod loader;
pub mod query;
pub mod updater;

pub use builder::{BuildStats, Index, IndexBuilder};
pub use corpus::{Corpus, CorpusSource};
pub use expand::expand_word;
pub use harness::{LatencyHarness, LatencyReport};
pub use loader::{BatchLoader, LoadReport};
pub use query::QueryEngine;
pub use updater::IndexUpdater;
