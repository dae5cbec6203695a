//! Lexis: prefix autocomplete over a lexicographic sorted set
//!
//! Every word of a corpus is expanded into its proper prefixes plus a
//! marker-terminated copy of itself, all stored with one constant score.
//! Completing a prefix is then a single lexicographic range scan.
//!
//! # Example
//!
//! ```
//! use lexis::{Autocomplete, CorpusSource, LexisConfig, MemoryStore};
//! use std::sync::Arc;
//!
//! let ac = Autocomplete::new(Arc::new(MemoryStore::new()), LexisConfig::default()).unwrap();
//! ac.rebuild(&CorpusSource::from_words(["fin", "fine", "fig"])).unwrap();
//!
//! let keys: Vec<String> = ac.scan("fin").unwrap().iter().map(|k| k.to_string()).collect();
//! assert_eq!(keys, vec!["fin", "fin*", "fine*"]);
//! assert_eq!(ac.suggest("fi").unwrap(), vec!["fig", "fin", "fine"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod autocomplete;
mod types;

pub use autocomplete::Autocomplete;
pub use types::*;

pub use lexis_index::{
    expand_word, BatchLoader, IndexBuilder, IndexUpdater, LatencyHarness, QueryEngine,
};
