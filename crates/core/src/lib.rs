//! Core types for Lexis
//!
//! This crate defines the vocabulary shared by every other crate:
//! - Key: prefix keys and marker-terminated word keys
//! - LexBound / LexRange: store-level range bounds, kept apart from key content
//! - CorpusVersion: identity of the corpus an index was built from
//! - LexisError: the error taxonomy
//! - LexisConfig: process configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bound;
pub mod config;
pub mod error;
pub mod key;

pub use bound::{LexBound, LexRange};
pub use config::{
    BenchConfig, CorpusConfig, IndexConfig, InvalidWordPolicy, LexisConfig, QueryConfig,
    StoreConfig, DEFAULT_CORPUS_URL, DEFAULT_INDEX_NAME, DEFAULT_MAX_BATCH_SIZE,
    DEFAULT_RESULT_LIMIT,
};
pub use error::{LexisError, LexisResult};
pub use key::{CorpusVersion, Key, Score, DEFAULT_SCORE, TERMINAL_MARKER};
