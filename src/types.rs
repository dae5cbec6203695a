//! Public types for the Lexis API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// ============================================================================
// Keys and ranges
// ============================================================================

pub use lexis_core::{Key, Score, DEFAULT_SCORE, TERMINAL_MARKER};
pub use lexis_core::{LexBound, LexRange};
pub use lexis_core::CorpusVersion;

// ============================================================================
// Errors and configuration
// ============================================================================

pub use lexis_core::{LexisError, LexisResult};
pub use lexis_core::{
    BenchConfig, CorpusConfig, IndexConfig, InvalidWordPolicy, LexisConfig, QueryConfig,
    StoreConfig,
};

// ============================================================================
// Storage
// ============================================================================

pub use lexis_storage::{MemoryStore, SortedSetStore};

// ============================================================================
// Index pipeline
// ============================================================================

pub use lexis_index::{BuildStats, Corpus, CorpusSource, Index, LatencyReport, LoadReport};
