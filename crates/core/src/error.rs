//! Error taxonomy
//!
//! Every fallible operation in the workspace returns [`LexisResult`]. Nothing
//! aborts the process; the caller decides between retry and giving up.

use thiserror::Error;

/// Result alias used across Lexis crates
pub type LexisResult<T> = std::result::Result<T, LexisError>;

/// Errors raised while building, loading, or querying the index
#[derive(Debug, Error)]
pub enum LexisError {
    /// The word list could not be fetched or decoded
    #[error("corpus unavailable from {source_name}: {reason}")]
    CorpusUnavailable {
        /// URL or path the corpus was read from
        source_name: String,
        /// What went wrong
        reason: String,
    },

    /// A bulk insert failed; earlier batches stay committed
    #[error("store write failed on batch {batch} ({entries} entries): {reason}")]
    StoreWrite {
        /// Zero-based index of the failing batch
        batch: usize,
        /// Entries in the failing batch
        entries: usize,
        /// What went wrong
        reason: String,
    },

    /// A range scan failed
    #[error("store query failed: {reason}")]
    StoreQuery {
        /// What went wrong
        reason: String,
    },

    /// Raw failure reported by a sorted-set backend
    #[error("storage error: {0}")]
    Storage(String),

    /// Caller supplied an unusable argument
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be read or failed validation
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LexisError {
    /// Build an `InvalidInput` error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        LexisError::InvalidInput(msg.into())
    }

    /// Build a `Storage` error
    pub fn storage(msg: impl Into<String>) -> Self {
        LexisError::Storage(msg.into())
    }

    /// Build a `Config` error
    pub fn config(msg: impl Into<String>) -> Self {
        LexisError::Config(msg.into())
    }

    /// Build a `CorpusUnavailable` error
    pub fn corpus_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        LexisError::CorpusUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a `StoreQuery` error
    pub fn store_query(reason: impl ToString) -> Self {
        LexisError::StoreQuery {
            reason: reason.to_string(),
        }
    }

    /// True for errors caused by the caller's input rather than the environment
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, LexisError::InvalidInput(_))
    }
}
