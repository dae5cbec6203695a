//! Process configuration
//!
//! Loaded from a TOML file; every section and field has a default, so an
//! empty file is a valid configuration.
//!
//! ```toml
//! [store]
//! index_name = "word_index"
//!
//! [corpus]
//! url = "https://raw.githubusercontent.com/dwyl/english-words/master/words.txt"
//! timeout_secs = 30
//!
//! [index]
//! max_batch_size = 100000
//! invalid_words = "skip"
//!
//! [query]
//! result_limit = 10
//!
//! [bench]
//! iterations = 1000
//! pool = ["fin", "pa", "see"]
//! ```

use crate::error::{LexisError, LexisResult};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Word list used when no corpus is configured
pub const DEFAULT_CORPUS_URL: &str =
    "https://raw.githubusercontent.com/dwyl/english-words/master/words.txt";

/// Name of the sorted set holding the index
pub const DEFAULT_INDEX_NAME: &str = "word_index";

/// Largest number of entries sent in one bulk insert
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100_000;

/// Completions returned per query
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexisConfig {
    /// Sorted-set store settings
    pub store: StoreConfig,
    /// Corpus source settings
    pub corpus: CorpusConfig,
    /// Index build settings
    pub index: IndexConfig,
    /// Query settings
    pub query: QueryConfig,
    /// Latency harness settings
    pub bench: BenchConfig,
}

/// Sorted-set store settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Name of the sorted set holding the index
    pub index_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            index_name: DEFAULT_INDEX_NAME.to_string(),
        }
    }
}

/// Corpus source settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorpusConfig {
    /// URL or local path of the newline-delimited word list
    pub url: String,
    /// Timeout for an HTTP fetch, in seconds
    pub timeout_secs: u64,
}

impl CorpusConfig {
    /// Fetch timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CORPUS_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// What the builder does with a word the expander rejects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidWordPolicy {
    /// Log the word and keep building (default)
    #[default]
    Skip,
    /// Fail the whole build
    Abort,
}

/// Index build settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Largest number of entries per bulk insert
    pub max_batch_size: usize,
    /// Handling of words that cannot be expanded
    pub invalid_words: InvalidWordPolicy,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            invalid_words: InvalidWordPolicy::Skip,
        }
    }
}

/// Query settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Keys returned per scan
    pub result_limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

/// Latency harness settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Number of queries issued
    pub iterations: usize,
    /// Prefixes the harness picks from
    pub pool: Vec<String>,
    /// Seed for a reproducible query sequence
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            pool: vec!["fin".to_string(), "pa".to_string(), "see".to_string()],
            seed: None,
        }
    }
}

impl LexisConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> LexisResult<Self> {
        let config: LexisConfig =
            toml::from_str(text).map_err(|e| LexisError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> LexisResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| LexisError::config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Reject values no component can run with
    pub fn validate(&self) -> LexisResult<()> {
        if self.store.index_name.is_empty() {
            return Err(LexisError::config("store.index_name must not be empty"));
        }
        if self.corpus.url.is_empty() {
            return Err(LexisError::config("corpus.url must not be empty"));
        }
        if self.index.max_batch_size == 0 {
            return Err(LexisError::config("index.max_batch_size must be at least 1"));
        }
        if self.bench.iterations == 0 {
            return Err(LexisError::config("bench.iterations must be at least 1"));
        }
        if self.bench.pool.is_empty() {
            return Err(LexisError::config("bench.pool must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LexisConfig::default();
        assert_eq!(config.store.index_name, "word_index");
        assert_eq!(config.index.max_batch_size, 100_000);
        assert_eq!(config.query.result_limit, 10);
        assert_eq!(config.bench.iterations, 1000);
        assert_eq!(config.bench.pool, vec!["fin", "pa", "see"]);
        assert_eq!(config.corpus.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = LexisConfig::from_toml_str("").unwrap();
        assert_eq!(config, LexisConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = LexisConfig::from_toml_str(
            r#"
            [index]
            max_batch_size = 500
            invalid_words = "abort"

            [bench]
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.index.max_batch_size, 500);
        assert_eq!(config.index.invalid_words, InvalidWordPolicy::Abort);
        assert_eq!(config.bench.seed, Some(7));
        assert_eq!(config.bench.iterations, 1000);
        assert_eq!(config.query.result_limit, 10);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = LexisConfig::from_toml_str("[index]\nmax_batch_size = 0\n").unwrap_err();
        assert!(matches!(err, LexisError::Config(_)));
    }

    #[test]
    fn test_empty_pool_rejected() {
        let err = LexisConfig::from_toml_str("[bench]\npool = []\n").unwrap_err();
        assert!(err.to_string().contains("bench.pool"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = LexisConfig::from_toml_str("[query]\nlimit = 3\n").unwrap_err();
        assert!(matches!(err, LexisError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[query]\nresult_limit = 25").unwrap();
        let config = LexisConfig::from_file(file.path()).unwrap();
        assert_eq!(config.query.result_limit, 25);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LexisConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, LexisError::Config(_)));
    }
}
