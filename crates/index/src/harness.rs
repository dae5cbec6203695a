//! Query latency harness
//!
//! Issues a fixed number of prefix scans, each drawn at random from a small
//! query pool, and reports the mean wall-clock time per scan. This measures
//! the round trip through the store as a caller sees it; it has no bearing
//! on index correctness.

use crate::query::QueryEngine;
use lexis_core::{BenchConfig, LexisError, LexisResult};
use lexis_storage::SortedSetStore;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::time::{Duration, Instant};

/// Timings from one harness run
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyReport {
    /// Per-query round-trip times, in issue order
    pub samples: Vec<Duration>,
    /// Keys returned across all queries
    pub results: usize,
}

impl LatencyReport {
    /// Number of queries issued
    pub fn queries(&self) -> usize {
        self.samples.len()
    }

    /// Mean round-trip time
    pub fn mean(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.samples.iter().sum::<Duration>() / self.samples.len() as u32
    }

    /// Mean round-trip time in fractional milliseconds
    pub fn mean_millis(&self) -> f64 {
        self.mean().as_secs_f64() * 1000.0
    }

    /// Slowest single query
    pub fn max(&self) -> Duration {
        self.samples.iter().copied().max().unwrap_or_default()
    }
}

impl fmt::Display for LatencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean latency: {:.4} ms over {} queries",
            self.mean_millis(),
            self.queries()
        )
    }
}

/// Randomized query driver
#[derive(Debug, Clone)]
pub struct LatencyHarness {
    pool: Vec<String>,
    iterations: usize,
    limit: usize,
    seed: Option<u64>,
}

impl LatencyHarness {
    /// Harness over a query pool. The pool must not be empty.
    pub fn new<I, S>(pool: I, iterations: usize, limit: usize) -> LexisResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pool: Vec<String> = pool.into_iter().map(Into::into).collect();
        if pool.is_empty() {
            return Err(LexisError::invalid_input("query pool must not be empty"));
        }
        Ok(Self {
            pool,
            iterations,
            limit,
            seed: None,
        })
    }

    /// Harness from the `[bench]` config section
    pub fn from_config(config: &BenchConfig, limit: usize) -> LexisResult<Self> {
        let mut harness = Self::new(config.pool.iter().cloned(), config.iterations, limit)?;
        harness.seed = config.seed;
        Ok(harness)
    }

    /// Fix the random sequence of queries
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The prefixes the harness draws from
    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    /// Issue every query and time it.
    ///
    /// The first failing scan aborts the run; no partial report is returned.
    pub fn run<S: SortedSetStore + ?Sized>(
        &self,
        engine: &QueryEngine<'_, S>,
    ) -> LexisResult<LatencyReport> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut samples = Vec::with_capacity(self.iterations);
        let mut results = 0;
        for _ in 0..self.iterations {
            let Some(prefix) = self.pool.choose(&mut rng) else {
                break;
            };
            let started = Instant::now();
            let hits = engine.scan(prefix, self.limit)?;
            samples.push(started.elapsed());

            tracing::trace!(target: "lexis::harness", prefix = %prefix, hits = hits.len(), "Query");
            results += hits.len();
        }

        let report = LatencyReport { samples, results };
        tracing::info!(
            target: "lexis::harness",
            queries = report.queries(),
            mean_ms = report.mean_millis(),
            max_us = report.max().as_micros() as u64,
            "Latency run complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::IndexBuilder;
    use crate::loader::BatchLoader;
    use lexis_core::{Key, LexRange, Score};
    use lexis_storage::MemoryStore;

    fn loaded() -> MemoryStore {
        let mut builder = IndexBuilder::new();
        builder
            .add_words(["fin", "fine", "pa", "pack", "see", "seed"])
            .unwrap();
        let store = MemoryStore::new();
        BatchLoader::new(&store, "word_index")
            .load(&builder.finish())
            .unwrap();
        store
    }

    #[test]
    fn test_empty_pool_rejected() {
        let err = LatencyHarness::new(Vec::<String>::new(), 10, 10).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_run_issues_configured_number_of_queries() {
        let store = loaded();
        let engine = QueryEngine::new(&store, "word_index");
        let harness = LatencyHarness::new(["fin", "pa", "see"], 250, 10).unwrap();
        let report = harness.run(&engine).unwrap();
        assert_eq!(report.queries(), 250);
        assert!(report.results > 0);
        assert!(report.max() >= report.mean());
    }

    #[test]
    fn test_seeded_runs_return_same_results() {
        let store = loaded();
        let engine = QueryEngine::new(&store, "word_index");
        let harness = LatencyHarness::new(["fin", "pa", "see", "zz"], 100, 10)
            .unwrap()
            .with_seed(42);
        let a = harness.run(&engine).unwrap();
        let b = harness.run(&engine).unwrap();
        assert_eq!(a.results, b.results);
    }

    #[test]
    fn test_from_config() {
        let config = BenchConfig {
            iterations: 5,
            pool: vec!["fin".into()],
            seed: Some(1),
        };
        let harness = LatencyHarness::from_config(&config, 10).unwrap();
        assert_eq!(harness.pool(), &["fin".to_string()]);

        let store = loaded();
        let report = harness
            .run(&QueryEngine::new(&store, "word_index"))
            .unwrap();
        // fin, fin*, fine* per query
        assert_eq!(report.results, 15);
    }

    #[test]
    fn test_report_mean_and_display() {
        let report = LatencyReport {
            samples: vec![Duration::from_millis(1), Duration::from_millis(3)],
            results: 0,
        };
        assert_eq!(report.mean(), Duration::from_millis(2));
        assert_eq!(report.max(), Duration::from_millis(3));
        assert_eq!(report.to_string(), "mean latency: 2.0000 ms over 2 queries");
    }

    #[test]
    fn test_empty_report() {
        let report = LatencyReport {
            samples: vec![],
            results: 0,
        };
        assert_eq!(report.mean(), Duration::ZERO);
    }

    #[test]
    fn test_query_failure_aborts_run() {
        struct Unreachable;
        impl SortedSetStore for Unreachable {
            fn bulk_insert(&self, _: &str, _: &[(Key, Score)]) -> LexisResult<usize> {
                Ok(0)
            }
            fn range_by_lex(&self, _: &str, _: &LexRange, _: usize, _: usize) -> LexisResult<Vec<Key>> {
                Err(LexisError::storage("connection refused"))
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

        let harness = LatencyHarness::new(["fin"], 10, 10).unwrap();
        let err = harness
            .run(&QueryEngine::new(&Unreachable, "word_index"))
            .unwrap_err();
        assert!(matches!(err, LexisError::StoreQuery { .. }));
    }
}
