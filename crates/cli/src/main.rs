mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use lexis::{Autocomplete, CorpusSource, InvalidWordPolicy, LexisConfig, MemoryStore};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => LexisConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => LexisConfig::default(),
    };
    apply_overrides(&cli, &mut config);
    tracing::debug!(target: "lexis::cli", ?config, "Resolved configuration");

    let source = corpus_source(&cli, &config);

    let ac = Autocomplete::new(Arc::new(MemoryStore::new()), config)
        .context("Invalid configuration")?;
    let index = ac
        .build(&source)
        .with_context(|| format!("Failed to build index from {}", source.name()))?;
    let report = ac.load(&index).context("Failed to load index")?;
    tracing::info!(
        target: "lexis::cli",
        source = %source.name(),
        keys = index.len(),
        batches = report.batches,
        "Index ready"
    );

    match cli.command {
        Command::Build => {
            let stats = index.stats();
            println!("corpus version: {}", index.version());
            println!("words indexed:  {}", stats.words);
            println!("words skipped:  {}", stats.skipped);
            println!("keys:           {}", index.len());
            println!("batches:        {}", report.batches);
            println!("load time:      {} ms", report.elapsed.as_millis());
        }
        Command::Query {
            prefixes, words, ..
        } => {
            for prefix in &prefixes {
                if words {
                    let found = ac
                        .suggest(prefix)
                        .with_context(|| format!("Query for '{prefix}' failed"))?;
                    println!("{prefix}: {}", found.join(" "));
                } else {
                    let keys = ac
                        .scan(prefix)
                        .with_context(|| format!("Query for '{prefix}' failed"))?;
                    let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
                    println!("{prefix}: {}", rendered.join(" "));
                }
            }
        }
        Command::Bench { .. } => {
            tracing::info!(
                target: "lexis::cli",
                iterations = ac.config().bench.iterations,
                seed = ?ac.config().bench.seed,
                "Starting latency run"
            );
            let latency = ac.bench().context("Latency run failed")?;
            println!("{latency}");
        }
    }
    Ok(())
}

/// `--corpus` if given, else the configured location
fn corpus_source(cli: &Cli, config: &LexisConfig) -> CorpusSource {
    CorpusSource::parse(cli.corpus.as_deref().unwrap_or(config.corpus.url.as_str()))
}

fn apply_overrides(cli: &Cli, config: &mut LexisConfig) {
    if let Some(batch_size) = cli.batch_size {
        config.index.max_batch_size = batch_size;
    }
    if cli.strict {
        config.index.invalid_words = InvalidWordPolicy::Abort;
    }
    match &cli.command {
        Command::Build => {}
        Command::Query { limit, .. } => {
            if let Some(limit) = limit {
                config.query.result_limit = *limit;
            }
        }
        Command::Bench {
            iterations,
            seed,
            limit,
        } => {
            if let Some(iterations) = iterations {
                config.bench.iterations = *iterations;
            }
            if seed.is_some() {
                config.bench.seed = *seed;
            }
            if let Some(limit) = limit {
                config.query.result_limit = *limit;
            }
        }
    }
}
