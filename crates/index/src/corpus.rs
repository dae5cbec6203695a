//! Corpus sources
//!
//! The corpus is a newline-delimited word list, fetched over HTTP(S) or
//! read from a local file. Fetching is all-or-nothing: any failure yields
//! `CorpusUnavailable` and no partial corpus is ever returned.

use lexis_core::{CorpusVersion, LexisError, LexisResult};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

/// Where a corpus comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    /// HTTP or HTTPS URL
    Url(String),
    /// Local file
    File(PathBuf),
    /// Text already in memory
    Inline(String),
}

impl CorpusSource {
    /// Interpret a CLI/config location: `http://` and `https://` are URLs,
    /// anything else is a file path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            CorpusSource::Url(location.to_string())
        } else {
            CorpusSource::File(PathBuf::from(location))
        }
    }

    /// Corpus built from a list of words, one per line
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for word in words {
            text.push_str(word.as_ref());
            text.push('\n');
        }
        CorpusSource::Inline(text)
    }

    /// Human-readable name used in logs and errors
    pub fn name(&self) -> String {
        match self {
            CorpusSource::Url(url) => url.clone(),
            CorpusSource::File(path) => path.display().to_string(),
            CorpusSource::Inline(_) => "<inline>".to_string(),
        }
    }

    /// Fetch the whole corpus.
    ///
    /// `timeout` bounds an HTTP fetch end to end; it is ignored for files.
    pub fn fetch(&self, timeout: Duration) -> LexisResult<Corpus> {
        let text = match self {
            CorpusSource::Url(url) => fetch_url(url, timeout)?,
            CorpusSource::File(path) => std::fs::read_to_string(path)
                .map_err(|e| LexisError::corpus_unavailable(self.name(), e))?,
            CorpusSource::Inline(text) => text.clone(),
        };
        let corpus = Corpus::new(self.name(), text);
        tracing::info!(
            target: "lexis::corpus",
            source = %corpus.source_name,
            bytes = corpus.text.len(),
            version = %corpus.version,
            "Fetched corpus"
        );
        Ok(corpus)
    }
}

fn fetch_url(url: &str, timeout: Duration) -> LexisResult<String> {
    let agent = ureq::AgentBuilder::new().timeout(timeout).build();
    let response = agent.get(url).call().map_err(|e| match e {
        ureq::Error::Status(code, _) => LexisError::corpus_unavailable(url, format!("HTTP {}", code)),
        other => LexisError::corpus_unavailable(url, other),
    })?;
    if response.status() != 200 {
        return Err(LexisError::corpus_unavailable(
            url,
            format!("HTTP {}", response.status()),
        ));
    }
    let mut text = String::new();
    response
        .into_reader()
        .read_to_string(&mut text)
        .map_err(|e| LexisError::corpus_unavailable(url, e))?;
    Ok(text)
}

/// A fetched word list
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Where it came from
    pub source_name: String,
    /// Raw text
    pub text: String,
    /// Digest of `text`
    pub version: CorpusVersion,
}

impl Corpus {
    /// Wrap raw corpus text
    pub fn new(source_name: impl Into<String>, text: String) -> Self {
        let version = CorpusVersion::of(text.as_bytes());
        Corpus {
            source_name: source_name.into(),
            text,
            version,
        }
    }

    /// Words in file order: one per line, surrounding whitespace and `\r`
    /// trimmed, blank lines skipped
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.lines().map(str::trim).filter(|w| !w.is_empty())
    }
}
