//! Index keys
//!
//! Every member of the word index is either a strict prefix of some word
//! (`"fi"`) or a complete word followed by [`TERMINAL_MARKER`] (`"fin*"`).
//! Completeness lives in the key bytes so that both kinds share one ordered
//! key space and a single range scan returns them interleaved.

use std::fmt;

/// Byte appended to a complete word.
///
/// `*` (0x2A) sorts before ASCII digits and letters, so a complete word
/// lands after its own prefix key and ahead of longer words that continue
/// with an alphanumeric byte. Punctuation below 0x2A (`!`, `"`, `&`, `'`)
/// sorts first: `o'er*` < `o*`.
pub const TERMINAL_MARKER: u8 = b'*';

/// Score attached to a sorted-set member.
pub type Score = f64;

/// The score every index key is stored with.
///
/// Equal scores make the store order members by their bytes, which is the
/// only ordering the range scan relies on.
pub const DEFAULT_SCORE: Score = 0.0;

/// A sorted-set member: raw bytes ordered byte-wise.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Key(Vec<u8>);

impl Key {
    /// Wrap raw bytes as a key
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Key(bytes.into())
    }

    /// Key for a complete word: the word bytes plus the terminal marker
    pub fn complete(word: impl AsRef<[u8]>) -> Self {
        let word = word.as_ref();
        let mut bytes = Vec::with_capacity(word.len() + 1);
        bytes.extend_from_slice(word);
        bytes.push(TERMINAL_MARKER);
        Key(bytes)
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the key, returning its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length in bytes, marker included
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the zero-length key
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the key ends with the terminal marker
    pub fn is_complete(&self) -> bool {
        self.0.last() == Some(&TERMINAL_MARKER)
    }

    /// Key bytes without the terminal marker
    pub fn stem(&self) -> &[u8] {
        if self.is_complete() {
            &self.0[..self.0.len() - 1]
        } else {
            &self.0
        }
    }

    /// The indexed word, if this key marks a complete word
    pub fn word(&self) -> Option<String> {
        if self.is_complete() {
            Some(String::from_utf8_lossy(self.stem()).into_owned())
        } else {
            None
        }
    }

    /// True if the key bytes begin with `prefix`
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.0.starts_with(prefix)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key(s.as_bytes().to_vec())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key(s.into_bytes())
    }
}

impl From<&[u8]> for Key {
    fn from(b: &[u8]) -> Self {
        Key(b.to_vec())
    }
}

impl From<Vec<u8>> for Key {
    fn from(b: Vec<u8>) -> Self {
        Key(b)
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

// =============================================================================
// CorpusVersion
// =============================================================================

/// Identity of the corpus an index was built from.
///
/// xxh3-64 digest of the raw corpus bytes. Two builds from byte-identical
/// corpora carry the same version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CorpusVersion(u64);

impl CorpusVersion {
    /// Digest corpus bytes
    pub fn of(bytes: impl AsRef<[u8]>) -> Self {
        CorpusVersion(xxhash_rust::xxh3::xxh3_64(bytes.as_ref()))
    }

    /// Wrap an already computed digest
    pub fn from_u64(value: u64) -> Self {
        CorpusVersion(value)
    }

    /// The raw digest
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CorpusVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_key_appends_marker() {
        let key = Key::complete("fin");
        assert_eq!(key.as_bytes(), b"fin*");
        assert!(key.is_complete());
        assert_eq!(key.stem(), b"fin");
        assert_eq!(key.word().as_deref(), Some("fin"));
    }

    #[test]
    fn test_prefix_key_is_not_complete() {
        let key = Key::from("fi");
        assert!(!key.is_complete());
        assert_eq!(key.stem(), b"fi");
        assert!(key.word().is_none());
    }

    #[test]
    fn test_marker_sorts_before_letters() {
        // fin < fin* < fine < fine*
        let mut keys = vec![
            Key::complete("fine"),
            Key::from("fine"),
            Key::complete("fin"),
            Key::from("fin"),
        ];
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(rendered, vec!["fin", "fin*", "fine", "fine*"]);
    }

    #[test]
    fn test_punctuation_sorts_before_marker() {
        // ' (0x27) < * (0x2A): an apostrophe extension precedes the complete word
        let mut keys = vec![Key::complete("o"), Key::complete("o'er"), Key::from("o'")];
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(rendered, vec!["o'", "o'er*", "o*"]);
    }

    #[test]
    fn test_starts_with() {
        let key = Key::complete("abc");
        assert!(key.starts_with(b"ab"));
        assert!(key.starts_with(b""));
        assert!(!key.starts_with(b"ac"));
    }

    #[test]
    fn test_corpus_version_is_content_addressed() {
        let a = CorpusVersion::of("fin\nfine\nfig\n");
        let b = CorpusVersion::of("fin\nfine\nfig\n");
        let c = CorpusVersion::of("fin\nfine\n");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string().len(), 16);
    }
}
