//! Prefix expansion
//!
//! A word of `n` bytes expands to `n` keys: each strict prefix
//! `w[0:1] .. w[0:n-1]`, then the whole word with the terminal marker.

use lexis_core::{Key, LexisError, LexisResult, TERMINAL_MARKER};

/// Check that a word can be indexed.
///
/// Rejects the empty word, words containing the terminal marker, and words
/// containing whitespace or control characters.
pub fn validate_word(word: &str) -> LexisResult<()> {
    if word.is_empty() {
        return Err(LexisError::invalid_input("word must not be empty"));
    }
    if word.as_bytes().contains(&TERMINAL_MARKER) {
        return Err(LexisError::invalid_input(format!(
            "word {:?} contains the reserved terminal marker '{}'",
            word, TERMINAL_MARKER as char
        )));
    }
    if let Some(c) = word.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(LexisError::invalid_input(format!(
            "word {:?} contains non-printable character {:?}",
            word, c
        )));
    }
    Ok(())
}

/// Expand a word into its ordered prefix keys.
///
/// Prefixes are cut at byte boundaries, matching the byte-wise ordering of
/// the store; a multi-byte character contributes one key per byte.
///
/// # Example
///
/// ```
/// use lexis_index::expand_word;
///
/// let keys: Vec<String> = expand_word("fin").unwrap().iter().map(|k| k.to_string()).collect();
/// assert_eq!(keys, vec!["f", "fi", "fin*"]);
/// ```
pub fn expand_word(word: &str) -> LexisResult<Vec<Key>> {
    validate_word(word)?;
    let bytes = word.as_bytes();
    let mut keys: Vec<Key> = (1..bytes.len())
        .map(|end| Key::from(&bytes[..end]))
        .collect();
    keys.push(Key::complete(bytes));
    Ok(keys)
}
