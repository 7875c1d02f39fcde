//! Loading a word list from a reader into a [`Trie`]: one word per line,
//! `qu` folded to `q` (with the scorer compensating length by +2 wherever it
//! matters), blank lines skipped.

use std::io::BufRead;

use crate::error::BoggleError;
use crate::trie::Trie;

/// Reads `reader` line by line and inserts each non-blank line into a fresh
/// [`Trie`]. Lines are lowercased; `qu` is folded to `q` before insertion.
pub fn load<R: BufRead>(reader: R) -> Result<Trie, BoggleError> {
    let mut trie = Trie::new();
    for line in reader.lines() {
        let line = line.map_err(|_| BoggleError::InvalidDictionaryWord(String::new()))?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        let normalized = normalize(word)?;
        trie.add_word(&normalized)?;
    }
    Ok(trie)
}

/// Lowercases `word` and folds every `qu` digraph to a bare `q`. Rejects
/// anything outside `a..=z` once folded.
pub fn normalize(word: &str) -> Result<String, BoggleError> {
    let lower = word.to_ascii_lowercase();
    if !lower.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(BoggleError::InvalidDictionaryWord(word.to_string()));
    }
    Ok(lower.replace("qu", "q"))
}
