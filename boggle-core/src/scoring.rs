//! The canonical Boggle word-length → points table and the length bonus for
//! the `qu` digraph (stored in the trie as a single `q`, but worth length 2
//! wherever a word's length is tallied).
//!
//! `cpp/constants.h` in the original project carries an all-1s variant of
//! this table; that table was an experiment and isn't the one that ships —
//! see `boggler.cc`'s table, reproduced here.

use crate::board::Q_INDEX;

const WORD_SCORES: [u32; 9] = [0, 0, 0, 1, 1, 2, 3, 5, 11];

/// Points for a word of length `len`. Lengths beyond the table cap at the
/// 8-letter-plus value (11), matching the rule that every word eight
/// letters or longer is worth the same.
pub fn word_score(len: usize) -> u32 {
    WORD_SCORES[len.min(WORD_SCORES.len() - 1)]
}

/// How much a cell holding `letter` adds to the running word length: 2 for
/// `q` (standing in for `qu`), 1 for everything else.
pub fn length_contribution(letter: u8) -> usize {
    if letter == Q_INDEX {
        2
    } else {
        1
    }
}
