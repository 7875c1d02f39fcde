//! The bucket upper bound: a fast overestimate of the best concrete board's
//! score anywhere in a board class, without enumerating the class.
//!
//! Two independent bounds are computed and the tighter one wins:
//!
//! - `sum_union`: every distinct word reachable by *some* letter choice,
//!   counted once (dedup via the trie's mark generation, same trick the
//!   single-board scorer uses).
//! - `max_nomark`: at each cell, the best single letter choice, summed
//!   across independent branches without deduping between them — cheaper
//!   to compute, but double-counts words reachable through more than one
//!   choice, so it's always `>= sum_union`'s true value.

use crate::board::BoardClass;
use crate::scoring::{length_contribution, word_score};
use crate::trie::{Trie, TrieNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketBoundDetails {
    pub max_nomark: u32,
    pub sum_union: u32,
    pub bailout_cell: Option<usize>,
}

impl BucketBoundDetails {
    pub fn bound(&self) -> u32 {
        self.max_nomark.min(self.sum_union)
    }
}

/// Computes both bounds over `board`, stopping early once both running
/// totals already exceed `bailout_score` (if given) — the exact bound value
/// past that point doesn't matter to a caller that only wants to know
/// "does this class beat the cutoff".
pub fn upper_bound(trie: &Trie, board: &BoardClass, bailout_score: Option<u32>) -> BucketBoundDetails {
    let generation = trie.next_generation();
    let mut sum_union = 0u32;
    let mut max_nomark = 0u32;
    let mut bailout_cell = None;

    for cell in 0..board.num_cells() {
        if board.cell(cell).letters().is_empty() {
            continue;
        }

        let mut used = 0u32;
        used |= 1 << cell;
        sum_union += sum_union_dfs(trie, board, cell, trie.root(), used, 0, generation);
        max_nomark += max_nomark_dfs(trie, board, cell, trie.root(), 1 << cell, 0);

        if let Some(bailout) = bailout_score {
            if sum_union > bailout && max_nomark > bailout {
                bailout_cell = Some(cell);
                break;
            }
        }
    }

    BucketBoundDetails {
        max_nomark,
        sum_union,
        bailout_cell,
    }
}

#[allow(clippy::too_many_arguments)]
fn sum_union_dfs(
    trie: &Trie,
    board: &BoardClass,
    cell: usize,
    node: &TrieNode,
    used: u32,
    len: usize,
    generation: u64,
) -> u32 {
    let mut total = 0u32;
    for &letter in board.cell(cell).letters() {
        let Some(child) = node.descend(letter) else {
            continue;
        };
        let child_len = len + length_contribution(letter);
        if child.is_word() && child.mark() != generation {
            child.set_mark(generation);
            total += word_score(child_len);
        }
        for &nb in board.size.neighbors(cell) {
            let nb = nb as usize;
            if used & (1 << nb) != 0 || board.cell(nb).letters().is_empty() {
                continue;
            }
            total += sum_union_dfs(trie, board, nb, child, used | (1 << nb), child_len, generation);
        }
    }
    total
}

fn max_nomark_dfs(
    trie: &Trie,
    board: &BoardClass,
    cell: usize,
    node: &TrieNode,
    used: u32,
    len: usize,
) -> u32 {
    let mut best = 0u32;
    for &letter in board.cell(cell).letters() {
        let Some(child) = node.descend(letter) else {
            continue;
        };
        let child_len = len + length_contribution(letter);
        let mut value = if child.is_word() {
            word_score(child_len)
        } else {
            0
        };
        for &nb in board.size.neighbors(cell) {
            let nb = nb as usize;
            if used & (1 << nb) != 0 || board.cell(nb).letters().is_empty() {
                continue;
            }
            value += max_nomark_dfs(trie, board, nb, child, used | (1 << nb), child_len);
        }
        best = best.max(value);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ConcreteBoard;
    use crate::geometry::BoardSize;
    use crate::scorer;

    fn dict(words: &[&str]) -> Trie {
        let mut trie = Trie::new();
        for w in words {
            trie.add_word(w).unwrap();
        }
        trie
    }

    #[test]
    fn bound_matches_single_board_score_on_a_degenerate_class() {
        let trie = dict(&["abc", "fgh"]);
        let board = ConcreteBoard::parse(BoardSize::Size4x4, "abcdefghijklmnop").unwrap();
        let class = BoardClass::from_concrete(&board);

        let details = upper_bound(&trie, &class, None);
        assert_eq!(details.bound(), scorer::score(&trie, &board));
    }

    #[test]
    fn bound_is_never_looser_than_necessary_for_a_real_choice() {
        let trie = dict(&["ace", "ice"]);
        // cell 0 can be 'a' or 'i'; both spell a real 3-letter word through
        // fixed cells 1='c', 2='e' (adjacent on a 2x2 board).
        let class = BoardClass::parse(BoardSize::Size2x2, "ai c e d").unwrap();
        let details = upper_bound(&trie, &class, None);
        assert!(details.bound() >= word_score(3));
    }

    #[test]
    fn bailout_short_circuits_once_both_bounds_clear_the_target() {
        let trie = dict(&["abcd"]);
        let board = ConcreteBoard::parse(BoardSize::Size4x4, "abcdefghijklmnop").unwrap();
        let class = BoardClass::from_concrete(&board);
        let details = upper_bound(&trie, &class, Some(0));
        assert!(details.bailout_cell.is_some());
    }
}
