//! The reference single-board scorer: a plain dictionary DFS over one
//! concrete board. Everything else in this crate exists to avoid calling
//! this function on every board in a class.

use crate::board::ConcreteBoard;
use crate::scoring::{length_contribution, word_score};
use crate::trie::{Trie, TrieNode};

/// Scores `board` against `trie`: the sum of [`crate::scoring::word_score`]
/// over every distinct word reachable by some path on the board, each
/// counted once.
pub fn score(trie: &Trie, board: &ConcreteBoard) -> u32 {
    score_with_mask(trie, board, u32::MAX)
}

/// Like [`score`], but cells whose bit is clear in `mask` are treated as
/// forbidden: a path can neither start nor continue through them. Used by
/// [`crate::orderly_bound`]'s masked-rescoring option to get an exact score
/// over just the cells forced so far, which is tighter than the tree's own
/// running sum when the forced cells repeat a letter.
pub fn score_with_mask(trie: &Trie, board: &ConcreteBoard, mask: u32) -> u32 {
    let generation = trie.next_generation();
    let mut total = 0u32;

    for cell in 0..board.num_cells() {
        if mask & (1 << cell) == 0 {
            continue;
        }
        let Some(letter) = board.letter(cell) else {
            continue;
        };
        if let Some(child) = trie.root().descend(letter) {
            dfs_masked(
                trie,
                board,
                cell,
                child,
                1 << cell,
                length_contribution(letter),
                generation,
                mask,
                &mut total,
            );
        }
    }
    total
}

#[allow(clippy::too_many_arguments)]
fn dfs_masked(
    trie: &Trie,
    board: &ConcreteBoard,
    cell: usize,
    node: &TrieNode,
    used: u32,
    len: usize,
    generation: u64,
    mask: u32,
    total: &mut u32,
) {
    if node.is_word() && node.mark() != generation {
        node.set_mark(generation);
        *total += word_score(len);
    }
    for &nb in board.size.neighbors(cell) {
        let nb = nb as usize;
        if used & (1 << nb) != 0 || mask & (1 << nb) == 0 {
            continue;
        }
        let Some(nb_letter) = board.letter(nb) else {
            continue;
        };
        if let Some(child) = node.descend(nb_letter) {
            dfs_masked(
                trie,
                board,
                nb,
                child,
                used | (1 << nb),
                len + length_contribution(nb_letter),
                generation,
                mask,
                total,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoardSize;

    fn dict(words: &[&str]) -> Trie {
        let mut trie = Trie::new();
        for w in words {
            trie.add_word(w).unwrap();
        }
        trie
    }

    #[test]
    fn scores_two_independent_three_letter_words() {
        let trie = dict(&["abc", "fgh"]);
        let board = ConcreteBoard::parse(BoardSize::Size4x4, "abcdefghijklmnop").unwrap();
        assert_eq!(score(&trie, &board), 2);
    }

    #[test]
    fn qu_counts_as_length_two() {
        let trie = dict(&["qilt"]); // "quilt" normalized, q folded
        // 2x2 board laid out so q,i,l,t are path-adjacent.
        let board = ConcreteBoard::parse(BoardSize::Size2x2, "qilt").unwrap();
        assert_eq!(score(&trie, &board), word_score_of_quilt());
    }

    fn word_score_of_quilt() -> u32 {
        crate::scoring::word_score(5) // q(2) + i + l + t = length 5
    }

    #[test]
    fn a_word_is_only_counted_once_even_with_multiple_paths() {
        let trie = dict(&["aaa"]);
        let board = ConcreteBoard::parse(BoardSize::Size2x2, "aaaa").unwrap();
        // every ordering of three of the four 'a's spells "aaa"; it must still
        // only score once, not once per path.
        assert_eq!(score(&trie, &board), crate::scoring::word_score(3));
    }

    #[test]
    fn forbidden_cells_contribute_no_letter() {
        let trie = dict(&["bad"]);
        let board = ConcreteBoard::parse(BoardSize::Size2x2, "b.ad").unwrap();
        assert_eq!(board.letter(1), None);
        assert_eq!(score(&trie, &board), word_score_of_three_letters());
    }

    fn word_score_of_three_letters() -> u32 {
        crate::scoring::word_score(3)
    }

    #[test]
    fn masked_score_ignores_cells_outside_the_mask() {
        let trie = dict(&["abc", "fgh"]);
        let board = ConcreteBoard::parse(BoardSize::Size4x4, "abcdefghijklmnop").unwrap();
        // only cells 0,1,2 ("abc") unmasked: "fgh" can't be reached.
        let mask = (1 << 0) | (1 << 1) | (1 << 2);
        assert_eq!(score_with_mask(&trie, &board, mask), word_score_of_three_letters());
    }
}
