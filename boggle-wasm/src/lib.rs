//! Thin `wasm-bindgen` pass-through to `boggle-core`, mirroring
//! `wasm_boggle.cc`'s Emscripten bindings: no scoring logic lives here, just
//! argument marshalling between JS values and the library's own types.
//!
//! Every call here is stateless: it builds a fresh [`Trie`] from the word
//! list argument before scoring. A JS caller doing many calls against the
//! same dictionary should build its own caching layer on top; this binding
//! only guarantees correctness, not reuse.

use wasm_bindgen::prelude::*;

use boggle_core::board::{BoardClass, ConcreteBoard};
use boggle_core::geometry::BoardSize;
use boggle_core::{bucket_bound as bucket_bound_mod, scorer, Trie};

fn build_trie(words: Vec<String>) -> Trie {
    let mut trie = Trie::new();
    for word in words {
        if let Ok(normalized) = boggle_core::dictionary::normalize(&word) {
            let _ = trie.add_word(&normalized);
        }
    }
    trie
}

fn board_size_for(cell_count: usize) -> Result<BoardSize, JsValue> {
    BoardSize::from_cell_count(cell_count).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Scores a single concrete `board` against `dict_words`. Returns `-1` if
/// `board` doesn't parse (wrong length, a character outside `a..z`/`.`),
/// matching the C++ original's sentinel convention.
#[wasm_bindgen]
pub fn score_board(dict_words: Vec<String>, board: &str) -> i32 {
    let Ok(size) = board_size_for(board.chars().count()) else {
        return -1;
    };
    let Ok(parsed) = ConcreteBoard::parse(size, board) else {
        return -1;
    };
    let trie = build_trie(dict_words);
    scorer::score(&trie, &parsed) as i32
}

/// The bucket upper bound (§4.D: `min(max_nomark, sum_union)`) for
/// `board_class` against `dict_words`. Throws a JS exception if
/// `board_class` doesn't parse.
#[wasm_bindgen]
pub fn bucket_bound(dict_words: Vec<String>, board_class: &str) -> Result<u32, JsValue> {
    let cell_count = board_class.split_ascii_whitespace().count();
    let size = board_size_for(cell_count)?;
    let parsed = BoardClass::parse(size, board_class).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let trie = build_trie(dict_words);
    Ok(bucket_bound_mod::upper_bound(&trie, &parsed, None).bound())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_a_board_through_the_wasm_entry_point() {
        let score = score_board(vec!["abc".to_string(), "fgh".to_string()], "abcdefghijklmnop");
        assert_eq!(score, 2);
    }

    #[test]
    fn rejects_a_malformed_board_with_the_sentinel() {
        assert_eq!(score_board(vec!["abc".to_string()], "too short"), -1);
    }

    #[test]
    fn bounds_a_board_class_through_the_wasm_entry_point() {
        let bound = bucket_bound(
            vec!["abc".to_string(), "fgh".to_string()],
            "a b c d e f g h i j k l m n o p",
        )
        .unwrap();
        assert_eq!(bound, 2);
    }
}
