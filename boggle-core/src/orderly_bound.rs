//! The branch-and-bound walk over a built bound tree: forces cells one at a
//! time in split order, maintaining a running sum per cell so that most of
//! the tree never has to be re-descended between sibling letters.
//!
//! The trick that makes this cheap: every [`ChoiceNode`]'s children are
//! sorted ascending by letter, and the outer loop here tries letters in
//! ascending order too, so each live ChoiceNode's "next unconsumed child"
//! cursor only ever moves forward — no backtracking, no re-scanning.

use crate::arena::{ChoiceNodeId, EvalNodeArena, SumNodeId};
use crate::board::{BoardClass, ConcreteBoard};
use crate::scorer::score_with_mask;
use crate::trie::Trie;

/// A board-class cell, forced to a single letter, that the walk could not
/// rule out: its bound still exceeds the cutoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub bound: u32,
    pub board: String,
}

/// Walks `root`'s tree, emitting every fully-forced board whose bound beats
/// `cutoff`. `preset` fixes some cells ahead of time (their letters are
/// reported as-is and they're skipped in the split-order walk, matching a
/// tree that was already built with those cells forced).
pub fn orderly_bound(
    arena: &EvalNodeArena,
    root: SumNodeId,
    board: &BoardClass,
    cutoff: u32,
    preset: &[(usize, u8)],
) -> Vec<Failure> {
    orderly_bound_impl(arena, root, board, cutoff, preset, None)
}

/// Like [`orderly_bound`], but recomputes `base_points` at every recursion
/// step by scoring only the cells forced so far against `trie`, instead of
/// trusting the tree's own running sum. This tightens the bound when the
/// forced cells repeat a letter in a way the tree-based sum double-counts —
/// at the cost of a DFS rescore on every split, so it's opt-in.
pub fn orderly_bound_with_masked_rescore(
    arena: &EvalNodeArena,
    root: SumNodeId,
    board: &BoardClass,
    cutoff: u32,
    preset: &[(usize, u8)],
    trie: &Trie,
) -> Vec<Failure> {
    orderly_bound_impl(arena, root, board, cutoff, preset, Some(trie))
}

fn orderly_bound_impl(
    arena: &EvalNodeArena,
    root: SumNodeId,
    board: &BoardClass,
    cutoff: u32,
    preset: &[(usize, u8)],
    masked_rescore: Option<&Trie>,
) -> Vec<Failure> {
    let num_cells = board.num_cells();
    let mut forced = vec![None; num_cells];
    let mut preset_mask = 0u32;
    for &(cell, letter) in preset {
        forced[cell] = Some(letter);
        preset_mask |= 1 << cell;
    }

    let active_order: Vec<u8> = board
        .size
        .split_order()
        .iter()
        .copied()
        .filter(|&cell| forced[cell as usize].is_none() && !board.cell(cell as usize).letters().is_empty())
        .collect();

    let mut stacks: Vec<Vec<ChoiceNodeId>> = vec![Vec::new(); num_cells];
    let mut stack_sums: Vec<u32> = vec![0; num_cells];

    let base_points = advance(arena, root, &mut stacks, &mut stack_sums);

    let mut results = Vec::new();
    let mut choices: Vec<(u8, u8)> = Vec::new();
    rec(
        arena,
        board,
        &active_order,
        cutoff,
        base_points,
        0,
        &mut stacks,
        &mut stack_sums,
        &mut choices,
        &mut results,
        &mut forced,
        preset_mask,
        masked_rescore,
    );

    results
        .into_iter()
        .map(|(bound, choices)| {
            for &(cell, letter) in &choices {
                forced[cell as usize] = Some(letter);
            }
            let board_str = forced
                .iter()
                .map(|l| match l {
                    Some(l) => (b'a' + l) as char,
                    None => '.',
                })
                .collect();
            Failure {
                bound,
                board: board_str,
            }
        })
        .collect()
}

/// Pushes `node`'s ChoiceNode children onto their cells' stacks, returns
/// `node.points`.
fn advance(
    arena: &EvalNodeArena,
    node: SumNodeId,
    stacks: &mut [Vec<ChoiceNodeId>],
    stack_sums: &mut [u32],
) -> u32 {
    let node = arena.sum_node(node);
    for &child_id in &node.children {
        let child = arena.choice_node(child_id);
        stacks[child.cell as usize].push(child_id);
        stack_sums[child.cell as usize] += child.bound;
    }
    node.points
}

#[allow(clippy::too_many_arguments)]
fn rec(
    arena: &EvalNodeArena,
    board: &BoardClass,
    active_order: &[u8],
    cutoff: u32,
    base_points: u32,
    num_splits: usize,
    stacks: &mut Vec<Vec<ChoiceNodeId>>,
    stack_sums: &mut Vec<u32>,
    choices: &mut Vec<(u8, u8)>,
    results: &mut Vec<(u32, Vec<(u8, u8)>)>,
    forced: &mut Vec<Option<u8>>,
    ok_mask: u32,
    masked_rescore: Option<&Trie>,
) {
    let base_points = match masked_rescore {
        Some(trie) => {
            let concrete = ConcreteBoard::from_letters(board.size, forced.clone());
            score_with_mask(trie, &concrete, ok_mask)
        }
        None => base_points,
    };

    let remaining: u32 = active_order[num_splits..]
        .iter()
        .map(|&cell| stack_sums[cell as usize])
        .sum();
    let bound = base_points + remaining;
    if bound <= cutoff {
        return;
    }
    if num_splits == active_order.len() {
        results.push((bound, choices.clone()));
        return;
    }

    let next = active_order[num_splits] as usize;
    let live_choices = stacks[next].clone();
    let mut cursors = vec![0usize; live_choices.len()];

    let snapshot_lens: Vec<usize> = stacks.iter().map(|s| s.len()).collect();
    let snapshot_sums: Vec<u32> = stack_sums.clone();
    let next_mask = ok_mask | (1 << next);

    for (i, &letter) in board.cell(next).letters().to_vec().iter().enumerate() {
        if i > 0 {
            for (cell, &len) in snapshot_lens.iter().enumerate() {
                stacks[cell].truncate(len);
            }
            stack_sums.copy_from_slice(&snapshot_sums);
        }

        let mut points_this_letter = 0u32;
        for (idx, &choice_id) in live_choices.iter().enumerate() {
            let choice = arena.choice_node(choice_id);
            let cursor = cursors[idx];
            if cursor < choice.children.len() && choice.letter_at(cursor) == letter {
                let child = choice.children[cursor];
                points_this_letter += advance(arena, child, stacks, stack_sums);
                cursors[idx] += 1;
            }
        }

        choices.push((next as u8, letter));
        forced[next] = Some(letter);
        rec(
            arena,
            board,
            active_order,
            cutoff,
            base_points + points_this_letter,
            num_splits + 1,
            stacks,
            stack_sums,
            choices,
            results,
            forced,
            next_mask,
            masked_rescore,
        );
        forced[next] = None;
        choices.pop();
    }
}
