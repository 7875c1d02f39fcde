//! The breaker: walks a built bound tree, splitting one multi-letter cell at
//! a time wherever the tree's own bound still clears a target score, until
//! every surviving path is a fully-forced concrete board.
//!
//! Splitting a cell means forcing it to a single letter, which the tree
//! already has everything it needs for: [`ChoiceNode::child_for_letter`]
//! gives a direct answer when the node itself is the choice for that cell,
//! and [`force_cell`] handles the general case of a cell whose choice lives
//! somewhere deeper in the subtree, by recursing down and rebuilding new
//! nodes aligned per letter. A cell with no live choice left in a subtree
//! (`cell_choice_mask` doesn't have its bit) means that subtree doesn't
//! depend on the cell at all, so the same node is reused for every letter —
//! this is the null-child case: a forced letter that this subtree has no
//! information about is legal, it just contributes nothing new.

use crate::arena::{ChoiceNode, EvalNodeArena, NodeId, SumNode};
use crate::board::BoardClass;

/// Per-level visit/elimination counts from one [`break_class`] run, logged
/// at `debug` level rather than printed — a caller wanting them for its own
/// reporting reads this struct directly.
#[derive(Debug, Clone, Default)]
pub struct BreakStats {
    pub visited_by_level: Vec<u32>,
    pub eliminated_by_level: Vec<u32>,
}

impl BreakStats {
    fn record_visit(&mut self, level: usize) {
        self.grow_to(level);
        self.visited_by_level[level] += 1;
    }

    fn record_elimination(&mut self, level: usize) {
        self.grow_to(level);
        self.eliminated_by_level[level] += 1;
    }

    fn grow_to(&mut self, level: usize) {
        if self.visited_by_level.len() <= level {
            self.visited_by_level.resize(level + 1, 0);
            self.eliminated_by_level.resize(level + 1, 0);
        }
    }
}

#[derive(Debug, Clone)]
pub struct BreakOutcome {
    /// Concrete boards the walk could not rule out: their bound beat
    /// `best_score` all the way down to a fully-forced leaf.
    pub surviving: Vec<String>,
    pub stats: BreakStats,
}

/// Splits `root`'s class one cell at a time, in split order, reporting every
/// concrete board whose path through the tree never dropped to a bound at or
/// below `best_score`.
pub fn break_class(
    arena: &mut EvalNodeArena,
    root: NodeId,
    board: &BoardClass,
    best_score: u32,
) -> BreakOutcome {
    let mut stats = BreakStats::default();
    let mut surviving = Vec::new();
    let mut choices: Vec<(u8, u8)> = Vec::new();
    attack_tree(arena, root, board, best_score, 0, &mut choices, &mut surviving, &mut stats);
    BreakOutcome { surviving, stats }
}

#[allow(clippy::too_many_arguments)]
fn attack_tree(
    arena: &mut EvalNodeArena,
    node: NodeId,
    board: &BoardClass,
    best_score: u32,
    level: usize,
    choices: &mut Vec<(u8, u8)>,
    surviving: &mut Vec<String>,
    stats: &mut BreakStats,
) {
    stats.record_visit(level);

    let bound = arena.bound_of(node);
    if bound <= best_score {
        stats.record_elimination(level);
        log::debug!("eliminated at level {level}, bound {bound} <= {best_score}");
        return;
    }

    let mask = arena.cell_choice_mask_of(node);
    let already_forced = |cell: usize| choices.iter().any(|&(c, _)| c as usize == cell);
    let picked = board
        .size
        .split_order()
        .iter()
        .map(|&c| c as usize)
        .find(|&c| mask & (1 << c) != 0 && !already_forced(c));

    let Some(cell) = picked else {
        surviving.push(materialize(board, choices));
        return;
    };

    let bag: Vec<u8> = board.cell(cell).letters().to_vec();
    for (&letter, child) in bag.iter().zip(force_cell(arena, node, cell as u8, &bag)) {
        let Some(child_node) = child else { continue };
        choices.push((cell as u8, letter));
        attack_tree(arena, child_node, board, best_score, level + 1, choices, surviving, stats);
        choices.pop();
    }
}

fn materialize(board: &BoardClass, choices: &[(u8, u8)]) -> String {
    let mut letters: Vec<Option<u8>> = (0..board.num_cells())
        .map(|cell| match board.cell(cell) {
            crate::board::Cell::Forbidden => None,
            crate::board::Cell::Letters(ls) if ls.len() == 1 => Some(ls[0]),
            crate::board::Cell::Letters(_) => None,
        })
        .collect();
    for &(cell, letter) in choices {
        letters[cell as usize] = Some(letter);
    }
    letters
        .iter()
        .map(|l| match l {
            Some(l) => (b'a' + l) as char,
            None => '.',
        })
        .collect()
}

/// What forcing `cell` to each of `letters` (in order) does to `node`: one
/// entry per letter, `None` where that letter's subtree has nothing left to
/// offer (the null-child case).
pub fn force_cell(arena: &mut EvalNodeArena, node: NodeId, cell: u8, letters: &[u8]) -> Vec<Option<NodeId>> {
    match force(arena, node, cell, letters) {
        ForceResult::Aligned(v) => v,
        ForceResult::Unchanged(n) => letters.iter().map(|_| Some(n)).collect(),
    }
}

enum ForceResult {
    /// This subtree doesn't depend on `cell` at all; reuse it unchanged
    /// regardless of which letter `cell` is forced to.
    Unchanged(NodeId),
    /// One entry per letter, built by recursing into whichever children
    /// actually depend on `cell`.
    Aligned(Vec<Option<NodeId>>),
}

fn force(arena: &mut EvalNodeArena, node: NodeId, cell: u8, letters: &[u8]) -> ForceResult {
    match node {
        NodeId::Choice(id) => {
            let choice = arena.choice_node(id).clone();
            if choice.cell == cell {
                let aligned = letters
                    .iter()
                    .map(|&l| choice.child_for_letter(l).map(NodeId::Sum))
                    .collect();
                return ForceResult::Aligned(aligned);
            }
            if choice.cell_choice_mask & (1 << cell) == 0 {
                return ForceResult::Unchanged(node);
            }
            force_choice_deeper(arena, &choice, cell, letters)
        }
        NodeId::Sum(id) => {
            let sum = arena.sum_node(id).clone();
            if sum.cell_choice_mask & (1 << cell) == 0 {
                return ForceResult::Unchanged(node);
            }
            force_sum_deeper(arena, &sum, cell, letters)
        }
    }
}

/// `sum.cell_choice_mask` has `cell`'s bit set, so at least one ChoiceNode
/// child depends on it. Two cases per child: if the child *is* the choice
/// for `cell`, forcing dissolves that ChoiceNode entirely and whichever
/// SumNode it picks merges straight into the new parent (its points add in,
/// its own children become new siblings one level up); otherwise the choice
/// lives deeper still and the child survives as a sibling, just rebuilt.
fn force_sum_deeper(arena: &mut EvalNodeArena, sum: &SumNode, cell: u8, letters: &[u8]) -> ForceResult {
    let mut per_letter_children: Vec<Vec<crate::arena::ChoiceNodeId>> = vec![Vec::new(); letters.len()];
    let mut per_letter_extra_points: Vec<u32> = vec![0; letters.len()];

    for &child_id in &sum.children {
        let child = arena.choice_node(child_id).clone();
        if child.cell == cell {
            for (i, &letter) in letters.iter().enumerate() {
                if let Some(sid) = child.child_for_letter(letter) {
                    let picked = arena.sum_node(sid).clone();
                    per_letter_extra_points[i] += picked.points;
                    per_letter_children[i].extend(picked.children.iter().copied());
                }
            }
            continue;
        }
        match force(arena, NodeId::Choice(child_id), cell, letters) {
            ForceResult::Unchanged(NodeId::Choice(cid)) => {
                for bucket in per_letter_children.iter_mut() {
                    bucket.push(cid);
                }
            }
            ForceResult::Aligned(opts) => {
                for (bucket, opt) in per_letter_children.iter_mut().zip(opts) {
                    if let Some(NodeId::Choice(cid)) = opt {
                        bucket.push(cid);
                    }
                }
            }
            _ => unreachable!("forcing a ChoiceNode always yields a Choice-typed result"),
        }
    }

    let aligned = per_letter_children
        .into_iter()
        .zip(per_letter_extra_points)
        .map(|(children, extra_points)| {
            let points = sum.points + extra_points;
            let bound = points + children.iter().map(|&c| arena.choice_node(c).bound).sum::<u32>();
            let cell_choice_mask = children
                .iter()
                .fold(0, |acc, &c| acc | arena.choice_node(c).cell_choice_mask);
            let id = if children.is_empty() && (1..=128).contains(&points) {
                arena.canonical_zero_child_sum_node(points)
            } else {
                arena.new_sum_node(SumNode {
                    points,
                    bound,
                    cell_choice_mask,
                    children,
                })
            };
            Some(NodeId::Sum(id))
        })
        .collect();

    ForceResult::Aligned(aligned)
}

/// `choice.cell != cell` but `choice.cell_choice_mask` has `cell`'s bit set,
/// so the choice lives somewhere under one or more of `choice`'s own letter
/// branches; recurse into each branch and rebuild one ChoiceNode per letter
/// of `cell`, each offering whichever of `choice`'s own letters still have
/// something at that forced letter.
fn force_choice_deeper(arena: &mut EvalNodeArena, choice: &ChoiceNode, cell: u8, letters: &[u8]) -> ForceResult {
    let mut per_letter_children: Vec<Vec<crate::arena::SumNodeId>> = vec![Vec::new(); letters.len()];
    let mut per_letter_mask: Vec<u32> = vec![0; letters.len()];

    for rank in 0..choice.children.len() {
        let own_letter = choice.letter_at(rank);
        let child_id = choice.children[rank];
        match force(arena, NodeId::Sum(child_id), cell, letters) {
            ForceResult::Unchanged(NodeId::Sum(sid)) => {
                for (bucket, mask) in per_letter_children.iter_mut().zip(per_letter_mask.iter_mut()) {
                    bucket.push(sid);
                    *mask |= 1 << own_letter;
                }
            }
            ForceResult::Aligned(opts) => {
                for (i, opt) in opts.into_iter().enumerate() {
                    if let Some(NodeId::Sum(sid)) = opt {
                        per_letter_children[i].push(sid);
                        per_letter_mask[i] |= 1 << own_letter;
                    }
                }
            }
            _ => unreachable!("forcing a SumNode always yields a Sum-typed result"),
        }
    }

    let aligned = per_letter_children
        .into_iter()
        .zip(per_letter_mask)
        .map(|(children, letters_mask)| {
            if children.is_empty() {
                return None;
            }
            let bound = children.iter().map(|&s| arena.sum_node(s).bound).max().unwrap();
            let cell_choice_mask = children
                .iter()
                .fold(0, |acc, &s| acc | arena.sum_node(s).cell_choice_mask);
            let id = arena.new_choice_node(ChoiceNode {
                cell: choice.cell,
                letters: letters_mask,
                bound,
                cell_choice_mask,
                children,
            });
            Some(NodeId::Choice(id))
        })
        .collect();

    ForceResult::Aligned(aligned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoardSize;
    use crate::trie::Trie;
    use crate::tree_builder::{build_tree, canonicalize, enumerate_word_paths};

    fn dict(words: &[&str]) -> Trie {
        let mut trie = Trie::new();
        for w in words {
            trie.add_word(w).unwrap();
        }
        trie
    }

    #[test]
    fn a_fully_forced_class_survives_when_its_bound_beats_the_target() {
        let trie = dict(&["abc", "fgh"]);
        let board = BoardClass::parse(BoardSize::Size4x4, "a b c d e f g h i j k l m n o p").unwrap();
        let paths = canonicalize(enumerate_word_paths(&trie, &board));
        let mut arena = EvalNodeArena::new();
        let root = build_tree(&mut arena, &board, &paths);

        let outcome = break_class(&mut arena, NodeId::Sum(root), &board, 1);
        assert_eq!(outcome.surviving, vec!["abcdefghijklmnop".to_string()]);
    }

    #[test]
    fn a_cutoff_at_the_bound_eliminates_the_only_board() {
        let trie = dict(&["abc", "fgh"]);
        let board = BoardClass::parse(BoardSize::Size4x4, "a b c d e f g h i j k l m n o p").unwrap();
        let paths = canonicalize(enumerate_word_paths(&trie, &board));
        let mut arena = EvalNodeArena::new();
        let root = build_tree(&mut arena, &board, &paths);

        let outcome = break_class(&mut arena, NodeId::Sum(root), &board, 2);
        assert!(outcome.surviving.is_empty());
        assert_eq!(outcome.stats.eliminated_by_level[0], 1);
    }

    #[test]
    fn a_two_letter_choice_is_split_into_both_surviving_boards() {
        let trie = dict(&["ace", "ice"]);
        let class = BoardClass::parse(BoardSize::Size2x2, "ai c e d").unwrap();
        let paths = canonicalize(enumerate_word_paths(&trie, &class));
        let mut arena = EvalNodeArena::new();
        let root = build_tree(&mut arena, &class, &paths);

        let outcome = break_class(&mut arena, NodeId::Sum(root), &class, 0);
        assert_eq!(outcome.surviving.len(), 2);
        assert!(outcome.surviving.contains(&"aced".to_string()));
        assert!(outcome.surviving.contains(&"iced".to_string()));
    }

    #[test]
    fn splitting_a_cell_with_no_live_choice_reuses_the_subtree_for_every_letter() {
        // cell 0 has a real choice between 'b' and 'z'; 'z' doesn't appear in
        // the dictionary at all, so that branch should survive with a zero
        // bound and get eliminated, while 'b' (which spells "bead") survives.
        let trie = dict(&["bead"]);
        let class = BoardClass::parse(BoardSize::Size2x2, "bz e a d").unwrap();
        let paths = canonicalize(enumerate_word_paths(&trie, &class));
        let mut arena = EvalNodeArena::new();
        let root = build_tree(&mut arena, &class, &paths);

        let outcome = break_class(&mut arena, NodeId::Sum(root), &class, 0);
        assert_eq!(outcome.surviving, vec!["bead".to_string()]);
    }
}
