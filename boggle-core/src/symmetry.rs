//! Canonical form of a board string under its symmetry group, used to dedup
//! breaker output: boards that are rotations/reflections of each other are
//! the same board for scoring purposes.
//!
//! Non-square boards (3×4) only admit the Klein four-group (identity plus
//! the two axis flips and their composition); square boards (2×2, 3×3,
//! 4×4) admit the full eight-element dihedral group, adding the three
//! non-trivial rotations.

use crate::geometry::BoardSize;

fn flip_left_right(cells: &[char], w: usize, h: usize) -> Vec<char> {
    (0..h)
        .flat_map(|y| (0..w).map(move |x| cells[y * w + (w - 1 - x)]))
        .collect()
}

fn flip_top_bottom(cells: &[char], w: usize, h: usize) -> Vec<char> {
    (0..h)
        .flat_map(|y| (0..w).map(move |x| cells[(h - 1 - y) * w + x]))
        .collect()
}

/// Rotates a square `n`x`n` grid 90 degrees clockwise.
fn rotate90_cw(cells: &[char], n: usize) -> Vec<char> {
    let mut out = vec!['\0'; n * n];
    for y in 0..n {
        for x in 0..n {
            out[y * n + x] = cells[(n - 1 - x) * n + y];
        }
    }
    out
}

/// Every image of `board` under its symmetry group, including `board`
/// itself.
pub fn all_symmetries(size: BoardSize, board: &str) -> Vec<String> {
    let (w, h) = size.dims();
    let cells: Vec<char> = board.chars().collect();

    let images: Vec<Vec<char>> = if size.is_square() {
        let n = w;
        let mut rotations = vec![cells.clone()];
        let mut current = cells.clone();
        for _ in 0..3 {
            current = rotate90_cw(&current, n);
            rotations.push(current.clone());
        }
        rotations
            .iter()
            .flat_map(|r| vec![r.clone(), flip_left_right(r, w, h)])
            .collect()
    } else {
        let flipped_lr = flip_left_right(&cells, w, h);
        let flipped_tb = flip_top_bottom(&cells, w, h);
        let flipped_both = flip_left_right(&flipped_tb, w, h);
        vec![cells.clone(), flipped_lr, flipped_tb, flipped_both]
    };

    images.into_iter().map(|c| c.into_iter().collect()).collect()
}

/// The lexicographically smallest image of `board` under its symmetry
/// group — the representative used to dedup equivalent boards.
pub fn canonicalize(size: BoardSize, board: &str) -> String {
    all_symmetries(size, board)
        .into_iter()
        .min()
        .expect("all_symmetries always returns at least the board itself")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_is_idempotent() {
        let board = "abcdefghijklmnop";
        let once = canonicalize(BoardSize::Size4x4, board);
        let twice = canonicalize(BoardSize::Size4x4, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn canonicalize_agrees_across_a_groups_images() {
        for image in all_symmetries(BoardSize::Size4x4, "abcdefghijklmnop") {
            assert_eq!(
                canonicalize(BoardSize::Size4x4, "abcdefghijklmnop"),
                canonicalize(BoardSize::Size4x4, &image)
            );
        }
    }

    #[test]
    fn square_boards_have_eight_distinct_or_fewer_images() {
        let images = all_symmetries(BoardSize::Size4x4, "abcdefghijklmnop");
        assert_eq!(images.len(), 8);
    }

    #[test]
    fn non_square_boards_have_the_klein_four_images() {
        let images = all_symmetries(BoardSize::Size3x4, "abcdefghijkl");
        assert_eq!(images.len(), 4);
    }
}
