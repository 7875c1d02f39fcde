//! Parsing and representing concrete boards and board classes.
//!
//! A concrete board has exactly one letter per cell (or `.` marking a cell
//! that can't be used at all). A board *class* relaxes that to a
//! non-empty bag of candidate letters per cell — the bucket bound and the
//! tree builder both operate over classes; a concrete board is the
//! `NumReps == 1` special case.

use crate::error::BoggleError;
use crate::geometry::BoardSize;

/// Letter index of `q`, used for the `qu`-counts-as-length-2 rule.
pub const Q_INDEX: u8 = b'q' - b'a';

fn letter_index(c: char) -> Option<u8> {
    if c.is_ascii_lowercase() {
        Some(c as u8 - b'a')
    } else {
        None
    }
}

/// A concrete board: one letter (or "forbidden") per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcreteBoard {
    pub size: BoardSize,
    cells: Vec<Option<u8>>,
}

impl ConcreteBoard {
    /// Builds a board directly from per-cell letters, `None` meaning
    /// forbidden. Used by the orderly bound's masked-rescoring option to
    /// materialize "only the cells forced so far" as a scorable board.
    pub fn from_letters(size: BoardSize, cells: Vec<Option<u8>>) -> ConcreteBoard {
        debug_assert_eq!(cells.len(), size.num_cells());
        ConcreteBoard { size, cells }
    }

    pub fn parse(size: BoardSize, s: &str) -> Result<ConcreteBoard, BoggleError> {
        let expected = size.num_cells();
        if s.chars().count() != expected {
            return Err(BoggleError::WrongBoardLength {
                expected,
                got: s.chars().count(),
            });
        }
        let mut cells = Vec::with_capacity(expected);
        for c in s.chars() {
            if c == '.' {
                cells.push(None);
            } else {
                cells.push(Some(letter_index(c).ok_or(BoggleError::InvalidLetter(c))?));
            }
        }
        Ok(ConcreteBoard { size, cells })
    }

    pub fn letter(&self, cell: usize) -> Option<u8> {
        self.cells[cell]
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn to_string_repr(&self) -> String {
        self.cells
            .iter()
            .map(|c| match c {
                Some(l) => (b'a' + l) as char,
                None => '.',
            })
            .collect()
    }
}

/// A board class: a non-empty bag of candidate letters per cell, or
/// "forbidden" (no letters at all — used only when the class represents a
/// single-board scoring context with blocked cells).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Forbidden,
    Letters(Vec<u8>),
}

impl Cell {
    pub fn letters(&self) -> &[u8] {
        match self {
            Cell::Forbidden => &[],
            Cell::Letters(ls) => ls,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardClass {
    pub size: BoardSize,
    cells: Vec<Cell>,
}

impl BoardClass {
    pub fn parse(size: BoardSize, s: &str) -> Result<BoardClass, BoggleError> {
        // Split on single ASCII spaces, not `split_ascii_whitespace`: a run
        // of consecutive spaces must produce an empty token so a
        // consecutive-space empty cell (e.g. "a  b c d") is rejected instead
        // of silently collapsing away, matching `ParseBoard`'s
        // `cell_pos == 0` check.
        let tokens: Vec<&str> = s.split(' ').collect();
        let expected = size.num_cells();
        if tokens.len() != expected {
            return Err(BoggleError::WrongCellCount {
                expected,
                got: tokens.len(),
            });
        }
        let mut cells = Vec::with_capacity(expected);
        for (i, token) in tokens.iter().enumerate() {
            if *token == "." {
                cells.push(Cell::Forbidden);
                continue;
            }
            if token.is_empty() {
                return Err(BoggleError::EmptyCell(i));
            }
            // Checked against the raw char count, before dedup: a cell
            // string over 26 characters is an error even if it repeats
            // letters down to 26 or fewer distinct ones, matching
            // `ParseBoard`'s `cell_pos >= 27` check on the raw string.
            let count = token.chars().count();
            if count > 26 {
                return Err(BoggleError::OversizeCell { cell: i, count });
            }
            let mut letters: Vec<u8> = token
                .chars()
                .map(|c| letter_index(c).ok_or(BoggleError::InvalidLetter(c)))
                .collect::<Result<_, _>>()?;
            letters.sort_unstable();
            letters.dedup();
            cells.push(Cell::Letters(letters));
        }
        Ok(BoardClass { size, cells })
    }

    /// A board class with exactly one letter per cell, built from a
    /// concrete board — useful for testing that the bound equals the
    /// single-board score on a degenerate class.
    pub fn from_concrete(board: &ConcreteBoard) -> BoardClass {
        let cells = (0..board.num_cells())
            .map(|i| match board.letter(i) {
                Some(l) => Cell::Letters(vec![l]),
                None => Cell::Forbidden,
            })
            .collect();
        BoardClass {
            size: board.size,
            cells,
        }
    }

    pub fn cell(&self, i: usize) -> &Cell {
        &self.cells[i]
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of distinct concrete boards represented by this class.
    pub fn num_reps(&self) -> u64 {
        self.cells
            .iter()
            .map(|c| match c {
                Cell::Forbidden => 1,
                Cell::Letters(ls) => ls.len() as u64,
            })
            .product()
    }

    /// Replaces `cell`'s bag with the single letter `letter`, returning a
    /// narrower class. Used when materializing a concrete board out of a
    /// fully-forced class.
    pub fn force(&self, cell: usize, letter: u8) -> BoardClass {
        let mut cells = self.cells.clone();
        cells[cell] = Cell::Letters(vec![letter]);
        BoardClass {
            size: self.size,
            cells,
        }
    }

    /// `true` once every cell holds exactly one letter (or is forbidden).
    pub fn is_concrete(&self) -> bool {
        self.cells.iter().all(|c| match c {
            Cell::Forbidden => true,
            Cell::Letters(ls) => ls.len() <= 1,
        })
    }

    pub fn to_concrete_string(&self) -> String {
        self.cells
            .iter()
            .map(|c| match c {
                Cell::Forbidden => '.',
                Cell::Letters(ls) if ls.len() == 1 => (b'a' + ls[0]) as char,
                Cell::Letters(_) => '?',
            })
            .collect()
    }
}
