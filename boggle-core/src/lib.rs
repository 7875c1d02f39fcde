//! Branch-and-bound search for the highest-scoring Boggle board of a given
//! size.
//!
//! Scoring one concrete board is a short dictionary DFS ([`scorer`]). The
//! hard part this crate exists for is proving an upper bound on the best
//! score reachable across a whole *class* of boards — each cell a bag of
//! candidate letters rather than a single letter — and then splitting any
//! class whose bound still beats a target score until every remaining
//! subclass is either eliminated or a single concrete board ([`breaker`]).
//!
//! Module map, leaves first:
//! - [`trie`] / [`dictionary`]: the 26-ary prefix dictionary and its loader.
//! - [`geometry`]: fixed neighbor tables and cell-split order per board size.
//! - [`board`]: parsing concrete boards and board classes.
//! - [`scoring`]: the canonical word-length → points table.
//! - [`scorer`]: the reference single-board DFS scorer.
//! - [`bucket_bound`]: the cheap max-nomark/sum-union bound over a class.
//! - [`arena`]: node storage for the bound tree.
//! - [`tree_builder`]: builds the bound tree once per class.
//! - [`orderly_bound`]: branch-and-bound walk over a built tree.
//! - [`breaker`]: recursive forced-cell splitting driving the tree builder
//!   and the orderly bound to exhaustion.
//! - [`symmetry`]: canonical board form under the board's symmetry group.

pub mod arena;
pub mod board;
pub mod breaker;
pub mod bucket_bound;
pub mod dictionary;
pub mod error;
pub mod geometry;
pub mod orderly_bound;
pub mod scorer;
pub mod scoring;
pub mod symmetry;
pub mod tree_builder;
pub mod trie;

pub use board::{BoardClass, Cell, ConcreteBoard};
pub use error::BoggleError;
pub use geometry::BoardSize;
pub use trie::Trie;
