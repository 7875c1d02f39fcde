//! Command-line driver for `boggle-core`.
//!
//! `score` is the spec's single required entry point: score one concrete
//! board against a dictionary and print `<board>\t<score>`. `bound` and
//! `break` are additive surface over the same library, for driving the
//! bucket bound and the breaker without writing a test.

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use boggle_core::board::{BoardClass, ConcreteBoard};
use boggle_core::geometry::BoardSize;
use boggle_core::{breaker, bucket_bound, dictionary, scorer, symmetry};

#[derive(Parser)]
#[command(name = "boggle", about = "Boggle board-class branch-and-bound search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score one concrete board against a dictionary.
    Score { dictionary: String, board: String },
    /// Print the bucket upper bound for a board class.
    Bound { dictionary: String, board_class: String },
    /// Break a board class against a target score, printing every surviving board.
    Break {
        dictionary: String,
        board_class: String,
        target_score: u32,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_dictionary(path: &str) -> Result<boggle_core::Trie> {
    let file = File::open(path).with_context(|| format!("opening dictionary {path}"))?;
    let trie = dictionary::load(BufReader::new(file)).with_context(|| format!("parsing dictionary {path}"))?;
    log::debug!("loaded {} words from {path}", trie.word_count());
    Ok(trie)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Score { dictionary, board } => cmd_score(&dictionary, &board),
        Command::Bound { dictionary, board_class } => cmd_bound(&dictionary, &board_class),
        Command::Break {
            dictionary,
            board_class,
            target_score,
        } => cmd_break(&dictionary, &board_class, target_score),
    }
}

fn board_size_for(cell_count: usize) -> Result<BoardSize> {
    Ok(BoardSize::from_cell_count(cell_count)?)
}

fn cmd_score(dictionary_path: &str, board_str: &str) -> Result<()> {
    let trie = load_dictionary(dictionary_path)?;
    let size = board_size_for(board_str.chars().count())?;
    let board = ConcreteBoard::parse(size, board_str)?;
    let score = scorer::score(&trie, &board);
    println!("{board_str}\t{score}");
    Ok(())
}

fn cmd_bound(dictionary_path: &str, board_class_str: &str) -> Result<()> {
    let trie = load_dictionary(dictionary_path)?;
    let cell_count = board_class_str.split_ascii_whitespace().count();
    let size = board_size_for(cell_count)?;
    let class = BoardClass::parse(size, board_class_str)?;
    let details = bucket_bound::upper_bound(&trie, &class, None);
    println!(
        "bound={} (max_nomark={}, sum_union={})",
        details.bound(),
        details.max_nomark,
        details.sum_union
    );
    Ok(())
}

fn cmd_break(dictionary_path: &str, board_class_str: &str, target_score: u32) -> Result<()> {
    let trie = load_dictionary(dictionary_path)?;
    let cell_count = board_class_str.split_ascii_whitespace().count();
    let size = board_size_for(cell_count)?;
    let class = BoardClass::parse(size, board_class_str)?;

    let paths = boggle_core::tree_builder::canonicalize(boggle_core::tree_builder::enumerate_word_paths(&trie, &class));
    let mut arena = boggle_core::arena::EvalNodeArena::new();
    let root = boggle_core::tree_builder::build_tree(&mut arena, &class, &paths);

    let outcome = breaker::break_class(&mut arena, boggle_core::arena::NodeId::Sum(root), &class, target_score);
    log::debug!(
        "visited {:?}, eliminated {:?}",
        outcome.stats.visited_by_level,
        outcome.stats.eliminated_by_level
    );

    let mut seen = std::collections::HashSet::new();
    for board in &outcome.surviving {
        let canon = symmetry::canonicalize(size, board);
        if seen.insert(canon.clone()) {
            let score = scorer::score(&trie, &ConcreteBoard::parse(size, board)?);
            println!("{canon}\t{score}");
        }
    }
    Ok(())
}
