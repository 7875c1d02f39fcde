use criterion::{criterion_group, criterion_main, Criterion};

use boggle_core::arena::{EvalNodeArena, NodeId};
use boggle_core::board::BoardClass;
use boggle_core::geometry::BoardSize;
use boggle_core::trie::Trie;
use boggle_core::{breaker, bucket_bound, tree_builder};

const SMALL_WORDS: &[&str] = &[
    "ab", "abc", "abcd", "bead", "bear", "beer", "ace", "ice", "iced", "aced",
];

fn dict(words: &[&str]) -> Trie {
    let mut trie = Trie::new();
    for w in words {
        trie.add_word(w).unwrap();
    }
    trie
}

fn bench_bucket_bound(c: &mut Criterion) {
    let trie = dict(SMALL_WORDS);
    // Every cell holds a handful of candidate letters: a realistic class for
    // the bucket bound to overestimate rather than a single concrete board.
    let class = BoardClass::parse(BoardSize::Size2x2, "abi ce a bcd e").unwrap();
    c.bench_function("bucket_bound.upper_bound", |b| {
        b.iter(|| bucket_bound::upper_bound(&trie, &class, None))
    });
}

fn bench_tree_build(c: &mut Criterion) {
    let trie = dict(SMALL_WORDS);
    let class = BoardClass::parse(BoardSize::Size2x2, "abi ce a bcd e").unwrap();
    c.bench_function("tree_builder.build_tree", |b| {
        b.iter(|| {
            let paths = tree_builder::canonicalize(tree_builder::enumerate_word_paths(&trie, &class));
            let mut arena = EvalNodeArena::new();
            tree_builder::build_tree(&mut arena, &class, &paths)
        })
    });
}

fn bench_break_class(c: &mut Criterion) {
    let trie = dict(SMALL_WORDS);
    let class = BoardClass::parse(BoardSize::Size2x2, "abi ce a bcd e").unwrap();
    let paths = tree_builder::canonicalize(tree_builder::enumerate_word_paths(&trie, &class));

    c.bench_function("breaker.break_class", |b| {
        b.iter(|| {
            let mut arena = EvalNodeArena::new();
            let root = tree_builder::build_tree(&mut arena, &class, &paths);
            breaker::break_class(&mut arena, NodeId::Sum(root), &class, 0)
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(50);
    targets = bench_bucket_bound, bench_tree_build, bench_break_class
}

criterion_main!(benches);
