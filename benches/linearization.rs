use std::hint::black_box;

use chat_archive_yaml::linearize::linearize;
use chat_archive_yaml::models::{Author, Content, Message, Node, NodeMapping};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn node(id: String, parent: Option<String>, children: Vec<String>) -> (String, Node) {
    let message = Message {
        id: id.clone(),
        author: Author::Assistant,
        create_time: None,
        update_time: None,
        content: Content::Text { parts: vec![format!("Reply {} with a line long enough to be truncated in the teaser", id)] },
        metadata: serde_json::Value::Null,
    };
    (id.clone(), Node { id, message: Some(message), parent, children })
}

/// A straight chain of `len` messages
fn chain(len: usize) -> NodeMapping {
    (0..len)
        .map(|i| {
            let parent = i.checked_sub(1).map(|p| format!("n{}", p));
            let children = if i + 1 < len { vec![format!("n{}", i + 1)] } else { Vec::new() };
            node(format!("n{}", i), parent, children)
        })
        .collect()
}

/// A complete binary tree of the given depth, so every inner node is a branch point
fn binary_tree(depth: u32) -> NodeMapping {
    let total = (1usize << depth) - 1;
    (0..total)
        .map(|i| {
            let parent = i.checked_sub(1).map(|p| format!("n{}", p / 2));
            let children: Vec<String> =
                [2 * i + 1, 2 * i + 2].iter().filter(|c| **c < total).map(|c| format!("n{}", c)).collect();
            node(format!("n{}", i), parent, children)
        })
        .collect()
}

fn bench_linearize_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("linearize_chain");

    for size in [100, 1_000, 10_000].iter() {
        let mapping = chain(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| linearize(black_box("n0"), black_box(&mapping)).unwrap());
        });
    }

    group.finish();
}

fn bench_linearize_branching(c: &mut Criterion) {
    let mut group = c.benchmark_group("linearize_branching");

    for depth in [6u32, 10, 14].iter() {
        let mapping = binary_tree(*depth);

        group.throughput(Throughput::Elements(mapping.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, _| {
            b.iter(|| linearize(black_box("n0"), black_box(&mapping)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_linearize_chain, bench_linearize_branching);
criterion_main!(benches);
