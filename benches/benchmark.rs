use criterion::{black_box, criterion_group, criterion_main, Criterion};
use treedec::graph::Hypergraph;
use treedec::ordering::{MinDegreeOrdering, MinFillOrdering, OrderingStrategy, RandomOrdering};
use treedec::solver::WidthMinimizerBuilder;

fn grid(rows: usize, columns: usize) -> Hypergraph {
    let mut edges = Vec::new();
    let id = |r: usize, c: usize| r * columns + c + 1;
    for r in 0..rows {
        for c in 0..columns {
            if c + 1 < columns {
                edges.push(vec![id(r, c), id(r, c + 1)]);
            }
            if r + 1 < rows {
                edges.push(vec![id(r, c), id(r + 1, c)]);
            }
        }
    }
    Hypergraph::from_edges(edges).unwrap()
}

fn orderings(c: &mut Criterion) {
    let graph = grid(8, 8);

    c.bench_function("grid_min_fill_ordering", |b| {
        b.iter(|| MinFillOrdering.compute_ordering(black_box(&graph)))
    });

    c.bench_function("grid_min_degree_ordering", |b| {
        b.iter(|| MinDegreeOrdering.compute_ordering(black_box(&graph)))
    });
}

fn decompositions(c: &mut Criterion) {
    let graph = grid(8, 8);

    c.bench_function("grid_min_fill_decomposition", |b| {
        b.iter(|| {
            WidthMinimizerBuilder::new()
                .build()
                .decompose(black_box(&graph))
        })
    });

    c.bench_function("grid_random_restarts", |b| {
        b.iter(|| {
            WidthMinimizerBuilder::new()
                .strategy(RandomOrdering::new(42))
                .iteration_count(10)
                .build()
                .decompose(black_box(&graph))
        })
    });
}

criterion_group!(benches, orderings, decompositions);
criterion_main!(benches);
