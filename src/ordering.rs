use crate::graph::Hypergraph;
use fnv::FnvHashMap;
use rand::prelude::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cmp::Reverse;

/// Produces an elimination ordering of the live vertices of a hypergraph.
///
/// Strategies may keep state between calls; the width-minimizing solver asks
/// for a fresh ordering every iteration.
pub trait OrderingStrategy {
    fn compute_ordering(&mut self, graph: &Hypergraph) -> Vec<usize>;
}

fn fill_in_count(graph: &Hypergraph, vertex: usize) -> usize {
    let nb = graph.neighborhood_of(vertex);
    let mut count = 0;
    for (i, &u) in nb.iter().enumerate() {
        for &w in &nb[i + 1..] {
            if !graph.is_neighbor(u, w) {
                count += 1;
            }
        }
    }
    count
}

/// Greedy minimum-fill: repeatedly eliminate the vertex whose elimination
/// adds the fewest fill edges, ties broken by smaller degree, then by
/// smaller id. Works on a clone of the input graph.
#[derive(Clone, Copy, Default)]
pub struct MinFillOrdering;

impl OrderingStrategy for MinFillOrdering {
    fn compute_ordering(&mut self, graph: &Hypergraph) -> Vec<usize> {
        let mut working = graph.clone();
        let mut order = Vec::with_capacity(working.vertex_count());
        while working.vertex_count() > 0 {
            let v = working
                .vertices()
                .min_by_key(|&v| {
                    (
                        fill_in_count(&working, v),
                        working.neighborhood_of(v).len(),
                        v,
                    )
                })
                .unwrap();
            order.push(v);
            working.eliminate_vertex(v, true);
        }
        order
    }
}

/// Greedy minimum-degree, ties broken by smaller id.
#[derive(Clone, Copy, Default)]
pub struct MinDegreeOrdering;

impl OrderingStrategy for MinDegreeOrdering {
    fn compute_ordering(&mut self, graph: &Hypergraph) -> Vec<usize> {
        let mut working = graph.clone();
        let mut order = Vec::with_capacity(working.vertex_count());
        while working.vertex_count() > 0 {
            let v = working
                .vertices()
                .min_by_key(|&v| (working.neighborhood_of(v).len(), v))
                .unwrap();
            order.push(v);
            working.eliminate_vertex(v, true);
        }
        order
    }
}

/// Maximum-cardinality search. Vertices are visited by descending count of
/// already-visited neighbors; the elimination ordering is the reverse visit
/// order.
#[derive(Clone, Copy, Default)]
pub struct MaxCardinalityOrdering;

impl OrderingStrategy for MaxCardinalityOrdering {
    fn compute_ordering(&mut self, graph: &Hypergraph) -> Vec<usize> {
        let mut weights: FnvHashMap<usize, usize> =
            graph.vertices().map(|v| (v, 0)).collect();
        let mut order = Vec::with_capacity(weights.len());

        while !weights.is_empty() {
            let v = weights
                .iter()
                .max_by_key(|(v, w)| (**w, Reverse(**v)))
                .map(|(v, _)| *v)
                .unwrap();
            weights.remove(&v);
            for u in graph.neighborhood_of(v) {
                if let Some(w) = weights.get_mut(u) {
                    *w += 1;
                }
            }
            order.push(v);
        }

        order.reverse();
        order
    }
}

/// Uniformly random permutation from a seeded generator. Successive calls
/// advance the generator, so repeated iterations see different orderings
/// while the whole sequence stays reproducible.
#[derive(Clone)]
pub struct RandomOrdering {
    rng: StdRng,
}

impl RandomOrdering {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SeedableRng::seed_from_u64(seed),
        }
    }
}

impl OrderingStrategy for RandomOrdering {
    fn compute_ordering(&mut self, graph: &Hypergraph) -> Vec<usize> {
        let mut order: Vec<usize> = graph.vertices().collect();
        order.shuffle(&mut self.rng);
        order
    }
}
