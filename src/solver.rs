use crate::bucket_elimination::{BucketEliminationAlgorithm, BuildError};
use crate::cancellation::Cancellation;
use crate::graph::Hypergraph;
use crate::manipulation::{apply_pipeline, InducedEdgesOperation, ManipulationOperation};
use crate::ordering::{MinFillOrdering, OrderingStrategy};
use crate::tree_decomposition::TreeDecomposition;
use log::debug;

pub struct WidthMinimizerBuilder<S: OrderingStrategy> {
    strategy: S,
    iteration_count: usize,
    non_improvement_limit: Option<usize>,
    compression_enabled: bool,
    compute_induced_edges_enabled: bool,
    cancellation: Cancellation,
}

impl WidthMinimizerBuilder<MinFillOrdering> {
    pub fn new() -> Self {
        Self {
            strategy: MinFillOrdering,
            iteration_count: 1,
            non_improvement_limit: None,
            compression_enabled: true,
            compute_induced_edges_enabled: false,
            cancellation: Cancellation::new(),
        }
    }
}

impl Default for WidthMinimizerBuilder<MinFillOrdering> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: OrderingStrategy> WidthMinimizerBuilder<S> {
    /// Replaces the ordering strategy.
    pub fn strategy<T: OrderingStrategy>(self, strategy: T) -> WidthMinimizerBuilder<T> {
        WidthMinimizerBuilder {
            strategy,
            iteration_count: self.iteration_count,
            non_improvement_limit: self.non_improvement_limit,
            compression_enabled: self.compression_enabled,
            compute_induced_edges_enabled: self.compute_induced_edges_enabled,
            cancellation: self.cancellation,
        }
    }

    impl_setter!(self, iteration_count, usize);
    impl_setter!(self, non_improvement_limit, Option<usize>);
    impl_setter!(self, compression_enabled, bool);
    impl_setter!(self, compute_induced_edges_enabled, bool);
    impl_setter!(self, cancellation, Cancellation);

    pub fn build(self) -> WidthMinimizer<S> {
        WidthMinimizer {
            algorithm: BucketEliminationAlgorithm::new(),
            strategy: self.strategy,
            iteration_count: self.iteration_count,
            non_improvement_limit: self.non_improvement_limit,
            compression_enabled: self.compression_enabled,
            compute_induced_edges_enabled: self.compute_induced_edges_enabled,
            cancellation: self.cancellation,
        }
    }
}

/// Best-of-k search for a low-width decomposition.
///
/// Every iteration asks the ordering strategy for a fresh elimination
/// ordering, builds a decomposition from it with a bag-size limit one below
/// the best known, and keeps the candidate iff it improves on the best.
/// Candidates that cannot beat the best abort early inside the builder.
///
/// An `iteration_count` of `0` keeps iterating until the non-improvement
/// limit trips or the cancellation flag is raised.
pub struct WidthMinimizer<S: OrderingStrategy> {
    algorithm: BucketEliminationAlgorithm,
    strategy: S,
    iteration_count: usize,
    non_improvement_limit: Option<usize>,
    compression_enabled: bool,
    compute_induced_edges_enabled: bool,
    cancellation: Cancellation,
}

impl<S: OrderingStrategy> WidthMinimizer<S> {
    pub fn decompose(&mut self, graph: &Hypergraph) -> Option<TreeDecomposition> {
        self.decompose_with(graph, Vec::new(), |_, _, _| {})
    }

    /// Runs the search with a template set of manipulation operations and a
    /// progress callback invoked after every completed iteration with the
    /// candidate and its maximum bag size.
    ///
    /// The operations are consumed; each iteration works on clones of the
    /// template set. The returned decomposition belongs to the caller.
    pub fn decompose_with<F>(
        &mut self,
        graph: &Hypergraph,
        operations: Vec<Box<dyn ManipulationOperation>>,
        mut progress: F,
    ) -> Option<TreeDecomposition>
    where
        F: FnMut(&Hypergraph, &TreeDecomposition, usize),
    {
        let mut best: Option<TreeDecomposition> = None;
        let mut best_max_bag_size = usize::MAX;
        let mut iteration: usize = 0;
        let mut since_improvement: usize = 0;

        while (self.iteration_count == 0 || iteration < self.iteration_count)
            && !self.cancellation.is_cancelled()
        {
            let ordering = self.strategy.compute_ordering(graph);
            let limit = best.as_ref().map(|_| best_max_bag_size.saturating_sub(1));

            match self
                .algorithm
                .compute(graph, &ordering, limit, &self.cancellation)
            {
                Ok(mut candidate) => {
                    if self.compression_enabled {
                        candidate.compress();
                    }

                    let mut iteration_ops: Vec<Box<dyn ManipulationOperation>> =
                        Vec::with_capacity(operations.len() + 1);
                    if self.compute_induced_edges_enabled {
                        iteration_ops.push(Box::new(InducedEdgesOperation::new()));
                    }
                    iteration_ops.extend(operations.iter().cloned());

                    match apply_pipeline(graph, &mut candidate, &iteration_ops) {
                        Ok(()) => {
                            let max_bag_size = candidate.max_bag_size();
                            progress(graph, &candidate, max_bag_size);
                            if max_bag_size < best_max_bag_size {
                                debug!(
                                    "iteration {}: improved max bag size to {}",
                                    iteration, max_bag_size
                                );
                                best = Some(candidate);
                                best_max_bag_size = max_bag_size;
                                since_improvement = 0;
                            } else {
                                since_improvement += 1;
                            }
                        }
                        Err(e) => {
                            debug!("iteration {}: discarding candidate: {}", iteration, e);
                            since_improvement += 1;
                        }
                    }
                }
                Err(BuildError::Cancelled) => break,
                Err(BuildError::BudgetExhausted) => {
                    since_improvement += 1;
                }
                Err(BuildError::InvalidOrdering(v)) => {
                    debug!("iteration {}: invalid ordering at vertex {}", iteration, v);
                    since_improvement += 1;
                }
            }

            iteration += 1;
            if let Some(limit) = self.non_improvement_limit {
                if since_improvement >= limit {
                    break;
                }
            }
        }
        best
    }

    pub fn cancellation(&self) -> &Cancellation {
        &self.cancellation
    }
}

#[cfg(test)]
mod tests {
    use super::WidthMinimizerBuilder;
    use crate::cancellation::Cancellation;
    use crate::graph::Hypergraph;
    use crate::manipulation::{CompressionOperation, ManipulationOperation};
    use crate::ordering::RandomOrdering;
    use crate::verifier::TreeDecompositionVerifier;
    use std::cell::Cell;

    fn triangle() -> Hypergraph {
        Hypergraph::from_edges(vec![vec![1, 2], vec![1, 3], vec![2, 3]]).unwrap()
    }

    #[test]
    fn single_iteration_on_triangle() {
        let graph = triangle();
        let td = WidthMinimizerBuilder::new()
            .build()
            .decompose(&graph)
            .unwrap();
        assert_eq!(td.max_bag_size(), 3);
        assert!(TreeDecompositionVerifier::new().verify(&graph, &td).is_ok());
    }

    #[test]
    fn later_iterations_are_pruned_once_the_optimum_is_found() {
        // width 2 is optimal for a triangle, so every iteration after the
        // first aborts against the limit of 2 and the first tree survives
        let graph = triangle();
        let completed = Cell::new(0usize);
        let td = WidthMinimizerBuilder::new()
            .iteration_count(100)
            .build()
            .decompose_with(&graph, Vec::new(), |_, _, max_bag_size| {
                completed.set(completed.get() + 1);
                assert_eq!(max_bag_size, 3);
            })
            .unwrap();
        assert_eq!(completed.get(), 1);
        assert_eq!(td.max_bag_size(), 3);
    }

    #[test]
    fn non_improvement_limit_stops_an_unbounded_run() {
        let graph = triangle();
        let completed = Cell::new(0usize);
        let td = WidthMinimizerBuilder::new()
            .iteration_count(0)
            .non_improvement_limit(Some(5))
            .build()
            .decompose_with(&graph, Vec::new(), |_, _, _| {
                completed.set(completed.get() + 1);
            })
            .unwrap();
        assert_eq!(completed.get(), 1);
        assert_eq!(td.max_bag_size(), 3);
    }

    #[test]
    fn cancellation_returns_best_so_far() {
        let graph = triangle();
        let cancellation = Cancellation::new();
        let handle = cancellation.clone();
        let td = WidthMinimizerBuilder::new()
            .iteration_count(0)
            .cancellation(cancellation)
            .build()
            .decompose_with(&graph, Vec::new(), move |_, _, _| {
                handle.cancel();
            })
            .unwrap();
        assert_eq!(td.max_bag_size(), 3);
    }

    #[test]
    fn cancelled_run_without_iterations_returns_none() {
        let graph = triangle();
        let cancellation = Cancellation::new();
        cancellation.cancel();
        let result = WidthMinimizerBuilder::new()
            .iteration_count(0)
            .cancellation(cancellation)
            .build()
            .decompose(&graph);
        assert!(result.is_none());
    }

    #[test]
    fn random_restarts_never_increase_the_result_width() {
        let graph = Hypergraph::from_edges(vec![
            vec![1, 2],
            vec![2, 3],
            vec![3, 4],
            vec![4, 5],
            vec![5, 1],
            vec![2, 5],
            vec![3, 5],
        ])
        .unwrap();

        let single = WidthMinimizerBuilder::new()
            .strategy(RandomOrdering::new(99))
            .iteration_count(1)
            .build()
            .decompose(&graph)
            .unwrap();
        let many = WidthMinimizerBuilder::new()
            .strategy(RandomOrdering::new(99))
            .iteration_count(20)
            .build()
            .decompose(&graph)
            .unwrap();

        assert!(many.max_bag_size() <= single.max_bag_size());
        assert!(TreeDecompositionVerifier::new().verify(&graph, &many).is_ok());
    }

    #[test]
    fn induced_edges_are_attached_when_enabled() {
        let graph = Hypergraph::from_edges(vec![vec![1, 2], vec![2, 3]]).unwrap();
        let td = WidthMinimizerBuilder::new()
            .compute_induced_edges_enabled(true)
            .build()
            .decompose(&graph)
            .unwrap();
        let attached: usize = td.bags().iter().map(|b| b.induced_edges.len()).sum();
        assert_eq!(attached, graph.edge_count());
    }

    #[test]
    fn manipulation_operations_are_consumed_and_cloned_per_iteration() {
        let graph = triangle();
        let operations: Vec<Box<dyn ManipulationOperation>> =
            vec![Box::new(CompressionOperation::new())];
        let td = WidthMinimizerBuilder::new()
            .iteration_count(3)
            .compression_enabled(false)
            .build()
            .decompose_with(&graph, operations, |_, _, _| {})
            .unwrap();
        // compression ran as a pipeline operation
        assert_eq!(td.bags().len(), 1);
        assert!(TreeDecompositionVerifier::new().verify(&graph, &td).is_ok());
    }

    #[test]
    fn empty_graph_yields_an_empty_decomposition() {
        let graph = Hypergraph::new();
        let td = WidthMinimizerBuilder::new()
            .iteration_count(3)
            .build()
            .decompose(&graph)
            .unwrap();
        assert!(td.bags().is_empty());
    }
}
