use crate::graph::Hypergraph;
use crate::tree_decomposition::TreeDecomposition;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManipulationError(pub String);

impl Display for ManipulationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Manipulation Failed: {}", self.0)
    }
}

impl std::error::Error for ManipulationError {}

/// Post-processing transform applied to a decomposition in place.
///
/// Operations must preserve the three decomposition properties. They are
/// composable; the caller declares the order. `boxed_clone` lets a template
/// set of operations be re-instantiated for every solver iteration.
pub trait ManipulationOperation {
    fn apply(
        &self,
        graph: &Hypergraph,
        td: &mut TreeDecomposition,
    ) -> Result<(), ManipulationError>;

    fn boxed_clone(&self) -> Box<dyn ManipulationOperation>;
}

impl Clone for Box<dyn ManipulationOperation> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// Applies the operations in the given order, stopping at the first failure.
pub fn apply_pipeline(
    graph: &Hypergraph,
    td: &mut TreeDecomposition,
    operations: &[Box<dyn ManipulationOperation>],
) -> Result<(), ManipulationError> {
    for operation in operations {
        operation.apply(graph, td)?;
    }
    Ok(())
}

/// Contracts bags that are subsets of a tree neighbor.
#[derive(Clone, Copy, Default)]
pub struct CompressionOperation;

impl CompressionOperation {
    pub fn new() -> Self {
        Self
    }
}

impl ManipulationOperation for CompressionOperation {
    fn apply(
        &self,
        _graph: &Hypergraph,
        td: &mut TreeDecomposition,
    ) -> Result<(), ManipulationError> {
        td.compress();
        Ok(())
    }

    fn boxed_clone(&self) -> Box<dyn ManipulationOperation> {
        Box::new(*self)
    }
}

/// Attaches every hyperedge to the first bag containing all its endpoints.
#[derive(Clone, Copy, Default)]
pub struct InducedEdgesOperation;

impl InducedEdgesOperation {
    pub fn new() -> Self {
        Self
    }
}

impl ManipulationOperation for InducedEdgesOperation {
    fn apply(
        &self,
        graph: &Hypergraph,
        td: &mut TreeDecomposition,
    ) -> Result<(), ManipulationError> {
        for bag in &mut td.bags {
            bag.induced_edges.clear();
        }
        for edge in graph.edges() {
            let covering = td.bags.iter().position(|b| {
                edge.endpoints().iter().all(|v| b.vertex_set.contains(v))
            });
            match covering {
                Some(bag) => td.bags[bag].induced_edges.push(edge.id()),
                None => {
                    return Err(ManipulationError(format!(
                        "edge {} is not covered by any bag",
                        edge.id()
                    )))
                }
            }
        }
        Ok(())
    }

    fn boxed_clone(&self) -> Box<dyn ManipulationOperation> {
        Box::new(*self)
    }
}
