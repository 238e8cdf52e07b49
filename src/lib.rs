//! Heuristic tree decompositions of hypergraphs.
//!
//! The crate is built around three pieces: a mutable [`Hypergraph`] with
//! tombstoned vertex deletion, a bucket-elimination builder that turns an
//! elimination ordering into a labeled tree of bags, and a width-minimizing
//! solver that repeatedly asks a pluggable [`OrderingStrategy`] for orderings
//! and keeps the best decomposition it sees. An independent verifier checks
//! the three decomposition properties of any candidate tree.
//!
//! [`Hypergraph`]: graph::Hypergraph
//! [`OrderingStrategy`]: ordering::OrderingStrategy

#[macro_use]
pub(crate) mod macros {
    macro_rules! impl_setter {
        ($self:ident, $field:ident, $type:ty) => {
            pub fn $field(mut $self, $field: $type) -> Self {
                $self.$field = $field;
                $self
            }
        }
    }
}

pub(crate) mod datastructures;

pub mod bucket_elimination;
pub mod cancellation;
pub mod graph;
pub mod log;
pub mod manipulation;
pub mod ordering;
pub mod solver;
pub mod tree_decomposition;
pub mod verifier;

#[cfg(feature = "handle-ctrlc")]
pub mod signals;

pub use bucket_elimination::{BucketEliminationAlgorithm, BuildError};
pub use cancellation::Cancellation;
pub use graph::{GraphError, Hyperedge, Hypergraph};
pub use manipulation::{
    CompressionOperation, InducedEdgesOperation, ManipulationError, ManipulationOperation,
};
pub use ordering::{
    MaxCardinalityOrdering, MinDegreeOrdering, MinFillOrdering, OrderingStrategy,
    RandomOrdering,
};
pub use solver::{WidthMinimizer, WidthMinimizerBuilder};
pub use tree_decomposition::{Bag, LabelValue, TreeDecomposition};
pub use verifier::{TreeDecompositionVerifier, VerificationError};
