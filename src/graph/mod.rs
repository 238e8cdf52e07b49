pub use hypergraph::{GraphError, Hyperedge, Hypergraph};

mod hypergraph;
