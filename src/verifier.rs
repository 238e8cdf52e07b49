use crate::datastructures::BitSet;
use crate::graph::Hypergraph;
use crate::tree_decomposition::TreeDecomposition;
use fnv::FnvHashSet;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    MissingVertices(Vec<usize>),
    UncoveredEdges(Vec<usize>),
    DisconnectedVertices(Vec<usize>),
}

impl Display for VerificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let render = |values: &[usize]| {
            values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self {
            VerificationError::MissingVertices(vs) => {
                write!(f, "Missing Vertices: {}", render(vs))
            }
            VerificationError::UncoveredEdges(es) => {
                write!(f, "Uncovered Edges: {}", render(es))
            }
            VerificationError::DisconnectedVertices(vs) => {
                write!(f, "Not Inducing Subtree: {}", render(vs))
            }
        }
    }
}

impl std::error::Error for VerificationError {}

/// Checks the three tree-decomposition properties of a candidate tree
/// against a source hypergraph. Verification is pure; neither input is
/// mutated.
#[derive(Clone, Copy, Default)]
pub struct TreeDecompositionVerifier;

impl TreeDecompositionVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Conjunction of the three property checks, stopping at the first
    /// failing one.
    pub fn verify(
        &self,
        graph: &Hypergraph,
        td: &TreeDecomposition,
    ) -> Result<(), VerificationError> {
        let missing = self.violations_vertex_existence(graph, td);
        if !missing.is_empty() {
            return Err(VerificationError::MissingVertices(missing));
        }
        let uncovered = self.violations_edge_coverage(graph, td);
        if !uncovered.is_empty() {
            return Err(VerificationError::UncoveredEdges(uncovered));
        }
        let disconnected = self.violations_connectedness(graph, td);
        if !disconnected.is_empty() {
            return Err(VerificationError::DisconnectedVertices(disconnected));
        }
        Ok(())
    }

    pub fn verify_vertex_existence(&self, graph: &Hypergraph, td: &TreeDecomposition) -> bool {
        self.violations_vertex_existence(graph, td).is_empty()
    }

    pub fn verify_edge_coverage(&self, graph: &Hypergraph, td: &TreeDecomposition) -> bool {
        self.violations_edge_coverage(graph, td).is_empty()
    }

    pub fn verify_connectedness(&self, graph: &Hypergraph, td: &TreeDecomposition) -> bool {
        self.violations_connectedness(graph, td).is_empty()
    }

    /// Graph vertices not appearing in any bag, ascending.
    pub fn violations_vertex_existence(
        &self,
        graph: &Hypergraph,
        td: &TreeDecomposition,
    ) -> Vec<usize> {
        let mut covered: FnvHashSet<usize> = FnvHashSet::default();
        for bag in td.bags() {
            covered.extend(bag.vertex_set.iter().copied());
        }
        graph.vertices().filter(|v| !covered.contains(v)).collect()
    }

    /// Ids of hyperedges whose endpoints fit in no single bag.
    pub fn violations_edge_coverage(
        &self,
        graph: &Hypergraph,
        td: &TreeDecomposition,
    ) -> Vec<usize> {
        graph
            .edges()
            .iter()
            .filter(|e| {
                !td.bags().iter().any(|b| {
                    e.endpoints().iter().all(|v| b.vertex_set.contains(v))
                })
            })
            .map(|e| e.id())
            .collect()
    }

    /// Vertices whose bags do not induce a connected subtree, ascending.
    pub fn violations_connectedness(
        &self,
        graph: &Hypergraph,
        td: &TreeDecomposition,
    ) -> Vec<usize> {
        let mut violations = Vec::new();
        for v in graph.vertices() {
            let filter: Vec<usize> = td
                .bags()
                .iter()
                .filter(|b| b.vertex_set.contains(&v))
                .map(|b| b.id)
                .collect();
            if filter.len() <= 1 {
                continue;
            }

            let members = BitSet::from_slice(td.bags().len(), &filter);
            let mut reached = BitSet::new(td.bags().len());
            reached.set_bit(filter[0]);
            let mut stack = vec![filter[0]];
            while let Some(b) = stack.pop() {
                let bag = &td.bags()[b];
                for n in bag.parent.iter().chain(bag.children.iter()) {
                    if members.at(*n) && !reached.set_bit(*n) {
                        stack.push(*n);
                    }
                }
            }
            if reached.cardinality() < filter.len() {
                violations.push(v);
            }
        }
        violations
    }
}
