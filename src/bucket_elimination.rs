use crate::cancellation::Cancellation;
use crate::graph::Hypergraph;
use crate::tree_decomposition::TreeDecomposition;
use fnv::{FnvHashMap, FnvHashSet};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The ordering is not a permutation of the live vertices; carries the
    /// offending vertex.
    InvalidOrdering(usize),
    /// A bag exceeded the caller-supplied size limit.
    BudgetExhausted,
    Cancelled,
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidOrdering(v) => write!(f, "Invalid Ordering: {}", v),
            BuildError::BudgetExhausted => write!(f, "Budget Exhausted"),
            BuildError::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::error::Error for BuildError {}

/// Bucket elimination: eliminates vertices along a given ordering, records
/// each vertex's closed neighborhood in the working graph as its bag, and
/// links every bag to the bag of the earliest-eliminated remaining member.
///
/// The resulting forest has one root per connected component of the input
/// graph and satisfies the three tree-decomposition properties by
/// construction.
#[derive(Clone, Copy, Default)]
pub struct BucketEliminationAlgorithm;

impl BucketEliminationAlgorithm {
    pub fn new() -> Self {
        Self
    }

    /// Builds a decomposition of `graph` along `ordering`.
    ///
    /// With `max_bag_size_limit` the construction aborts with
    /// [`BuildError::BudgetExhausted`] as soon as any bag grows beyond the
    /// limit, letting callers prune candidates that cannot beat a known
    /// decomposition. The cancellation flag is polled between elimination
    /// steps.
    pub fn compute(
        &self,
        graph: &Hypergraph,
        ordering: &[usize],
        max_bag_size_limit: Option<usize>,
        cancellation: &Cancellation,
    ) -> Result<TreeDecomposition, BuildError> {
        self.validate_ordering(graph, ordering)?;

        let mut working = graph.clone();
        let mut position: FnvHashMap<usize, usize> =
            FnvHashMap::with_capacity_and_hasher(ordering.len(), Default::default());
        let mut bags: Vec<FnvHashSet<usize>> = Vec::with_capacity(ordering.len());

        for (step, &v) in ordering.iter().enumerate() {
            if cancellation.is_cancelled() {
                return Err(BuildError::Cancelled);
            }
            let mut bag: FnvHashSet<usize> =
                working.neighborhood_of(v).iter().copied().collect();
            bag.insert(v);
            if let Some(limit) = max_bag_size_limit {
                if bag.len() > limit {
                    return Err(BuildError::BudgetExhausted);
                }
            }
            position.insert(v, step);
            bags.push(bag);
            working.eliminate_vertex(v, true);
        }

        let mut td = TreeDecomposition::with_capacity(bags.len());
        for bag in &bags {
            td.add_bag(bag.clone());
        }
        for (step, &v) in ordering.iter().enumerate() {
            // parent is the bag of the earliest-eliminated other member;
            // all of them come after `step` by construction
            let parent = bags[step]
                .iter()
                .filter(|u| **u != v)
                .map(|u| position[u])
                .min();
            if let Some(parent) = parent {
                td.set_parent(step, parent);
            }
        }
        Ok(td)
    }

    fn validate_ordering(
        &self,
        graph: &Hypergraph,
        ordering: &[usize],
    ) -> Result<(), BuildError> {
        let mut seen: FnvHashSet<usize> =
            FnvHashSet::with_capacity_and_hasher(ordering.len(), Default::default());
        for &v in ordering {
            if !graph.is_vertex(v) || !seen.insert(v) {
                return Err(BuildError::InvalidOrdering(v));
            }
        }
        if ordering.len() != graph.vertex_count() {
            let missing = graph.vertices().find(|v| !seen.contains(v)).unwrap();
            return Err(BuildError::InvalidOrdering(missing));
        }
        Ok(())
    }
}
