//! Predecessor lists, the backward view the solver walks.

use crate::graph::Graph;

/// For each node `v`, every `u` with an edge `u → v`.
///
/// Built by scanning nodes in index order and each node's successors in
/// insertion order, so every predecessor list is ascending. Derived from a
/// [`Graph`] and never mutated on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseAdjacency {
    predecessors: Vec<Vec<usize>>,
}

impl ReverseAdjacency {
    /// Invert the forward adjacency of `graph`.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        let mut predecessors = vec![Vec::new(); graph.node_count()];
        for (from, to) in graph.edges() {
            predecessors[to].push(from);
        }
        Self { predecessors }
    }

    /// Nodes with a move into `node`. Empty for an index outside the graph.
    #[must_use]
    pub fn predecessors(&self, node: usize) -> &[usize] {
        self.predecessors.get(node).map_or(&[], Vec::as_slice)
    }

    /// Number of moves into `node`.
    #[must_use]
    pub fn in_degree(&self, node: usize) -> usize {
        self.predecessors(node).len()
    }

    /// Number of nodes covered.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.predecessors.len()
    }
}
