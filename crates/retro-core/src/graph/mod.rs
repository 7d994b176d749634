//! Move graphs for win/lose analysis.
//!
//! # Overview
//!
//! A game position is a node; a legal move is a directed edge. This module
//! owns the in-memory representation and the two stages that turn raw text
//! into something the solver is allowed to touch.
//!
//! ## Pipeline
//!
//! ```text
//! "n m\nv u\n..."
//!        ↓  parse::parse()
//! Graph (no self-loops, no duplicate edges, indices in range)
//!        ↓  acyclic::validate()
//! Dag (Graph proven acyclic)
//!        ↓  reverse::ReverseAdjacency::from_graph()
//! ReverseAdjacency (predecessor lists, consumed by the solver)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use retro_core::graph::{acyclic, parse};
//!
//! let graph = parse::parse("3 2\n0 1\n1 2")?;
//! let dag = acyclic::validate(graph)?;
//! assert_eq!(dag.graph().edge_count(), 2);
//! # Ok::<(), retro_core::error::LoadError>(())
//! ```

pub mod acyclic;
pub mod matrix;
pub mod parse;
pub mod reverse;

use std::fmt;
use std::ops::Range;

use petgraph::graph::{DiGraph, NodeIndex};

pub use acyclic::{CycleDetected, Dag, is_acyclic, validate};
pub use matrix::{AdjacencyMatrix, DEFAULT_MAX_MATRIX_SIZE, MatrixTooLarge};
pub use parse::{GraphParser, MAX_NODES, Malformed, ParseError, ParseLimits, parse};
pub use reverse::ReverseAdjacency;

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// A directed move graph over nodes `0..node_count`.
///
/// Successor lists keep the order edges were read in. That order only
/// affects the order later stages visit successors, never a win/lose result.
///
/// Fields are private: a `Graph` only comes out of the parser, so every
/// value upholds "targets in range, no self-loops, no duplicate edges".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Graph {
    successors: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    pub(crate) fn from_successors(successors: Vec<Vec<usize>>) -> Self {
        let edge_count = successors.iter().map(Vec::len).sum();
        Self {
            successors,
            edge_count,
        }
    }

    /// Build a graph from `(from, to)` pairs with the same checks the text
    /// parser applies.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] hit: an endpoint outside
    /// `0..node_count`, a self-loop, or a repeated edge.
    pub fn from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, ParseError> {
        let mut builder = parse::EdgeSetBuilder::new(node_count)?;
        for (index, (from, to)) in edges.into_iter().enumerate() {
            builder.add(index, from, to)?;
        }
        Ok(builder.finish())
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.successors.len()
    }

    /// Number of edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Node indices, in order.
    #[must_use]
    pub fn nodes(&self) -> Range<usize> {
        0..self.successors.len()
    }

    /// Outgoing targets of `node`, in the order they were read.
    ///
    /// Empty for an index outside the graph.
    #[must_use]
    pub fn successors(&self, node: usize) -> &[usize] {
        self.successors.get(node).map_or(&[], Vec::as_slice)
    }

    /// Number of moves available from `node`.
    #[must_use]
    pub fn out_degree(&self, node: usize) -> usize {
        self.successors(node).len()
    }

    /// Forward adjacency: one successor list per node.
    #[must_use]
    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.successors
    }

    /// All edges `(from, to)` in adjacency order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(from, targets)| targets.iter().map(move |&to| (from, to)))
    }

    /// Serialize back to the text format the parser reads.
    ///
    /// Re-parsing the result yields an identical forward adjacency.
    #[must_use]
    pub fn to_edge_list(&self) -> String {
        self.to_string()
    }

    /// BLAKE3 hash of the serialized edge list, as `blake3:<hex>`.
    ///
    /// Two graphs hash equal exactly when their node counts and forward
    /// adjacency (including successor order) are equal.
    #[must_use]
    pub fn content_hash(&self) -> String {
        format!("blake3:{}", blake3::hash(self.to_edge_list().as_bytes()).to_hex())
    }

    /// Convert to a `petgraph` graph whose node weights are the node indices.
    ///
    /// Node `i` maps to `NodeIndex::new(i)`.
    #[must_use]
    pub fn to_digraph(&self) -> DiGraph<usize, ()> {
        let mut graph = DiGraph::with_capacity(self.node_count(), self.edge_count);
        for node in self.nodes() {
            graph.add_node(node);
        }
        for (from, to) in self.edges() {
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
        }
        graph
    }

    /// Build the predecessor view of this graph.
    #[must_use]
    pub fn reverse_adjacency(&self) -> ReverseAdjacency {
        ReverseAdjacency::from_graph(self)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.node_count(), self.edge_count)?;
        for (from, to) in self.edges() {
            writeln!(f, "{from} {to}")?;
        }
        Ok(())
    }
}
