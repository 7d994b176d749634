//! Adjacency-matrix view of a graph, for table-style displays.

use serde::Serialize;

use crate::graph::Graph;

/// Largest side length rendered when no other limit is configured.
pub const DEFAULT_MAX_MATRIX_SIZE: usize = 2048;

/// The graph has more nodes than the matrix view is allowed to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("adjacency matrix for {size} nodes exceeds the limit of {limit}")]
pub struct MatrixTooLarge {
    pub size: usize,
    pub limit: usize,
}

/// Dense `n × n` grid where `cell(u, v)` is `true` iff `u → v` exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjacencyMatrix {
    size: usize,
    rows: Vec<Vec<bool>>,
}

impl AdjacencyMatrix {
    /// Build the grid for `graph`, which must have at most `max_size` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixTooLarge`] when `graph.node_count() > max_size`.
    pub fn from_graph(graph: &Graph, max_size: usize) -> Result<Self, MatrixTooLarge> {
        let size = graph.node_count();
        if size > max_size {
            return Err(MatrixTooLarge {
                size,
                limit: max_size,
            });
        }

        let mut rows = vec![vec![false; size]; size];
        for (from, to) in graph.edges() {
            rows[from][to] = true;
        }
        Ok(Self { size, rows })
    }

    /// Side length (node count).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Whether `from → to` exists. `false` outside the grid.
    #[must_use]
    pub fn cell(&self, from: usize, to: usize) -> bool {
        self.rows
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(false)
    }

    /// Rows in node order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }
}
