//! Acyclicity validation.
//!
//! Win/lose labels are only defined on finite DAGs, so every parsed graph
//! passes through [`validate`] before it can reach the solver. The result,
//! [`Dag`], is the only type the solver accepts.
//!
//! # Algorithm
//!
//! Depth-first search with three colours per node (unvisited, in progress,
//! done). Reaching an in-progress node means the edge closes a cycle. Roots
//! are tried in index order and successors in insertion order.
//!
//! The search keeps an explicit stack of `(node, next successor index)`
//! frames rather than recursing, so long move chains cannot exhaust the call
//! stack.

#![allow(clippy::module_name_repetitions)]

use std::fmt;

use tracing::{debug, instrument, warn};

use crate::graph::Graph;

/// The graph contains a cycle.
///
/// `cycle` is a closed walk `w → … → w` found by the search, starting and
/// ending at the node the closing edge points to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cycle detected: {}", format_path(.cycle))]
pub struct CycleDetected {
    pub cycle: Vec<usize>,
}

/// A [`Graph`] that is known to be acyclic.
///
/// Only [`validate`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dag {
    graph: Graph,
}

impl Dag {
    /// The validated graph.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Give back the underlying graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

/// Returns `true` if `graph` has no directed cycle.
#[must_use]
pub fn is_acyclic(graph: &Graph) -> bool {
    find_cycle(graph).is_none()
}

/// Check the whole graph for cycles and wrap it as a [`Dag`].
///
/// # Errors
///
/// Returns [`CycleDetected`] with the first cycle the search closes.
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn validate(graph: Graph) -> Result<Dag, CycleDetected> {
    match find_cycle(&graph) {
        Some(cycle) => {
            warn!(cycle = %format_path(&cycle), "graph rejected: cycle");
            Err(CycleDetected { cycle })
        }
        None => {
            debug!("graph is acyclic");
            Ok(Dag { graph })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Unvisited,
    InProgress,
    Done,
}

fn find_cycle(graph: &Graph) -> Option<Vec<usize>> {
    let mut color = vec![Color::Unvisited; graph.node_count()];
    // Each frame: (node, index of the next successor to try).
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in graph.nodes() {
        if color[root] != Color::Unvisited {
            continue;
        }
        color[root] = Color::InProgress;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let Some(&succ) = graph.successors(node).get(next) else {
                color[node] = Color::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match color[succ] {
                Color::InProgress => return Some(cycle_from_stack(&stack, succ)),
                Color::Unvisited => {
                    color[succ] = Color::InProgress;
                    stack.push((succ, 0));
                }
                Color::Done => {}
            }
        }
    }

    None
}

/// The in-progress nodes are exactly the stack; the cycle is the stack
/// suffix starting at `closing`, closed by returning to `closing`.
fn cycle_from_stack(stack: &[(usize, usize)], closing: usize) -> Vec<usize> {
    let start = stack
        .iter()
        .position(|&(node, _)| node == closing)
        .unwrap_or(0);
    let mut cycle: Vec<usize> = stack[start..].iter().map(|&(node, _)| node).collect();
    cycle.push(closing);
    cycle
}

fn format_path(path: &[usize]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl fmt::Display for Dag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.graph, f)
    }
}
