//! Retrograde win/lose solver.
//!
//! # Overview
//!
//! Under normal play the player with no move loses. Working backward from
//! those terminal positions:
//!
//! - a node with a `Lose` successor is `Win` (move there),
//! - a node whose successors are all `Win` is `Lose`.
//!
//! # Algorithm
//!
//! Kahn-style propagation over the reverse adjacency:
//!
//! 1. `remaining[v]` starts at the out-degree of `v`.
//! 2. Every out-degree-0 node is labelled `Lose` and queued (index order).
//! 3. Pop `u`. For each predecessor `v` of `u`: if `u` is `Lose`, promote `v`
//!    to `Win`; then decrement `remaining[v]`, and when it hits zero `v` is
//!    finalized (still `Lose` unless promoted) and queued.
//! 4. Stop when the queue drains.
//!
//! Each edge is examined once, so the pass is `O(nodes + edges)`. A node
//! promoted to `Win` early is still only finalized when its last successor
//! has been processed; the trace exposes that order, so it is kept as is.
//!
//! Labels are held privately during the pass and only handed out as
//! [`Labels`] once every node is final.

mod trace;

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::{Dag, ReverseAdjacency};

pub use trace::{PredecessorStep, Trace, TraceStep};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Outcome for the player to move from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// The player to move can force a win.
    Win,
    /// Every move leads to a position the opponent wins, or there is no move.
    Lose,
}

impl Label {
    /// Returns `true` for [`Label::Win`].
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win)
    }

    /// Lowercase name, as used in serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Lose => "lose",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Final label of every node, indexed by node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Labels(Vec<Label>);

impl Labels {
    /// Label of `node`, or `None` outside the graph.
    #[must_use]
    pub fn get(&self, node: usize) -> Option<Label> {
        self.0.get(node).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Label] {
        &self.0
    }

    /// `(node, label)` pairs in node order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Label)> + '_ {
        self.0.iter().copied().enumerate()
    }

    /// Nodes labelled `Win`, ascending.
    pub fn winning(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter()
            .filter(|(_, label)| label.is_win())
            .map(|(node, _)| node)
    }

    /// Nodes labelled `Lose`, ascending.
    pub fn losing(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter()
            .filter(|(_, label)| !label.is_win())
            .map(|(node, _)| node)
    }
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Label every node of `dag`.
#[must_use]
pub fn solve(dag: &Dag) -> Labels {
    run(dag, &mut ())
}

/// Label every node of `dag` and record the propagation as a [`Trace`].
#[must_use]
pub fn solve_traced(dag: &Dag) -> (Labels, Trace) {
    let mut trace = Trace::default();
    let labels = run(dag, &mut trace);
    (labels, trace)
}

/// Receives the solver's internal events. Every hook defaults to a no-op.
pub(crate) trait Observer {
    /// `node` has no moves; labelled `Lose` and queued.
    fn seeded(&mut self, _node: usize) {}

    /// `node` left the queue with its final `label`.
    fn popped(&mut self, _node: usize, _label: Label) {}

    /// `predecessor` of the last popped node was examined; `finalized` is
    /// set when this examination exhausted its moves and queued it.
    fn examined(&mut self, _predecessor: usize, _finalized: bool) {}
}

impl Observer for () {}

#[instrument(skip_all, fields(nodes = dag.node_count(), edges = dag.graph().edge_count()))]
fn run<O: Observer>(dag: &Dag, observer: &mut O) -> Labels {
    let graph = dag.graph();
    let reverse = ReverseAdjacency::from_graph(graph);

    let mut remaining: Vec<usize> = graph.nodes().map(|node| graph.out_degree(node)).collect();
    let mut labels = vec![Label::Lose; graph.node_count()];
    let mut queue: VecDeque<usize> = VecDeque::new();

    for node in graph.nodes() {
        if remaining[node] == 0 {
            labels[node] = Label::Lose;
            queue.push_back(node);
            observer.seeded(node);
        }
    }
    debug!(terminals = queue.len(), "seeded terminal positions");

    while let Some(node) = queue.pop_front() {
        let label = labels[node];
        observer.popped(node, label);

        for &pred in reverse.predecessors(node) {
            if label == Label::Lose {
                labels[pred] = Label::Win;
            }
            remaining[pred] -= 1;
            let finalized = remaining[pred] == 0;
            if finalized {
                queue.push_back(pred);
            }
            observer.examined(pred, finalized);
        }
    }

    let labels = Labels(labels);
    debug!(
        winning = labels.winning().count(),
        losing = labels.losing().count(),
        "solved"
    );
    labels
}
