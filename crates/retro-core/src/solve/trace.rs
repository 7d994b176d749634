//! Step-by-step record of a solver run.
//!
//! The trace is a pass-through of the solver's queue events with no logic of
//! its own. Its [`Display`](std::fmt::Display) form is the narrated log shown
//! to users: terminals first, then one block per dequeued node listing each
//! predecessor examined.

use std::fmt;

use serde::Serialize;

use super::{Label, Observer};

/// One predecessor examined while processing a dequeued node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredecessorStep {
    pub node: usize,
    /// This examination used up the predecessor's last move, finalizing its
    /// label and queueing it.
    pub finalized: bool,
}

/// Processing of one dequeued node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceStep {
    pub node: usize,
    pub label: Label,
    pub predecessors: Vec<PredecessorStep>,
}

/// Full record of one solver run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trace {
    /// Nodes with no moves, seeded as `Lose`, in seeding order.
    pub terminals: Vec<usize>,
    /// Dequeued nodes, in queue order.
    pub steps: Vec<TraceStep>,
}

impl Trace {
    /// Order in which nodes were finalized: terminals at seeding, then every
    /// other node at the examination that exhausted its moves.
    #[must_use]
    pub fn finalize_order(&self) -> Vec<usize> {
        let mut order = self.terminals.clone();
        order.extend(
            self.steps
                .iter()
                .flat_map(|step| step.predecessors.iter())
                .filter(|pred| pred.finalized)
                .map(|pred| pred.node),
        );
        order
    }
}

impl Observer for Trace {
    fn seeded(&mut self, node: usize) {
        self.terminals.push(node);
    }

    fn popped(&mut self, node: usize, label: Label) {
        self.steps.push(TraceStep {
            node,
            label,
            predecessors: Vec::new(),
        });
    }

    fn examined(&mut self, predecessor: usize, finalized: bool) {
        if let Some(step) = self.steps.last_mut() {
            step.predecessors.push(PredecessorStep {
                node: predecessor,
                finalized,
            });
        }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terminals = self
            .terminals
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Nodes without outgoing moves: {terminals}")?;
        writeln!(f, "Retrograde analysis started.")?;

        for step in &self.steps {
            writeln!(f, "Predecessors of {} ({}):", step.node, step.label)?;
            for pred in &step.predecessors {
                if pred.finalized {
                    writeln!(
                        f,
                        "    node {}: outgoing moves exhausted, queued",
                        pred.node
                    )?;
                } else {
                    writeln!(f, "    node {}", pred.node)?;
                }
            }
        }
        Ok(())
    }
}
