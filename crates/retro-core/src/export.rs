//! Graphviz export for drawing a solved graph.
//!
//! Nodes are coloured by label: `Lose` red, `Win` green. Unlabelled exports
//! use Graphviz defaults.

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};

use crate::graph::Dag;
use crate::solve::{Label, Labels};

/// Graphviz colour for a label.
#[must_use]
pub const fn label_color(label: Label) -> &'static str {
    match label {
        Label::Win => "green",
        Label::Lose => "red",
    }
}

type DotGraph = DiGraph<usize, &'static str>;

/// Render `dag` as a DOT document, coloured by `labels` when given.
#[must_use]
pub fn to_dot(dag: &Dag, labels: Option<&Labels>) -> String {
    // Dot needs displayable edge weights; edges carry an empty label.
    let graph: DotGraph = dag.graph().to_digraph().map(|_, &node| node, |_, _| "");

    let edge_attrs = |_: &DotGraph, _: EdgeReference<'_, &'static str>| String::new();
    let node_attrs = |_: &DotGraph, (idx, _): (NodeIndex, &usize)| -> String {
        labels
            .and_then(|labels| labels.get(idx.index()))
            .map_or_else(String::new, |label| {
                format!("color = {} ", label_color(label))
            })
    };

    let dot = Dot::with_attr_getters(&graph, &[Config::EdgeNoLabel], &edge_attrs, &node_attrs);
    format!("{dot}")
}
