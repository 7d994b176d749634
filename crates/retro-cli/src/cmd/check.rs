//! `retro check`: validate a graph without solving it.

use std::io::Write;

use clap::Args;
use retro_core::config::ProjectConfig;
use retro_core::graph::GraphParser;
use serde::Serialize;

use crate::cmd::{InputArgs, load_dag};
use crate::output::{OutputMode, pretty_kv, render_mode};

/// Arguments for `retro check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    valid: bool,
    nodes: usize,
    edges: usize,
    terminals: usize,
    content_hash: String,
}

/// Execute `retro check`.
pub fn run_check(
    args: &CheckArgs,
    output: OutputMode,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let parser = GraphParser::with_limits(config.limits);
    let dag = load_dag(&args.input.input, &parser, output)?;
    let graph = dag.graph();

    let payload = CheckOutput {
        valid: true,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        terminals: graph
            .nodes()
            .filter(|&node| graph.out_degree(node) == 0)
            .count(),
        content_hash: graph.content_hash(),
    };

    render_mode(
        output,
        &payload,
        |report, w| {
            writeln!(
                w,
                "ok\t{}\t{}\t{}",
                report.nodes, report.edges, report.content_hash
            )
        },
        render_check_pretty,
    )
}

fn render_check_pretty(report: &CheckOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "Graph is a valid DAG.")?;
    pretty_kv(w, "Nodes", report.nodes.to_string())?;
    pretty_kv(w, "Edges", report.edges.to_string())?;
    pretty_kv(w, "Terminals", report.terminals.to_string())?;
    pretty_kv(w, "Hash", &report.content_hash)
}
