//! `retro solve`: label every node Win or Lose.

use std::io::Write;

use clap::Args;
use retro_core::config::ProjectConfig;
use retro_core::graph::GraphParser;
use retro_core::session::{Session, Solution};
use retro_core::solve::{Label, Trace};
use serde::Serialize;

use crate::cmd::{InputArgs, fail, join_nodes, read_or_report, reject};
use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `retro solve`.
#[derive(Args, Debug)]
pub struct SolveArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Also print the step-by-step propagation trace.
    #[arg(long)]
    pub trace: bool,
}

#[derive(Debug, Serialize)]
struct NodeReport {
    node: usize,
    label: Label,
    successors: Vec<usize>,
}

#[derive(Debug, Serialize)]
struct SolveOutput {
    nodes: usize,
    edges: usize,
    content_hash: String,
    winning: usize,
    losing: usize,
    labels: Vec<NodeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<Trace>,
}

/// Execute `retro solve`.
pub fn run_solve(
    args: &SolveArgs,
    output: OutputMode,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let text = read_or_report(&args.input.input, output)?;

    let mut session = Session::with_parser(GraphParser::with_limits(config.limits));
    session.load(&text).map_err(|err| reject(output, &err))?;

    let content_hash = session.content_hash().unwrap_or_default().to_owned();
    let graph = match session.dag() {
        Some(dag) => dag.graph().clone(),
        None => {
            let error = CliError::internal("graph missing after successful load");
            return Err(fail(output, &error, "internal error"));
        }
    };
    let Some(Solution { labels, trace }) = session.analyze() else {
        let error = CliError::internal("nothing to analyze after successful load");
        return Err(fail(output, &error, "internal error"));
    };

    let show_trace = args.trace || config.solve.trace;
    let payload = SolveOutput {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        content_hash,
        winning: labels.winning().count(),
        losing: labels.losing().count(),
        labels: labels
            .iter()
            .map(|(node, label)| NodeReport {
                node,
                label,
                successors: graph.successors(node).to_vec(),
            })
            .collect(),
        trace: show_trace.then(|| trace.clone()),
    };

    render_mode(output, &payload, render_solve_text, render_solve_pretty)
}

fn render_solve_text(payload: &SolveOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &payload.labels {
        writeln!(w, "{}\t{}\t{}", row.node, row.label, join_nodes(&row.successors))?;
    }
    if let Some(ref trace) = payload.trace {
        write!(w, "{trace}")?;
    }
    Ok(())
}

fn render_solve_pretty(payload: &SolveOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_kv(
        w,
        "Graph",
        format!("{} nodes, {} edges", payload.nodes, payload.edges),
    )?;
    pretty_kv(
        w,
        "Result",
        format!("{} win, {} lose", payload.winning, payload.losing),
    )?;
    writeln!(w)?;

    pretty_section(w, "Labels")?;
    if payload.labels.is_empty() {
        writeln!(w, "  (empty graph)")?;
    }
    for row in &payload.labels {
        writeln!(
            w,
            "  {:>6}  {:<4}  -> {}",
            row.node,
            row.label,
            join_nodes(&row.successors)
        )?;
    }

    if let Some(ref trace) = payload.trace {
        writeln!(w)?;
        pretty_section(w, "Trace")?;
        write!(w, "{trace}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro_core::solve::Label::{Lose, Win};

    fn payload(trace: Option<Trace>) -> SolveOutput {
        SolveOutput {
            nodes: 3,
            edges: 2,
            content_hash: "blake3:00".to_string(),
            winning: 1,
            losing: 2,
            labels: vec![
                NodeReport {
                    node: 0,
                    label: Lose,
                    successors: vec![1],
                },
                NodeReport {
                    node: 1,
                    label: Win,
                    successors: vec![2],
                },
                NodeReport {
                    node: 2,
                    label: Lose,
                    successors: vec![],
                },
            ],
            trace,
        }
    }

    #[test]
    fn solve_args_parse_trace_flag() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: SolveArgs,
        }

        let parsed = Wrapper::parse_from(["test", "graph.txt", "--trace"]);
        assert!(parsed.args.trace);
        assert_eq!(parsed.args.input.input.to_str(), Some("graph.txt"));
    }

    #[test]
    fn text_rows_are_tab_separated() {
        let mut out = Vec::new();
        render_solve_text(&payload(None), &mut out).expect("render");

        let rendered = String::from_utf8(out).expect("utf8");
        assert_eq!(rendered, "0\tlose\t1\n1\twin\t2\n2\tlose\t-\n");
    }

    #[test]
    fn pretty_has_summary_and_table() {
        let mut out = Vec::new();
        render_solve_pretty(&payload(None), &mut out).expect("render");

        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("3 nodes, 2 edges"));
        assert!(rendered.contains("1 win, 2 lose"));
        assert!(rendered.contains("Labels"));
        assert!(!rendered.contains("Trace"));
    }

    #[test]
    fn trace_appended_when_present() {
        let trace = Trace {
            terminals: vec![2],
            steps: Vec::new(),
        };
        let mut out = Vec::new();
        render_solve_pretty(&payload(Some(trace)), &mut out).expect("render");

        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("Nodes without outgoing moves: 2"));
    }

    #[test]
    fn json_omits_absent_trace() {
        let value = serde_json::to_value(payload(None)).expect("serialize");
        assert!(value.get("trace").is_none());
        assert_eq!(value["labels"][1]["label"], "win");
    }
}
