//! `retro matrix`: print the adjacency matrix.

use std::io::Write;

use clap::Args;
use retro_core::config::ProjectConfig;
use retro_core::graph::{AdjacencyMatrix, GraphParser};

use crate::cmd::{InputArgs, fail, load_dag};
use crate::output::{CliError, OutputMode, render_mode};

/// Arguments for `retro matrix`.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute `retro matrix`.
pub fn run_matrix(
    args: &MatrixArgs,
    output: OutputMode,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let parser = GraphParser::with_limits(config.limits);
    let dag = load_dag(&args.input.input, &parser, output)?;
    let matrix = AdjacencyMatrix::from_graph(dag.graph(), config.matrix.max_size).map_err(|err| {
        fail(
            output,
            &CliError::matrix_too_large(&err),
            "graph too large for matrix view",
        )
    })?;

    render_mode(output, &matrix, render_matrix_text, render_matrix_pretty)
}

fn render_matrix_text(matrix: &AdjacencyMatrix, w: &mut dyn Write) -> std::io::Result<()> {
    for row in matrix.rows() {
        let cells: Vec<&str> = row
            .iter()
            .map(|&edge| if edge { "1" } else { "0" })
            .collect();
        writeln!(w, "{}", cells.join(" "))?;
    }
    Ok(())
}

fn render_matrix_pretty(matrix: &AdjacencyMatrix, w: &mut dyn Write) -> std::io::Result<()> {
    let width = matrix.size().saturating_sub(1).to_string().len();

    write!(w, "{:>width$} ", "")?;
    for to in 0..matrix.size() {
        write!(w, " {to:>width$}")?;
    }
    writeln!(w)?;

    for (from, row) in matrix.rows().iter().enumerate() {
        write!(w, "{from:>width$} ")?;
        for &edge in row {
            write!(w, " {:>width$}", if edge { "x" } else { "." })?;
        }
        writeln!(w)?;
    }
    Ok(())
}
