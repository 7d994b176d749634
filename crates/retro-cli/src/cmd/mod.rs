//! Subcommand handlers and the input plumbing they share.

pub mod check;
pub mod completions;
pub mod dot;
pub mod matrix;
pub mod solve;

use std::path::{Path, PathBuf};

use clap::Args;
use retro_core::error::LoadError;
use retro_core::graph::{Dag, GraphParser};
use tracing::warn;

use crate::input::read_input;
use crate::output::{CliError, OutputMode, render_error};

/// Graph input shared by the analysis subcommands.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Graph file (`n m` then m `v u` pairs), or `-` for stdin.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

/// Read `input`, reporting failure on stderr in the requested mode.
pub fn read_or_report(input: &Path, output: OutputMode) -> anyhow::Result<String> {
    match read_input(input) {
        Ok(text) => Ok(text),
        Err(err) => {
            render_error(output, &CliError::unreadable(&err))?;
            Err(err)
        }
    }
}

/// Report a rejected graph on stderr and return the error to exit with.
pub fn reject(output: OutputMode, err: &LoadError) -> anyhow::Error {
    fail(
        output,
        &CliError::from(err),
        &format!("input rejected ({})", err.code()),
    )
}

/// Report a [`CliError`] on stderr and return `summary` as the error to exit with.
pub fn fail(output: OutputMode, error: &CliError, summary: &str) -> anyhow::Error {
    warn!(code = error.error_code.as_deref().unwrap_or_default(), "{summary}");
    if let Err(render_err) = render_error(output, error) {
        return render_err;
    }
    anyhow::anyhow!("{summary}")
}

/// Read, parse and validate `input` in one step.
pub fn load_dag(input: &Path, parser: &GraphParser, output: OutputMode) -> anyhow::Result<Dag> {
    let text = read_or_report(input, output)?;
    retro_core::load(parser, &text).map_err(|err| reject(output, &err))
}

/// Comma-separated node list, `-` when empty.
pub fn join_nodes(nodes: &[usize]) -> String {
    if nodes.is_empty() {
        return "-".to_owned();
    }
    nodes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
