#![forbid(unsafe_code)]
//! retro-core library: win/lose analysis of impartial games on DAGs.
//!
//! Text is parsed into a [`graph::Graph`], checked for cycles into a
//! [`graph::Dag`], and solved into per-node [`solve::Labels`].
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums for load failures
//!   ([`error::LoadError`]); `anyhow::Result` for config and I/O plumbing.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod session;
pub mod solve;

use tracing::instrument;

use crate::error::LoadError;
use crate::graph::{Dag, GraphParser};
use crate::solve::Labels;

/// A validated graph together with its labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub dag: Dag,
    pub labels: Labels,
}

/// Parse `text` with `parser` and reject it unless it is a DAG.
///
/// # Errors
///
/// Returns the first parse violation, or [`graph::CycleDetected`] wrapped in
/// [`LoadError`].
#[instrument(skip_all, fields(bytes = text.len()))]
pub fn load(parser: &GraphParser, text: &str) -> Result<Dag, LoadError> {
    let graph = parser.parse(text)?;
    Ok(graph::validate(graph)?)
}

/// Run the whole pipeline (parse, validate, solve) with no size limits.
///
/// # Errors
///
/// See [`load`].
pub fn analyze(text: &str) -> Result<Analysis, LoadError> {
    analyze_with(&GraphParser::new(), text)
}

/// Run the whole pipeline with a configured parser.
///
/// # Errors
///
/// See [`load`].
pub fn analyze_with(parser: &GraphParser, text: &str) -> Result<Analysis, LoadError> {
    let dag = load(parser, text)?;
    let labels = solve::solve(&dag);
    Ok(Analysis { dag, labels })
}
