//! `retro dot`: Graphviz export, coloured by label.

use std::io::Write;

use clap::Args;
use retro_core::config::ProjectConfig;
use retro_core::export::to_dot;
use retro_core::graph::GraphParser;
use retro_core::solve::solve;
use serde::Serialize;

use crate::cmd::{InputArgs, load_dag};
use crate::output::{OutputMode, render};

/// Arguments for `retro dot`.
#[derive(Args, Debug)]
pub struct DotArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Skip solving and leave nodes uncoloured.
    #[arg(long)]
    pub unlabeled: bool,
}

#[derive(Debug, Serialize)]
struct DotOutput {
    labeled: bool,
    dot: String,
}

/// Execute `retro dot`.
pub fn run_dot(args: &DotArgs, output: OutputMode, config: &ProjectConfig) -> anyhow::Result<()> {
    let parser = GraphParser::with_limits(config.limits);
    let dag = load_dag(&args.input.input, &parser, output)?;

    let labels = (!args.unlabeled).then(|| solve(&dag));
    let payload = DotOutput {
        labeled: labels.is_some(),
        dot: to_dot(&dag, labels.as_ref()),
    };

    render(output, &payload, |report, w| write!(w, "{}", report.dot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_args_parse_unlabeled() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: DotArgs,
        }

        let parsed = Wrapper::parse_from(["test", "-", "--unlabeled"]);
        assert!(parsed.args.unlabeled);

        let parsed = Wrapper::parse_from(["test", "g.txt"]);
        assert!(!parsed.args.unlabeled);
    }
}
