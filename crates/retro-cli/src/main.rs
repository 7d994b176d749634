#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode};
use retro_core::config::resolve_config;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "retro: win/lose analysis for games on directed acyclic graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format (overrides --json, FORMAT and the user config).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Project config file to use instead of ./retro.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "Label every node Win or Lose",
        long_about = "Parse the graph, reject cycles, and label every node by retrograde analysis.",
        after_help = "EXAMPLES:\n    # Solve a graph file\n    retro solve game.txt\n\n    # Read from stdin and show the propagation trace\n    cat game.txt | retro solve - --trace\n\n    # Emit machine-readable output\n    retro solve game.txt --json"
    )]
    Solve(cmd::solve::SolveArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Validate a graph without solving it",
        long_about = "Parse the graph and check it is acyclic; print its size and content hash.",
        after_help = "EXAMPLES:\n    # Validate a file\n    retro check game.txt"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        next_help_heading = "Display",
        about = "Print the adjacency matrix",
        after_help = "EXAMPLES:\n    # Matrix as 0/1 rows\n    retro matrix game.txt --format text"
    )]
    Matrix(cmd::matrix::MatrixArgs),

    #[command(
        next_help_heading = "Display",
        about = "Export Graphviz DOT",
        long_about = "Export the graph as Graphviz DOT with Lose nodes red and Win nodes green.",
        after_help = "EXAMPLES:\n    # Render to PNG\n    retro dot game.txt | dot -Tpng -o game.png\n\n    # Structure only\n    retro dot game.txt --unlabeled"
    )]
    Dot(cmd::dot::DotArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    retro completions bash > ~/.local/share/bash-completion/completions/retro"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("RETRO_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if quiet {
            "error"
        } else if verbose || env::var("DEBUG").is_ok() {
            "retro=debug,info"
        } else {
            "retro=info,warn"
        })
    });

    let format = env::var("RETRO_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let config = match resolve_config(&project_root, cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let output = output::resolve_output_mode(cli.format, cli.json, None);
            return Err(cmd::fail(output, &CliError::config(&err), "invalid configuration"));
        }
    };
    let output = output::resolve_output_mode(cli.format, cli.json, config.user.output.as_deref());
    debug!(?output, limits = ?config.project.limits, "configuration resolved");

    match cli.command {
        Commands::Solve(ref args) => cmd::solve::run_solve(args, output, &config.project),
        Commands::Check(ref args) => cmd::check::run_check(args, output, &config.project),
        Commands::Matrix(ref args) => cmd::matrix::run_matrix(args, output, &config.project),
        Commands::Dot(ref args) => cmd::dot::run_dot(args, output, &config.project),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
