//! Scenedex CLI: reference counting for scene and prefab files.
//!
//! Provides `scenedex index` to build and commit the reference index for a
//! set of files or directories, and `scenedex query` to answer usage and
//! component lookups against it.

#![warn(missing_docs)]

mod index;
mod pipeline;
mod query;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use scenedex_common::Anchor;

/// Scenedex, an incremental reference indexer for scene files.
#[derive(Parser, Debug)]
#[command(name = "scenedex", version, about = "Scene reference indexer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `scenedex.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Index files and print a summary of the combined index.
    Index(IndexArgs),
    /// Index files, then look up anchors, guids and component lists.
    Query(QueryArgs),
}

/// Which files to index and how to batch them.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Scene files, or directories to scan for them.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Documents per checkpoint (overrides `build.batch_size`).
    #[arg(long)]
    pub batch_size: Option<NonZeroUsize>,

    /// Interrupt every N checkpoints and resume, exercising the
    /// checkpoint path on real files.
    #[arg(long)]
    pub interrupt_every: Option<NonZeroUsize>,
}

/// Arguments for the `scenedex index` subcommand.
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Files to index.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the `scenedex query` subcommand.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Files to index before answering.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Anchors whose usage count to print.
    #[arg(long)]
    pub anchor: Vec<Anchor>,

    /// Guids whose usage count to print.
    #[arg(long)]
    pub guid: Vec<String>,

    /// Anchors whose attached components to print.
    #[arg(long)]
    pub components: Vec<Anchor>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    init_logging(&global);

    let result = match cli.command {
        Command::Index(ref args) => index::run(args, &global),
        Command::Query(ref args) => query::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr logger. `RUST_LOG` takes precedence over the flags.
fn init_logging(global: &GlobalArgs) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(global)),
    )
    .target(env_logger::Target::Stderr)
    .init();
}

fn default_log_filter(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "warn"
    }
}
