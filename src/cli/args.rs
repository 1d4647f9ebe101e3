//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::context::PageContext;

/// Plinth block decorator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Decorate a server-rendered page body
    #[command(visible_alias = "d")]
    Decorate {
        #[command(flatten)]
        args: DecorateArgs,
    },

    /// List the blocks a page body contains, as JSON
    #[command(visible_alias = "q")]
    Query {
        #[command(flatten)]
        args: QueryArgs,
    },
}

/// Decorate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct DecorateArgs {
    /// Input HTML file. Use `-` to read from stdin.
    #[arg(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Base URL fragments and media paths resolve against
    #[arg(short, long, default_value = "http://localhost/")]
    pub base_url: String,

    /// Page metadata as KEY=VALUE pairs (repeatable)
    #[arg(short, long, value_name = "KEY=VALUE")]
    pub meta: Vec<String>,

    /// Maximum fragment nesting depth
    #[arg(short = 'D', long, default_value_t = PageContext::DEFAULT_MAX_FRAGMENT_DEPTH)]
    pub max_depth: u32,

    /// Enable verbose diagnostic output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Query command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// Input HTML file. Use `-` to read from stdin.
    #[arg(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,
}
