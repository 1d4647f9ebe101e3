//! Plinth - a block decorator for server-rendered page bodies.

#![allow(dead_code)]

mod block;
mod cli;
mod context;
mod core;
mod dom;
mod fetch;
mod logger;
mod picture;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    match &cli.command {
        Commands::Decorate { args } => cli::decorate::run(args),
        Commands::Query { args } => cli::query::run(args),
    }
}
