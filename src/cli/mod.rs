//! Command-line interface module.

mod args;
pub mod common;
pub mod decorate;
pub mod query;

pub use args::{Cli, Commands, DecorateArgs, QueryArgs};
