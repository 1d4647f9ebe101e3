//! Decorate command implementation.
//!
//! Reads a page body, runs the structural and block decoration passes over
//! it, and writes the decorated markup back out. Fragment loads happen over
//! HTTP against the configured base URL.

use anyhow::{Context, Result, anyhow};
use url::Url;

use super::common::{read_input, write_output};
use crate::block;
use crate::cli::args::DecorateArgs;
use crate::context::PageContext;
use crate::dom::{parse, render};
use crate::log;
use crate::logger;

/// Execute decorate command
pub fn run(args: &DecorateArgs) -> Result<()> {
    logger::set_verbose(args.verbose);

    let html = read_input(&args.input)?;
    let ctx = build_context(args)?;

    let mut root = parse::parse_into("main", &html)?;
    block::decorate_main(&mut root);

    let runtime = tokio::runtime::Runtime::new()?;
    let decorated = runtime.block_on(block::load_blocks(&mut root, &ctx, 0));

    write_output(args.output.as_deref(), &render::render_children(&root))?;
    log!("decorate"; "decorated {decorated} blocks");
    Ok(())
}

fn build_context(args: &DecorateArgs) -> Result<PageContext> {
    let base = Url::parse(&args.base_url)
        .with_context(|| format!("invalid base URL: {}", args.base_url))?;

    let mut ctx = PageContext::new(base).with_max_depth(args.max_depth);
    for pair in &args.meta {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid metadata pair `{pair}`, expected KEY=VALUE"))?;
        ctx.insert_metadata(key, value);
    }
    Ok(ctx)
}

// =============================================================================
// Tests
// =============================================================================
