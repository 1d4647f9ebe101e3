//! Query command implementation.
//!
//! Runs the structural pass only and reports the blocks the page contains.
//! Useful for auditing which decorators a page would trigger without going
//! near the network.

use anyhow::Result;
use serde::Serialize;

use super::common::{read_input, write_output};
use crate::block;
use crate::cli::args::QueryArgs;
use crate::dom::{Element, parse};
use crate::log;

/// One block found in the page body.
#[derive(Debug, Serialize)]
pub struct BlockInfo {
    pub name: String,
    pub rows: usize,
    /// Column count of the first row; 0 when the block has no rows.
    pub columns: usize,
}

/// Execute query command
pub fn run(args: &QueryArgs) -> Result<()> {
    let html = read_input(&args.input)?;

    let mut root = parse::parse_into("main", &html)?;
    block::decorate_main(&mut root);

    let blocks = collect_blocks(&root);
    log!("query"; "found {} blocks", blocks.len());

    let json = if args.pretty {
        serde_json::to_string_pretty(&blocks)?
    } else {
        serde_json::to_string(&blocks)?
    };
    write_output(args.output.as_deref(), &json)
}

fn collect_blocks(root: &Element) -> Vec<BlockInfo> {
    let mut blocks = Vec::new();
    for section in root
        .child_elements()
        .filter(|elem| elem.has_class(block::SECTION_CLASS))
    {
        for child in section.child_elements() {
            let Some(name) = block::block_name(child) else {
                continue;
            };
            blocks.push(BlockInfo {
                name: name.to_string(),
                rows: child.element_child_count(),
                columns: child
                    .child_elements()
                    .next()
                    .map_or(0, Element::element_child_count),
            });
        }
    }
    blocks
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse::parse_into;

    fn query(html: &str) -> Vec<BlockInfo> {
        let mut root = parse_into("main", html).unwrap();
        block::decorate_main(&mut root);
        collect_blocks(&root)
    }

    #[test]
    fn test_reports_blocks_with_shape() {
        let html = "\
            <div><div class=\"cards\"><div><div>i</div><div>b</div></div><div><div>i</div><div>b</div></div></div></div>\
            <div><div class=\"columns\"><div><div>a</div><div>b</div><div>c</div></div></div></div>";
        let blocks = query(html);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name, "cards");
        assert_eq!(blocks[0].rows, 2);
        assert_eq!(blocks[0].columns, 2);
        assert_eq!(blocks[1].name, "columns");
        assert_eq!(blocks[1].rows, 1);
        assert_eq!(blocks[1].columns, 3);
    }

    #[test]
    fn test_plain_content_reports_nothing() {
        let blocks = query("<div><p>no blocks here</p></div>");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_serializes_to_json() {
        let blocks = query("<div><div class=\"footer\"></div></div>");
        let json = serde_json::to_string(&blocks).unwrap();
        assert_eq!(json, "[{\"name\":\"footer\",\"rows\":0,\"columns\":0}]");
    }
}
