//! Footer block - authored content is discarded and replaced by a fragment.

use crate::context::PageContext;
use crate::dom::Element;

use super::fragment::load_fragment;

pub const BLOCK_NAME: &str = "footer";

/// Fragment served when the page metadata names no other.
const DEFAULT_PATH: &str = "/footer";

/// Replace the block's content with the footer fragment.
///
/// The fragment path comes from the page's `footer` metadata entry, falling
/// back to `/footer`. Whatever the block contained is dropped first; if the
/// fragment cannot be loaded the block simply stays empty.
pub async fn decorate(block: &mut Element, ctx: &PageContext, depth: u32) {
    let path = ctx.metadata("footer").unwrap_or(DEFAULT_PATH).to_string();

    block.children.clear();
    if let Some(mut fragment) = load_fragment(&path, ctx, depth).await {
        block.children = fragment.take_children();
    }
}

// =============================================================================
// Tests
// =============================================================================
