//! Cards block - rows of cells become a semantic list.
//!
//! Each row turns into one `<li>`; cells are classified as image or body;
//! every picture is swapped for an optimized 750px rendition.

use url::Url;

use crate::context::PageContext;
use crate::dom::{Element, Node};
use crate::picture::{Breakpoint, create_optimized_picture};

pub const BLOCK_NAME: &str = "cards";

const IMAGE_CLASS: &str = "cards-card-image";
const BODY_CLASS: &str = "cards-card-body";

/// Rendition width requested for card images.
const CARD_IMAGE_WIDTH: u32 = 750;

/// Rewrite the block's rows/cells into a single `<ul>`.
pub fn decorate(block: &mut Element, ctx: &PageContext) {
    let mut list = Element::new("ul");

    for row in block.take_children() {
        let Node::Element(mut row) = row else {
            continue;
        };

        // Move the row's cells into the item, preserving order
        let mut item = Element::new("li");
        item.children = row
            .take_children()
            .into_iter()
            .filter(Node::is_element)
            .collect();

        for cell in item.child_elements_mut() {
            if cell.element_child_count() == 1 && cell.has_descendant("picture") {
                cell.set_class(IMAGE_CLASS);
            } else {
                cell.set_class(BODY_CLASS);
            }
        }

        list.push_element(item);
    }

    optimize_pictures(&mut list, ctx.base_url());

    block.children.clear();
    block.push_element(list);
}

/// Replace every `<picture>` holding an `<img>` with an optimized rendition,
/// keeping the original source and alt text. Card images below the fold gain
/// nothing from eager loading, so the hint is always `lazy`.
fn optimize_pictures(elem: &mut Element, base: &Url) {
    for node in elem.children.iter_mut() {
        let Node::Element(child) = node else {
            continue;
        };

        if !child.is_tag("picture") {
            optimize_pictures(child, base);
            continue;
        }

        let Some(img) = child.find_descendant("img") else {
            continue;
        };
        let src = img.get_attr("src").unwrap_or_default().to_string();
        let alt = img.get_attr("alt").unwrap_or_default().to_string();

        *node = create_optimized_picture(
            &src,
            &alt,
            false,
            &[Breakpoint::plain(CARD_IMAGE_WIDTH)],
            base,
        )
        .into_node();
    }
}

// =============================================================================
// Tests
// =============================================================================
