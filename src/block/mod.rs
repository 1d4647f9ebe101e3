//! Block grammar and decoration driver.
//!
//! Server-rendered pages follow a fixed grammar: a root container whose
//! top-level `div`s are sections; inside a section, a classed `div` is a
//! block; a block's children are rows and a row's children are columns.
//!
//! Decoration happens in two passes, mirroring the page-load sequence:
//! - `decorate_main`: synchronous structural marking (sections, blocks)
//! - `load_blocks`: runs the matching decorator once per block, in document
//!   order; this is the only async pass (fragments fetch over HTTP)

pub mod cards;
pub mod columns;
pub mod footer;
pub mod fragment;

use std::future::Future;
use std::pin::Pin;

use crate::context::PageContext;
use crate::dom::Element;

/// Class marking a section container.
pub const SECTION_CLASS: &str = "section";

/// Class marking a decorated block.
pub const BLOCK_CLASS: &str = "block";

/// Attribute carrying the resolved block name.
pub const BLOCK_NAME_ATTR: &str = "data-block-name";

/// Structural decoration: sections first, then the blocks inside them.
pub fn decorate_main(root: &mut Element) {
    decorate_sections(root);
    decorate_blocks(root);
}

/// Mark every top-level `div` of the container as a section.
pub fn decorate_sections(root: &mut Element) {
    for child in root.child_elements_mut() {
        if child.is_tag("div") {
            child.add_class(SECTION_CLASS);
        }
    }
}

/// Mark classed `div`s directly under a section as blocks.
///
/// The block's name is its first class token (`<div class="cards featured">`
/// is a `cards` block); extra tokens stay untouched as variant classes.
pub fn decorate_blocks(root: &mut Element) {
    for section in sections_mut(root) {
        for child in section.child_elements_mut() {
            if !child.is_tag("div") {
                continue;
            }
            let Some(name) = child.classes().next().map(str::to_owned) else {
                continue;
            };
            child.set_attr(BLOCK_NAME_ATTR, name);
            child.add_class(BLOCK_CLASS);
        }
    }
}

fn sections_mut(root: &mut Element) -> impl Iterator<Item = &mut Element> {
    root.child_elements_mut()
        .filter(|elem| elem.has_class(SECTION_CLASS))
}

/// Block name assigned by `decorate_blocks`, if any.
pub fn block_name(elem: &Element) -> Option<&str> {
    elem.get_attr(BLOCK_NAME_ATTR)
}

/// Run the matching decorator once per block, in document order.
///
/// Returns the number of blocks decorated. `depth` tracks fragment nesting;
/// the driver itself never recurses, but fragment and footer blocks load
/// nested documents which come back through here with `depth + 1`.
///
/// Boxed because the recursion through `load_fragment` would otherwise make
/// the future type infinitely deep.
pub fn load_blocks<'a>(
    root: &'a mut Element,
    ctx: &'a PageContext,
    depth: u32,
) -> Pin<Box<dyn Future<Output = usize> + Send + 'a>> {
    Box::pin(async move {
        let mut decorated = 0;

        for section_idx in 0..root.children.len() {
            let Some(section) = root.children[section_idx].as_element_mut() else {
                continue;
            };
            if !section.has_class(SECTION_CLASS) {
                continue;
            }

            let mut i = 0;
            while i < section.children.len() {
                let Some(block) = section.children[i].as_element_mut() else {
                    i += 1;
                    continue;
                };
                let Some(name) = block_name(block).map(str::to_owned) else {
                    i += 1;
                    continue;
                };

                match name.as_str() {
                    cards::BLOCK_NAME => {
                        cards::decorate(block, ctx);
                        decorated += 1;
                    }
                    columns::BLOCK_NAME => {
                        columns::decorate(block);
                        decorated += 1;
                    }
                    footer::BLOCK_NAME => {
                        footer::decorate(block, ctx, depth).await;
                        decorated += 1;
                    }
                    fragment::BLOCK_NAME => {
                        decorated += 1;
                        // The decorator cannot reach its own ancestors in a
                        // value tree; it returns the splice for us to apply.
                        if let Some(splice) = fragment::decorate(block, ctx, depth).await {
                            for class in &splice.section_classes {
                                section.add_class(class);
                            }
                            section.children.remove(i);
                            let spliced = splice.nodes.len();
                            section.children.insert_many(i, splice.nodes);
                            i += spliced;
                            continue;
                        }
                    }
                    _ => {} // unknown blocks are left as-is
                }

                i += 1;
            }
        }

        decorated
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use url::Url;

    use super::*;
    use crate::dom::parse::parse_into;
    use crate::fetch::StaticFetcher;

    fn ctx_with(fetcher: StaticFetcher) -> PageContext {
        let base = Url::parse("http://site.test/").unwrap();
        PageContext::with_fetcher(base, Arc::new(fetcher))
    }

    #[test]
    fn test_decorate_main_marks_sections_and_blocks() {
        let html = "<div><div class=\"cards\"><div><div>x</div></div></div></div><div><p>plain</p></div>";
        let mut root = parse_into("main", html).unwrap();
        decorate_main(&mut root);

        let sections: Vec<_> = root.child_elements().collect();
        assert!(sections[0].has_class(SECTION_CLASS));
        assert!(sections[1].has_class(SECTION_CLASS));

        let block = sections[0].child_elements().next().unwrap();
        assert!(block.has_class(BLOCK_CLASS));
        assert_eq!(block_name(block), Some("cards"));

        // Non-div section content is not a block
        let p = sections[1].child_elements().next().unwrap();
        assert_eq!(block_name(p), None);
    }

    #[test]
    fn test_block_name_is_first_class_token() {
        let html = "<div><div class=\"columns highlight\"><div></div></div></div>";
        let mut root = parse_into("main", html).unwrap();
        decorate_main(&mut root);

        let section = root.child_elements().next().unwrap();
        let block = section.child_elements().next().unwrap();
        assert_eq!(block_name(block), Some("columns"));
        assert!(block.has_class("highlight"));
    }

    #[tokio::test]
    async fn test_load_blocks_dispatches_in_order() {
        let html = "<div>\
            <div class=\"cards\"><div><div>card</div></div></div>\
            <div class=\"columns\"><div><div>a</div><div>b</div></div></div>\
            </div>";
        let mut root = parse_into("main", html).unwrap();
        decorate_main(&mut root);

        let ctx = ctx_with(StaticFetcher::new());
        let decorated = load_blocks(&mut root, &ctx, 0).await;
        assert_eq!(decorated, 2);

        let section = root.child_elements().next().unwrap();
        let blocks: Vec<_> = section.child_elements().collect();
        assert!(blocks[0].has_descendant("li")); // cards became a list
        assert!(blocks[1].has_class("columns-2-cols"));
    }

    #[tokio::test]
    async fn test_load_blocks_skips_unknown_blocks() {
        let html = "<div><div class=\"carousel\"><div><div>x</div></div></div></div>";
        let mut root = parse_into("main", html).unwrap();
        decorate_main(&mut root);
        let before = root.clone();

        let ctx = ctx_with(StaticFetcher::new());
        let decorated = load_blocks(&mut root, &ctx, 0).await;
        assert_eq!(decorated, 0);
        assert_eq!(root, before);
    }

    #[tokio::test]
    async fn test_load_blocks_splices_fragment_into_section() {
        let fragment_body = "<div class=\"hero\"><div class=\"columns\"><div><div>a</div></div></div></div>";
        let fetcher =
            StaticFetcher::new().page("http://site.test/fragments/hero.plain.html", fragment_body);
        let ctx = ctx_with(fetcher);

        let html =
            "<div><div class=\"fragment\"><div><div><a href=\"/fragments/hero\">hero</a></div></div></div></div>";
        let mut root = parse_into("main", html).unwrap();
        decorate_main(&mut root);
        load_blocks(&mut root, &ctx, 0).await;

        let section = root.child_elements().next().unwrap();
        // Fragment block replaced by the fragment's own section
        assert!(section.find_descendant_where(&|e| e.has_class("fragment")).is_none());
        // Fragment section classes merged onto the host section
        assert!(section.has_class("hero"));
        // Nested block inside the fragment was decorated too
        let inner = section
            .find_descendant_where(&|e| e.has_class("columns"))
            .unwrap();
        assert!(inner.has_class("columns-1-cols"));
    }
}
