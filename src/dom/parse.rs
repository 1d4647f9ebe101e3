//! HTML parsing - `tl` nodes converted into our owned tree.

use anyhow::{Result, anyhow};

use super::html::unescape;
use super::{Attrs, Element, Node, Text};

/// Parse an HTML string into top-level nodes.
///
/// Comments are dropped and whitespace-only text is skipped, so the element
/// structure (rows, columns) is what child counts observe. Entities are
/// decoded; rendering re-escapes them.
pub fn parse_nodes(input: &str) -> Result<Vec<Node>> {
    let dom = match tl::parse(input, tl::ParserOptions::default()) {
        Ok(dom) => dom,
        Err(e) => return Err(anyhow!("html parse failed: {e}")),
    };

    let parser = dom.parser();
    let mut nodes = Vec::new();
    for handle in dom.children() {
        if let Some(node) = convert(*handle, parser) {
            nodes.push(node);
        }
    }
    Ok(nodes)
}

/// Parse an HTML string into a synthetic container element.
///
/// Fragment bodies have no single root; the container plays the role the
/// detached `<main>` element plays in the browser.
pub fn parse_into(tag: &str, input: &str) -> Result<Element> {
    let mut root = Element::new(tag);
    root.children = parse_nodes(input)?.into();
    Ok(root)
}

/// Convert one `tl` node handle into an owned node.
fn convert(handle: tl::NodeHandle, parser: &tl::Parser) -> Option<Node> {
    let node = handle.get(parser)?;

    match node {
        tl::Node::Tag(tag) => {
            let tag_name = tag.name().as_utf8_str().to_lowercase();

            let tag_attrs = tag.attributes();
            let mut attrs = Attrs::new();
            for (key, value) in tag_attrs.iter() {
                let key_str: &str = key.as_ref();
                let value_str = value.map(|v| v.to_string()).unwrap_or_default();
                attrs.set(key_str, unescape(&value_str).into_owned());
            }

            let mut elem = Element::with_attrs(tag_name, attrs);
            for child_handle in tag.children().top().iter() {
                if let Some(child) = convert(*child_handle, parser) {
                    elem.children.push(child);
                }
            }

            Some(elem.into_node())
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str();
            // Inter-element whitespace would distort child counts
            if text.trim().is_empty() {
                None
            } else {
                Some(Node::Text(Text::new(unescape(&text).into_owned())))
            }
        }
        tl::Node::Comment(_) => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
