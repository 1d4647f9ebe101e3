//! HTML serialization.

use super::html::{escape, is_raw_text_element, is_void_element};
use super::{Element, Node};

/// Render an element (tag included) to an HTML string.
pub fn render_element(elem: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, elem);
    out
}

/// Render only the children of a container element.
///
/// Used when the container is synthetic (see `parse::parse_into`) and must
/// not appear in the output.
pub fn render_children(elem: &Element) -> String {
    let mut out = String::new();
    for child in &elem.children {
        write_node(&mut out, child, false);
    }
    out
}

fn write_node(out: &mut String, node: &Node, raw_text: bool) {
    match node {
        Node::Element(elem) => write_element(out, elem),
        Node::Text(text) => {
            if raw_text {
                out.push_str(&text.content);
            } else {
                out.push_str(&escape(&text.content));
            }
        }
    }
}

fn write_element(out: &mut String, elem: &Element) {
    out.push('<');
    out.push_str(&elem.tag);

    for (name, value) in elem.attrs.iter() {
        out.push(' ');
        out.push_str(name);
        // Boolean attributes render as a bare name
        if !value.is_empty() {
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
    }
    out.push('>');

    if is_void_element(&elem.tag) {
        return;
    }

    let raw_text = is_raw_text_element(&elem.tag);
    for child in &elem.children {
        write_node(out, child, raw_text);
    }

    out.push_str("</");
    out.push_str(&elem.tag);
    out.push('>');
}

// =============================================================================
// Tests
// =============================================================================
