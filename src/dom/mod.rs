//! Lightweight mutable HTML tree.
//!
//! Blocks arrive as server-rendered markup; decorators reshape them as owned
//! value trees. Moving a `Node` transfers ownership of the whole subtree, so
//! "move these children into that container" is a plain `take`/`push` with no
//! cloning, preserving node identity and order.
//!
//! - `parse`: HTML string -> nodes (via the `tl` parser)
//! - `render`: nodes -> HTML string

pub mod html;
pub mod parse;
pub mod render;

use smallvec::SmallVec;

/// Child list of an element. Most content cells hold only a handful of nodes.
pub type NodeList = SmallVec<[Node; 4]>;

// =============================================================================
// Node
// =============================================================================

/// A single node in the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Box<Element>),
    Text(Text),
}

impl Node {
    /// View this node as an element, if it is one.
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(elem) => Some(elem),
            Node::Text(_) => None,
        }
    }

    /// Mutable element view.
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(elem) => Some(elem),
            Node::Text(_) => None,
        }
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }
}

/// Text content node.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

// =============================================================================
// Attrs
// =============================================================================

/// Ordered attribute list.
///
/// Attribute order is preserved so rendering a parsed document does not
/// shuffle markup. Lookup is linear; elements carry few attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attrs {
    entries: Vec<(String, String)>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an attribute value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Remove an attribute by name.
    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(key, _)| key != name);
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Attrs {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }
}

impl FromIterator<(String, String)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Element
// =============================================================================

/// An element with a tag name, attributes and owned children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Attrs,
    pub children: NodeList,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Attrs::new(),
            children: NodeList::new(),
        }
    }

    pub fn with_attrs(tag: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            tag: tag.into(),
            attrs,
            children: NodeList::new(),
        }
    }

    /// Box this element up as a child node.
    #[inline]
    pub fn into_node(self) -> Node {
        Node::Element(Box::new(self))
    }

    #[inline]
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag == tag
    }

    // -------------------------------------------------------------------------
    // Attributes and classes
    // -------------------------------------------------------------------------

    #[inline]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    #[inline]
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attrs.set(name, value);
    }

    /// Iterate the whitespace-separated class tokens.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Add a class token unless already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        match self.get_attr("class") {
            Some(existing) if !existing.is_empty() => {
                let combined = format!("{existing} {class}");
                self.set_attr("class", combined);
            }
            _ => self.set_attr("class", class),
        }
    }

    /// Replace the whole class attribute.
    pub fn set_class(&mut self, value: impl Into<String>) {
        self.set_attr("class", value);
    }

    // -------------------------------------------------------------------------
    // Children
    // -------------------------------------------------------------------------

    /// Append a child node.
    #[inline]
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Append a child element.
    #[inline]
    pub fn push_element(&mut self, elem: Element) {
        self.children.push(elem.into_node());
    }

    /// Move all children out, leaving this element empty.
    #[inline]
    pub fn take_children(&mut self) -> NodeList {
        std::mem::take(&mut self.children)
    }

    /// Iterate child elements (skipping text nodes).
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| node.as_element())
    }

    /// Mutable iteration over child elements.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children
            .iter_mut()
            .filter_map(|node| node.as_element_mut())
    }

    /// Number of element children (text nodes excluded).
    pub fn element_child_count(&self) -> usize {
        self.child_elements().count()
    }

    // -------------------------------------------------------------------------
    // Subtree queries
    // -------------------------------------------------------------------------

    /// Depth-first search for the first descendant with the given tag.
    /// The element itself is not considered.
    pub fn find_descendant(&self, tag: &str) -> Option<&Element> {
        self.find_descendant_where(&|elem| elem.is_tag(tag))
    }

    /// Depth-first search for the first descendant matching a predicate.
    pub fn find_descendant_where(
        &self,
        matches: &impl Fn(&Element) -> bool,
    ) -> Option<&Element> {
        for child in self.child_elements() {
            if matches(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant_where(matches) {
                return Some(found);
            }
        }
        None
    }

    /// Whether any descendant carries the given tag.
    pub fn has_descendant(&self, tag: &str) -> bool {
        self.find_descendant(tag).is_some()
    }

    /// Visit this element and every descendant element, depth-first.
    pub fn walk_elements_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        visit(self);
        for child in self.children.iter_mut() {
            if let Node::Element(elem) = child {
                elem.walk_elements_mut(visit);
            }
        }
    }

    /// Concatenated text content of the subtree.
    pub fn text_content(&self) -> String {
        fn collect(nodes: &[Node], out: &mut String) {
            for node in nodes {
                match node {
                    Node::Text(text) => out.push_str(&text.content),
                    Node::Element(elem) => collect(&elem.children, out),
                }
            }
        }

        let mut out = String::new();
        collect(&self.children, &mut out);
        out
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_with_picture() -> Element {
        let mut img = Element::new("img");
        img.set_attr("src", "./media_1.png");
        let mut picture = Element::new("picture");
        picture.push_element(img);
        let mut cell = Element::new("div");
        cell.push_element(picture);
        cell
    }

    #[test]
    fn test_attrs_set_get_replace() {
        let mut attrs = Attrs::new();
        attrs.set("src", "./a.png");
        attrs.set("alt", "logo");
        assert_eq!(attrs.get("src"), Some("./a.png"));

        attrs.set("src", "/b.png");
        assert_eq!(attrs.get("src"), Some("/b.png"));
        // Replacing does not duplicate entries
        assert_eq!(attrs.iter().count(), 2);
    }

    #[test]
    fn test_attrs_preserve_order() {
        let attrs = Attrs::from([("media", "(min-width: 600px)"), ("type", "image/webp")]);
        let keys: Vec<_> = attrs.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["media", "type"]);
    }

    #[test]
    fn test_class_helpers() {
        let mut elem = Element::new("div");
        assert!(!elem.has_class("section"));

        elem.add_class("section");
        elem.add_class("highlight");
        elem.add_class("section"); // no duplicate
        assert_eq!(elem.get_attr("class"), Some("section highlight"));

        elem.set_class("cards-card-body");
        assert_eq!(elem.get_attr("class"), Some("cards-card-body"));
    }

    #[test]
    fn test_take_children_preserves_order() {
        let mut row = Element::new("div");
        for label in ["a", "b", "c"] {
            let mut cell = Element::new("div");
            cell.push(Node::Text(Text::new(label)));
            row.push_element(cell);
        }

        let mut item = Element::new("li");
        item.children = row.take_children();

        assert!(row.children.is_empty());
        let labels: Vec<_> = item
            .child_elements()
            .map(|cell| cell.text_content())
            .collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_element_child_count_skips_text() {
        let mut row = Element::new("div");
        row.push(Node::Text(Text::new("stray")));
        row.push_element(Element::new("div"));
        assert_eq!(row.element_child_count(), 1);
        assert_eq!(row.children.len(), 2);
    }

    #[test]
    fn test_find_descendant_nested() {
        let cell = cell_with_picture();
        assert!(cell.has_descendant("picture"));
        assert!(cell.has_descendant("img"));
        assert!(!cell.has_descendant("video"));

        let img = cell.find_descendant("img").unwrap();
        assert_eq!(img.get_attr("src"), Some("./media_1.png"));
    }

    #[test]
    fn test_find_descendant_where_class() {
        let mut section = Element::new("div");
        section.add_class("section");
        let mut main = Element::new("main");
        main.push_element(section);

        let found = main.find_descendant_where(&|elem| elem.has_class("section"));
        assert!(found.is_some());
    }

    #[test]
    fn test_walk_elements_mut_visits_all() {
        let mut cell = cell_with_picture();
        let mut tags = Vec::new();
        cell.walk_elements_mut(&mut |elem| tags.push(elem.tag.clone()));
        assert_eq!(tags, vec!["div", "picture", "img"]);
    }

    #[test]
    fn test_text_content() {
        let mut link = Element::new("a");
        link.push(Node::Text(Text::new("/fragments/nav")));
        let mut block = Element::new("div");
        block.push(Node::Text(Text::new("  ")));
        block.push_element(link);
        assert_eq!(block.text_content().trim(), "/fragments/nav");
    }
}
