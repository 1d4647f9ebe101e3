//! Columns block - column-count class plus image-column marking.

use crate::dom::Element;

pub const BLOCK_NAME: &str = "columns";

const IMG_COL_CLASS: &str = "columns-img-col";

/// Attach the column-count class and mark image-only columns.
///
/// The count comes from the first row and is assumed uniform; rows with a
/// different width are not validated and keep whatever layout they get.
pub fn decorate(block: &mut Element) {
    let Some(first_row) = block.child_elements().next() else {
        return; // no rows, nothing to say about the layout
    };
    let cols = first_row.element_child_count();
    block.add_class(&format!("columns-{cols}-cols"));

    for row in block.child_elements_mut() {
        for col in row.child_elements_mut() {
            mark_image_column(col);
        }
    }
}

/// Outcome of searching a subtree for its first picture.
enum PicSearch {
    NotFound,
    /// A picture exists; `wrapped` is set once its nearest `div` ancestor
    /// has been seen (marked or not).
    Found { wrapped: bool },
}

/// Mark the nearest `div` wrapper of the column's first picture, but only
/// when the picture is that wrapper's sole element child. A column mixing a
/// picture with text is never an image column.
fn mark_image_column(col: &mut Element) {
    visit(col);

    fn visit(elem: &mut Element) -> PicSearch {
        if elem.is_tag("picture") {
            return PicSearch::Found { wrapped: false };
        }

        let mut result = PicSearch::NotFound;
        for i in 0..elem.children.len() {
            let Some(child) = elem.children[i].as_element_mut() else {
                continue;
            };
            match visit(child) {
                PicSearch::NotFound => continue,
                found => {
                    result = found;
                    break;
                }
            }
        }

        // Unwinding past the picture: the first div on the way up is its
        // nearest wrapper and the only mark candidate
        match result {
            PicSearch::Found { wrapped: false } if elem.is_tag("div") => {
                if elem.element_child_count() == 1 {
                    elem.add_class(IMG_COL_CLASS);
                }
                PicSearch::Found { wrapped: true }
            }
            other => other,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse::parse_into;

    fn decorate_block(html: &str) -> Element {
        let mut block = parse_into("div", html).unwrap();
        block.set_class("columns");
        decorate(&mut block);
        block
    }

    const PICTURE: &str = "<picture><img src=\"./media_1.png\"></picture>";

    #[test]
    fn test_column_count_class_from_first_row() {
        let html = "\
            <div><div>a</div><div>b</div><div>c</div></div>\
            <div><div>d</div><div>e</div><div>f</div></div>";
        let block = decorate_block(html);
        assert!(block.has_class("columns-3-cols"));
    }

    #[test]
    fn test_no_rows_no_count_class() {
        let block = decorate_block("");
        assert_eq!(block.get_attr("class"), Some("columns"));
    }

    #[test]
    fn test_picture_only_column_marked() {
        let html = &format!("<div><div>{PICTURE}</div><div><p>text</p></div></div>");
        let block = decorate_block(html);

        let row = block.child_elements().next().unwrap();
        let cols: Vec<_> = row.child_elements().collect();
        assert!(cols[0].has_class(IMG_COL_CLASS));
        assert!(!cols[1].has_class(IMG_COL_CLASS));
    }

    #[test]
    fn test_mixed_content_column_not_marked() {
        let html = &format!("<div><div>{PICTURE}<p>caption</p></div></div>");
        let block = decorate_block(html);

        let col = block
            .child_elements()
            .next()
            .unwrap()
            .child_elements()
            .next()
            .unwrap();
        assert!(!col.has_class(IMG_COL_CLASS));
        assert!(block
            .find_descendant_where(&|e| e.has_class(IMG_COL_CLASS))
            .is_none());
    }

    #[test]
    fn test_nested_wrapper_marked_not_column() {
        // Picture sits in an inner div next to a paragraph: the inner div is
        // the wrapper that gets marked, not the column itself
        let html = &format!("<div><div><div>{PICTURE}</div><p>text</p></div></div>");
        let block = decorate_block(html);

        let col = block
            .child_elements()
            .next()
            .unwrap()
            .child_elements()
            .next()
            .unwrap();
        assert!(!col.has_class(IMG_COL_CLASS));

        let inner = col.child_elements().next().unwrap();
        assert!(inner.has_class(IMG_COL_CLASS));
    }

    #[test]
    fn test_all_rows_scanned_for_image_columns() {
        let html = &format!(
            "<div><div><p>a</p></div></div><div><div>{PICTURE}</div></div>"
        );
        let block = decorate_block(html);
        assert!(block.has_class("columns-1-cols"));
        assert!(block
            .find_descendant_where(&|e| e.has_class(IMG_COL_CLASS))
            .is_some());
    }
}
