//! Fragment block and fragment loader.
//!
//! A fragment is an independently served page spliced into the current one.
//! The loader fetches its stripped HTML representation, rebases media that
//! was authored relative to the fragment's own location, and decorates any
//! blocks it contains - which may load further fragments.

use std::future::Future;
use std::pin::Pin;

use crate::context::PageContext;
use crate::core::LinkKind;
use crate::debug;
use crate::dom::{Element, NodeList, parse};

use super::SECTION_CLASS;

pub const BLOCK_NAME: &str = "fragment";

/// Content-negotiation suffix requesting the stripped HTML representation.
pub const PLAIN_SUFFIX: &str = ".plain.html";

/// Media references authored relative to the fragment's location.
pub const MEDIA_PREFIX: &str = "./media_";

// =============================================================================
// Loader
// =============================================================================

/// Load and decorate the fragment at `path`.
///
/// `path` must be site-root-relative; anything else (empty, external,
/// file-relative) yields `None` without touching the network. Fetch and
/// parse failures also yield `None` - fragments degrade silently, they never
/// fail the page.
///
/// `depth` is the current fragment nesting level; once it reaches the
/// context's limit the load is refused, so a fragment referencing itself
/// (directly or transitively) terminates instead of recursing forever.
pub fn load_fragment<'a>(
    path: &'a str,
    ctx: &'a PageContext,
    depth: u32,
) -> Pin<Box<dyn Future<Output = Option<Element>> + Send + 'a>> {
    Box::pin(async move {
        if depth >= ctx.max_fragment_depth() {
            debug!("fetch"; "fragment depth limit reached, refusing {path}");
            return None;
        }
        if !LinkKind::is_site_root(path) {
            return None;
        }

        let url = match ctx.base_url().join(&format!("{path}{PLAIN_SUFFIX}")) {
            Ok(url) => url,
            Err(e) => {
                debug!("fetch"; "unresolvable fragment path {path}: {e}");
                return None;
            }
        };

        let body = match ctx.fetcher().fetch(url).await {
            Ok(Some(body)) => body,
            Ok(None) => {
                debug!("fetch"; "fragment not found: {path}");
                return None;
            }
            Err(e) => {
                debug!("fetch"; "fragment fetch failed for {path}: {e}");
                return None;
            }
        };

        let mut root = match parse::parse_into("main", &body) {
            Ok(root) => root,
            Err(e) => {
                debug!("fetch"; "fragment parse failed for {path}: {e}");
                return None;
            }
        };

        rebase_media(&mut root, path, ctx);

        // Decorate nested blocks before handing the subtree back
        super::decorate_main(&mut root);
        super::load_blocks(&mut root, ctx, depth + 1).await;

        Some(root)
    })
}

/// Rewrite relative media references against the fragment's own path.
///
/// The fragment's HTML was authored relative to its own location but is
/// being spliced into a different page, so `./media_*` would resolve against
/// the wrong base once in place.
fn rebase_media(root: &mut Element, path: &str, ctx: &PageContext) {
    let Ok(fragment_base) = ctx.base_url().join(path) else {
        return;
    };

    root.walk_elements_mut(&mut |elem| {
        if elem.is_tag("img") {
            rebase_attr(elem, "src", &fragment_base);
        } else if elem.is_tag("source") {
            rebase_attr(elem, "srcset", &fragment_base);
        }
    });
}

fn rebase_attr(elem: &mut Element, attr: &str, base: &url::Url) {
    let resolved = match elem.get_attr(attr) {
        Some(value) if value.starts_with(MEDIA_PREFIX) => base.join(value).ok(),
        _ => None,
    };
    if let Some(absolute) = resolved {
        elem.set_attr(attr, String::from(absolute));
    }
}

// =============================================================================
// Decorator
// =============================================================================

/// Replacement the driver applies in place of a fragment block.
pub struct FragmentSplice {
    /// Classes of the fragment's section, merged onto the host section.
    pub section_classes: Vec<String>,
    /// The fragment's top-level nodes, spliced where the block stood.
    pub nodes: NodeList,
}

/// Decorate a fragment block.
///
/// The fragment path comes from the block's first link, or failing that its
/// trimmed text content. Returns `None` - leaving the block untouched - when
/// the load fails or the fragment has no section wrapper.
pub async fn decorate(
    block: &mut Element,
    ctx: &PageContext,
    depth: u32,
) -> Option<FragmentSplice> {
    let path = match block.find_descendant("a").and_then(|a| a.get_attr("href")) {
        Some(href) => href.to_string(),
        None => block.text_content().trim().to_string(),
    };

    let mut fragment = load_fragment(&path, ctx, depth).await?;

    let section_classes: Vec<String> = fragment
        .find_descendant_where(&|elem| elem.has_class(SECTION_CLASS))?
        .classes()
        .map(str::to_owned)
        .collect();

    Some(FragmentSplice {
        section_classes,
        nodes: fragment.take_children(),
    })
}

// =============================================================================
// Tests
// =============================================================================
