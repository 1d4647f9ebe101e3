//! Responsive picture markup.
//!
//! Rebuilds a `<picture>` so the server can deliver resized, recompressed
//! variants: one webp `<source>` per breakpoint, format-preserving fallback
//! `<source>`s, and a final `<img>` carrying the alt text and load hint.

use url::Url;

use crate::dom::Element;

/// One requested rendition of an image.
#[derive(Debug, Clone)]
pub struct Breakpoint {
    /// Media query gating this rendition, if any.
    pub media: Option<String>,
    /// Requested width in CSS pixels.
    pub width: u32,
}

impl Breakpoint {
    pub fn new(media: &str, width: u32) -> Self {
        Self {
            media: Some(media.to_string()),
            width,
        }
    }

    /// Breakpoint with no media query (applies unconditionally).
    pub fn plain(width: u32) -> Self {
        Self { media: None, width }
    }
}

/// Default renditions: wide screens get 2000px, everything else 750px.
pub fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new("(min-width: 600px)", 2000),
        Breakpoint::plain(750),
    ]
}

/// Build an optimized `<picture>` element for `src`.
///
/// `src` is resolved against `base` and reduced to its path; width, format
/// and quality are requested through query parameters understood by the
/// media delivery endpoint. The last breakpoint provides the `<img>`
/// fallback; `eager` controls its load hint.
pub fn create_optimized_picture(
    src: &str,
    alt: &str,
    eager: bool,
    breakpoints: &[Breakpoint],
    base: &Url,
) -> Element {
    let path = match base.join(src) {
        Ok(resolved) => resolved.path().to_string(),
        // Unresolvable src: fall back to the raw value minus query/fragment
        Err(_) => src.split(['?', '#']).next().unwrap_or(src).to_string(),
    };
    let ext = path.rfind('.').map(|dot| &path[dot + 1..]).unwrap_or("");

    let mut picture = Element::new("picture");

    // webp sources, one per breakpoint
    for breakpoint in breakpoints {
        let mut source = Element::new("source");
        if let Some(media) = &breakpoint.media {
            source.set_attr("media", media.clone());
        }
        source.set_attr("type", "image/webp");
        source.set_attr("srcset", rendition_url(&path, breakpoint.width, "webply"));
        picture.push_element(source);
    }

    // Format-preserving fallbacks; the last breakpoint becomes the img itself
    for (i, breakpoint) in breakpoints.iter().enumerate() {
        if i < breakpoints.len() - 1 {
            let mut source = Element::new("source");
            if let Some(media) = &breakpoint.media {
                source.set_attr("media", media.clone());
            }
            source.set_attr("srcset", rendition_url(&path, breakpoint.width, ext));
            picture.push_element(source);
        } else {
            let mut img = Element::new("img");
            img.set_attr("loading", if eager { "eager" } else { "lazy" });
            img.set_attr("alt", alt);
            img.set_attr("src", rendition_url(&path, breakpoint.width, ext));
            picture.push_element(img);
        }
    }

    picture
}

fn rendition_url(path: &str, width: u32, format: &str) -> String {
    format!("{path}?width={width}&format={format}&optimize=medium")
}

// =============================================================================
// Tests
// =============================================================================
