//! Link classification utilities.

/// Syntactic classification of links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// External link with URL scheme (https://, mailto:, tel:, etc.)
    External(&'a str),
    /// Pure anchor link (#section). Value is the anchor without `#`.
    Anchor(&'a str),
    /// Site-root-relative path (/footer, /fragments/nav).
    SiteRoot(&'a str),
    /// File-relative path (./media_1.png, ../other).
    FileRelative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a link string into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if is_external_link(link) {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Anchor(anchor)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::FileRelative(link)
        }
    }

    /// Whether the link is a site-root-relative path.
    ///
    /// Only these are eligible as fragment paths; everything else is
    /// rejected before any network traffic happens.
    #[inline]
    pub fn is_site_root(link: &str) -> bool {
        matches!(LinkKind::parse(link), LinkKind::SiteRoot(_))
    }
}

/// Check for a URL scheme prefix (`scheme:` per RFC 3986).
fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_external() {
        assert!(matches!(
            LinkKind::parse("https://external.example/x"),
            LinkKind::External("https://external.example/x")
        ));
        assert!(matches!(
            LinkKind::parse("mailto:user@example.com"),
            LinkKind::External("mailto:user@example.com")
        ));
    }

    #[test]
    fn test_parse_anchor() {
        assert!(matches!(LinkKind::parse("#top"), LinkKind::Anchor("top")));
        assert!(matches!(LinkKind::parse("#"), LinkKind::Anchor("")));
    }

    #[test]
    fn test_parse_site_root() {
        assert!(matches!(
            LinkKind::parse("/footer"),
            LinkKind::SiteRoot("/footer")
        ));
        assert!(matches!(
            LinkKind::parse("/fragments/nav"),
            LinkKind::SiteRoot("/fragments/nav")
        ));
    }

    #[test]
    fn test_parse_file_relative() {
        assert!(matches!(
            LinkKind::parse("./media_1.png"),
            LinkKind::FileRelative("./media_1.png")
        ));
        assert!(matches!(
            LinkKind::parse("media_1.png"),
            LinkKind::FileRelative("media_1.png")
        ));
        // Empty is not a usable path of any kind, but must not panic
        assert!(matches!(LinkKind::parse(""), LinkKind::FileRelative("")));
    }

    #[test]
    fn test_is_site_root() {
        assert!(LinkKind::is_site_root("/footer"));
        assert!(!LinkKind::is_site_root(""));
        assert!(!LinkKind::is_site_root("https://external.example/x"));
        assert!(!LinkKind::is_site_root("footer"));
        assert!(!LinkKind::is_site_root("#footer"));
    }
}
