// src/crawl/resolve.rs
// =============================================================================
// Turns the raw href/src values found on a page into absolute URLs.
//
// Two jobs live here:
// - resolve_link(): resolve a (possibly relative) reference against the URL
//   of the page it was found on, and drop it if it points at another host
// - LinkKind::of(): decide whether a resolved URL is a page we may crawl
//   further, or a static asset (anything whose path has a file extension)
//
// Everything here is pure: no I/O, no shared state. That makes it safe to call
// from as many tasks at once as we like.
// =============================================================================

use url::Url;

// What kind of thing a resolved link points to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// No file extension: another page, candidate for crawling
    Page,
    /// Has a file extension (.png, .js, .css, ...): never crawled
    Static,
}

impl LinkKind {
    pub fn of(url: &Url) -> Self {
        if file_extension(url.path()).is_some() {
            LinkKind::Static
        } else {
            LinkKind::Page
        }
    }
}

// Resolves a raw attribute value against the page URL
//
// Returns None when:
// - the reference can't be parsed at all
// - the resolved URL is on a different host (or port) than the page
//
// The fragment is dropped: "#top" on a page is that page itself.
//
// Examples, with base = "https://example.com/docs/intro":
//   "setup"               -> Some("https://example.com/docs/setup")
//   "../img/logo.png"     -> Some("https://example.com/img/logo.png")
//   "#install"            -> Some("https://example.com/docs/intro")
//   "http://example.com/" -> Some("http://example.com/")
//   "//cdn.example.com/x" -> None (different host)
//   "mailto:me@x.org"     -> None (no host at all)
pub fn resolve_link(raw: &str, base: &Url) -> Option<Url> {
    // Url::join handles absolute references too: they simply replace the base
    let mut resolved = base.join(raw).ok()?;
    resolved.set_fragment(None);

    if is_same_host(&resolved, base) {
        Some(resolved)
    } else {
        None
    }
}

// Host must match exactly. "www.example.com" and "example.com" are different
// hosts, and so are two explicit ports on the same machine. The scheme is not
// compared, and port() is None for a scheme's default port.
fn is_same_host(candidate: &Url, base: &Url) -> bool {
    candidate.host_str().is_some()
        && candidate.host_str() == base.host_str()
        && candidate.port() == base.port()
}

// Extension of the last path segment, including the dot.
// "/img/logo.png" -> Some(".png"), "/about" -> None, "/" -> None
fn file_extension(path: &str) -> Option<&str> {
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment.rfind('.').map(|dot| &segment[dot..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/docs/intro").unwrap()
    }

    #[test]
    fn test_resolve_relative_link() {
        let url = resolve_link("setup", &base()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/docs/setup");
    }

    #[test]
    fn test_resolve_dot_segments() {
        let url = resolve_link("../img/./logo.png", &base()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/img/logo.png");
    }

    #[test]
    fn test_resolve_absolute_same_host() {
        let url = resolve_link("https://example.com/blog?page=2", &base()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/blog?page=2");
    }

    #[test]
    fn test_drop_other_host() {
        assert_eq!(resolve_link("https://other.com/", &base()), None);
        assert_eq!(resolve_link("//cdn.example.com/app.js", &base()), None);
    }

    #[test]
    fn test_drop_subdomain() {
        assert_eq!(resolve_link("https://www.example.com/", &base()), None);
    }

    #[test]
    fn test_drop_other_port() {
        assert_eq!(resolve_link("https://example.com:8443/", &base()), None);
    }

    #[test]
    fn test_drop_hostless_schemes() {
        assert_eq!(resolve_link("mailto:test@example.com", &base()), None);
        assert_eq!(resolve_link("javascript:void(0)", &base()), None);
    }

    #[test]
    fn test_drop_unparseable() {
        assert_eq!(resolve_link("http://exa mple.com/", &base()), None);
    }

    #[test]
    fn test_fragment_resolves_to_the_page() {
        let url = resolve_link("#section", &base()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/docs/intro");
        assert_eq!(LinkKind::of(&url), LinkKind::Page);

        let url = resolve_link("/faq?lang=en#top", &base()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/faq?lang=en");
    }

    #[test]
    fn test_keep_same_host_other_scheme() {
        let url = resolve_link("http://example.com/about", &base()).unwrap();
        assert_eq!(url.as_str(), "http://example.com/about");
    }

    #[test]
    fn test_explicit_default_port_is_same_host() {
        let url = resolve_link("https://example.com:443/about", &base()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/about");
    }

    #[test]
    fn test_link_kind() {
        let kind = |s: &str| LinkKind::of(&Url::parse(s).unwrap());
        assert_eq!(kind("https://example.com/"), LinkKind::Page);
        assert_eq!(kind("https://example.com/about"), LinkKind::Page);
        assert_eq!(kind("https://example.com/v1.2/guide"), LinkKind::Page);
        assert_eq!(kind("https://example.com/search?q=a.b"), LinkKind::Page);
        assert_eq!(kind("https://example.com/logo.png"), LinkKind::Static);
        assert_eq!(kind("https://example.com/js/app.min.js?v=3"), LinkKind::Static);
    }
}
