// src/crawl/sitemap.rs
// =============================================================================
// The record we produce for every page that was fetched successfully.
//
// Serialized field names are "host", "links" and "static", which is what the
// JSON output shows.
// =============================================================================

use serde::Serialize;
use url::Url;

use super::resolve::LinkKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteMap {
    /// The URL that was fetched
    pub host: String,
    /// Same-host URLs without a file extension (crawlable pages)
    pub links: Vec<String>,
    /// Same-host URLs with a file extension (images, scripts, stylesheets...)
    #[serde(rename = "static")]
    pub static_assets: Vec<String>,
}

impl SiteMap {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    // Files a resolved URL under links or static depending on its path
    pub fn push(&mut self, url: Url) {
        match LinkKind::of(&url) {
            LinkKind::Page => self.links.push(url.into()),
            LinkKind::Static => self.static_assets.push(url.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_classifies() {
        let mut map = SiteMap::new("https://example.com/");
        map.push(Url::parse("https://example.com/about").unwrap());
        map.push(Url::parse("https://example.com/logo.png").unwrap());

        assert_eq!(map.links, vec!["https://example.com/about"]);
        assert_eq!(map.static_assets, vec!["https://example.com/logo.png"]);
    }

    #[test]
    fn test_json_field_names() {
        let map = SiteMap::new("https://example.com/");
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "host": "https://example.com/", "links": [], "static": [] })
        );
    }
}
