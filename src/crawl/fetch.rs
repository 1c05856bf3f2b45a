// src/crawl/fetch.rs
// =============================================================================
// Fetches one page and turns it into a SiteMap.
//
// How it works:
// 1. Parse the URL (a malformed URL fails before any request is made)
// 2. GET it with a timeout; transport errors and non-2xx statuses fail
// 3. Apply the content-type guard (see CrawlConfig::reject_bare_html)
// 4. Read the body chunk by chunk; if the stream breaks halfway we keep
//    what we already have
// 5. Walk the HTML and collect every distinct href/src value on
//    <a>, <link>, <img>, <image> and <script> tags
// 6. Resolve all of them concurrently (one task each), wait for every
//    task, and file the same-host results under links or static
//
// Rust concepts:
// - JoinSet: a group of spawned tasks we can wait on one by one
// - bytes_stream(): the response body as a Stream of chunks
// =============================================================================

use std::collections::HashSet;

use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use scraper::{ElementRef, Html};
use tokio::task::JoinSet;
use tracing::{debug, warn};
use url::Url;

use super::config::CrawlConfig;
use super::error::CrawlError;
use super::resolve::resolve_link;
use super::sitemap::SiteMap;

// Tags whose href/src attributes we follow
const LINK_TAGS: &[&str] = &["a", "link", "img", "image", "script"];
const LINK_ATTRS: &[&str] = &["href", "src"];

// The content type that is rejected when reject_bare_html is on
const BARE_HTML: &str = "text/html";

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    reject_bare_html: bool,
}

impl Fetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            reject_bare_html: config.reject_bare_html,
        })
    }

    // Fetches `url` and returns its site map
    //
    // The returned SiteMap's host is `url` exactly as it was passed in.
    pub async fn fetch(&self, url: &str) -> Result<SiteMap, CrawlError> {
        let page_url = Url::parse(url).map_err(|source| CrawlError::MalformedUrl {
            url: url.to_string(),
            source,
        })?;

        let body = self.get_body(&page_url).await?;
        let refs = extract_refs(&body);
        debug!(url, refs = refs.len(), "parsed page");

        Ok(resolve_all(SiteMap::new(url), refs, &page_url).await)
    }

    async fn get_body(&self, url: &Url) -> Result<String, CrawlError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CrawlError::fetch_failed(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::fetch_failed(url.as_str(), format!("HTTP {status}")));
        }

        if self.reject_bare_html && content_type(&response) == Some(BARE_HTML) {
            return Err(CrawlError::fetch_failed(
                url.as_str(),
                "content type is exactly text/html",
            ));
        }

        Ok(read_body(url, response).await)
    }
}

fn content_type(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
}

// Reads the whole body, stopping early (without failing) if a chunk errors
async fn read_body(url: &Url, response: Response) -> String {
    let mut body = Vec::new();
    let mut chunks = response.bytes_stream();

    while let Some(chunk) = chunks.next().await {
        match chunk {
            Ok(bytes) => body.extend_from_slice(&bytes),
            Err(e) => {
                debug!(url = %url, error = %e, read = body.len(), "body stream ended early");
                break;
            }
        }
    }

    String::from_utf8_lossy(&body).into_owned()
}

// Collects the distinct raw href/src values, element by element in document
// order.
//
// Kept synchronous on purpose: scraper's Html is not Send, so it must be
// gone before the caller's next .await.
fn extract_refs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut refs = Vec::new();

    let elements = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap);

    for element in elements {
        if !LINK_TAGS.contains(&element.value().name()) {
            continue;
        }
        for (key, value) in element.value().attrs() {
            if LINK_ATTRS.contains(&key) && seen.insert(value.to_string()) {
                refs.push(value.to_string());
            }
        }
    }

    refs
}

// Resolves every raw reference on its own task and gathers the results.
// Results come back in completion order, not page order.
async fn resolve_all(mut map: SiteMap, refs: Vec<String>, base: &Url) -> SiteMap {
    let mut tasks = JoinSet::new();
    for raw in refs {
        let base = base.clone();
        tasks.spawn(async move { resolve_link(&raw, &base) });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some(url)) => map.push(url),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "link resolution task failed"),
        }
    }

    map
}
