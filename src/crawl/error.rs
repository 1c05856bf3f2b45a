// src/crawl/error.rs
// =============================================================================
// Errors that can come out of fetching a single page.
//
// None of these ever reach the user directly: the crawler treats a failed
// fetch as "skip this branch" and carries on with the rest of the site.
// They exist so the skip reason can be logged and checked in tests.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The URL could not be parsed as an absolute URL. No request was made.
    #[error("malformed URL '{url}': {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request went out but did not give us a usable page
    /// (transport error, timeout, bad status, or rejected content type).
    #[error("failed to fetch {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// The HTTP client itself could not be built.
    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl CrawlError {
    pub(crate) fn fetch_failed(url: impl Into<String>, reason: impl ToString) -> Self {
        CrawlError::FetchFailed {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_message() {
        let err = CrawlError::fetch_failed("https://example.com/", "HTTP 404 Not Found");
        assert_eq!(
            err.to_string(),
            "failed to fetch https://example.com/: HTTP 404 Not Found"
        );
    }

    #[test]
    fn test_malformed_url_message_names_the_url() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = CrawlError::MalformedUrl {
            url: "not a url".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("malformed URL 'not a url'"));
    }
}
