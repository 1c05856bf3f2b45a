// src/crawl/config.rs
// =============================================================================
// Settings for one crawl run.
//
// main.rs builds this from the command-line flags; tests build it directly
// (usually starting from CrawlConfig::default()).
// =============================================================================

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Timeout for each GET request
    pub timeout: Duration,

    /// Treat a response whose Content-Type is exactly "text/html" as a failed
    /// fetch. Headers with parameters ("text/html; charset=utf-8") or no
    /// header at all are still parsed.
    pub reject_bare_html: bool,

    /// How many site maps may wait in the result channel before crawl tasks
    /// block on sending.
    pub sink_capacity: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            reject_bare_html: true,
            sink_capacity: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.reject_bare_html);
        assert_eq!(config.sink_capacity, 1);
    }
}
