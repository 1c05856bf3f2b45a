// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use std::time::Duration;

use clap::Parser;

use crate::crawl::CrawlConfig;

#[derive(Parser, Debug)]
#[command(
    name = "site-mapper",
    version = "0.1.0",
    about = "Crawls a website and prints a site map for every page it fetches",
    long_about = "site-mapper starts at a URL, follows links that stay on the same host, \
                  and prints each page's links and static assets (images, scripts, stylesheets) \
                  as soon as the page has been fetched."
)]
pub struct Cli {
    /// URL to start crawling from
    #[arg(long, default_value = "https://www.golang.org/")]
    pub url: String,

    /// How deep the crawler should search through the site
    ///
    /// Depth 0 = fetch nothing
    /// Depth 1 = just the starting page
    /// Depth 2 = starting page + all pages it links to
    #[arg(long, default_value_t = 2)]
    pub depth: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,

    /// Print one JSON object per line instead of the default listing
    #[arg(long)]
    pub json: bool,

    /// Parse responses whose Content-Type is exactly "text/html"
    ///
    /// By default those responses are treated as failed fetches.
    #[arg(long)]
    pub accept_bare_html: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            timeout: Duration::from_secs(self.timeout),
            reject_bare_html: !self.accept_bare_html,
            ..CrawlConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["site-mapper"]);
        assert_eq!(cli.url, "https://www.golang.org/");
        assert_eq!(cli.depth, 2);
        assert!(!cli.json);

        let config = cli.crawl_config();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.reject_bare_html);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "site-mapper",
            "--url",
            "https://example.com/",
            "--depth",
            "4",
            "--timeout",
            "10",
            "--json",
            "--accept-bare-html",
        ]);
        assert_eq!(cli.url, "https://example.com/");
        assert_eq!(cli.depth, 4);
        assert!(cli.json);

        let config = cli.crawl_config();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(!config.reject_bare_html);
    }
}
