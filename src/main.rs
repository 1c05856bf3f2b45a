// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (to stderr, so stdout only carries site maps)
// 2. Parse command-line arguments using clap
// 3. Start the crawl and print each SiteMap as soon as it arrives
// 4. Exit with 0 when the crawl finishes, 2 on an unexpected error
//
// A seed that can't be fetched is not an error: the crawl simply produces
// no site maps.
// =============================================================================

mod cli;    // src/cli.rs - command-line parsing
mod crawl;  // src/crawl/ - website crawling logic

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use crawl::SiteMap;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG overrides the default filter, e.g. RUST_LOG=site_mapper=debug
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("site_mapper=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut results = crawl::crawl(&cli.url, cli.depth, &cli.crawl_config())
        .context("could not start crawl")?;

    while let Some(map) = results.recv().await {
        print_site_map(&map, cli.json)?;
    }

    Ok(())
}

fn print_site_map(map: &SiteMap, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(map)?);
    } else {
        println!("{}", format_listing(map));
    }
    Ok(())
}

// Plain-text listing (not YAML; URLs are printed as-is, unquoted):
//
//   host: https://example.com/
//   links:
//   - https://example.com/about
//   static:
//   - https://example.com/logo.png
fn format_listing(map: &SiteMap) -> String {
    let mut out = format!("host: {}\n", map.host);
    for (title, urls) in [("links", &map.links), ("static", &map.static_assets)] {
        if urls.is_empty() {
            out.push_str(&format!("{title}: []\n"));
            continue;
        }
        out.push_str(&format!("{title}:\n"));
        for url in urls {
            out.push_str(&format!("- {url}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_listing() {
        let map = SiteMap {
            host: "https://example.com/".to_string(),
            links: vec!["https://example.com/about".to_string()],
            static_assets: vec![],
        };
        assert_eq!(
            format_listing(&map),
            "host: https://example.com/\nlinks:\n- https://example.com/about\nstatic: []\n"
        );
    }
}
