// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Concurrent crawling: every page is fetched on its own task
// - Same-host restriction (links to other hosts are dropped)
// - Depth limit
// - Each URL is claimed once per run, so cycles and self-links end quickly
//
// Submodules:
// - resolve: turning raw href/src values into absolute same-host URLs
// - fetch: downloading one page and building its SiteMap
// - visited: the shared set of claimed URLs
// - orchestrator: spawning tasks and streaming SiteMaps back to the caller
// =============================================================================

mod config;
mod error;
mod fetch;
mod orchestrator;
mod resolve;
mod sitemap;
mod visited;

// Re-export what main.rs needs
pub use config::CrawlConfig;
pub use orchestrator::crawl;
pub use sitemap::SiteMap;
