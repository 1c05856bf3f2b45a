// src/crawl/orchestrator.rs
// =============================================================================
// Drives the crawl: one task per page, children spawned as links are found.
//
// How it works:
// 1. start() marks the seed as visited and spawns the first task
// 2. Each task fetches its page, claims every link nobody has claimed yet,
//    spawns a child task (depth - 1) for each of them, and then sends its
//    SiteMap to the result channel
// 3. A supervisor task waits until every crawl task has finished and then
//    drops the last sender it owns, which closes the channel
// 4. The caller reads SiteMaps from the SiteMapStream until it ends
//
// Every task is spawned through the same TaskTracker, so a child is counted
// before it can possibly run, and the tracker can only become empty once the
// whole tree of tasks is done.
//
// Nothing here is ordered: sibling pages are crawled at the same time and
// results arrive in whatever order the fetches finish.
// =============================================================================

use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};
use url::Url;

use super::config::CrawlConfig;
use super::error::CrawlError;
use super::fetch::Fetcher;
use super::sitemap::SiteMap;
use super::visited::VisitedSet;

// How a single crawl task ended
#[derive(Debug)]
pub enum CrawlOutcome {
    /// The page was fetched and its SiteMap was sent
    Emitted,
    /// Nothing was sent for this page
    Skipped(SkipReason),
}

#[derive(Debug)]
pub enum SkipReason {
    /// Called with depth 0
    DepthExhausted,
    /// The fetch failed; the branch ends here
    FetchFailed(CrawlError),
    /// The SiteMapStream was dropped before we could send
    SinkClosed,
}

// State shared by every task of one crawl run
struct CrawlState {
    fetcher: Fetcher,
    visited: VisitedSet,
    tracker: TaskTracker,
    emitted: AtomicUsize,
    skipped: AtomicUsize,
}

#[derive(Clone)]
pub struct Crawler {
    state: Arc<CrawlState>,
    sink: mpsc::Sender<SiteMap>,
}

// Starts a crawl of `seed`, following links up to `depth` pages deep.
//
// depth = 0 fetches nothing, depth = 1 fetches only the seed, depth = 2 the
// seed plus the pages it links to, and so on.
//
// Only fails if the HTTP client can't be built. A seed that is malformed or
// unreachable just produces an empty stream.
pub fn crawl(seed: &str, depth: usize, config: &CrawlConfig) -> Result<SiteMapStream, CrawlError> {
    let fetcher = Fetcher::new(config)?;
    Ok(start(fetcher, seed, depth, config.sink_capacity))
}

// Must be called from inside a tokio runtime
pub fn start(fetcher: Fetcher, seed: &str, depth: usize, sink_capacity: usize) -> SiteMapStream {
    let (sink, results) = mpsc::channel(sink_capacity.max(1));
    let crawler = Crawler::new(fetcher, sink.clone());
    let state = Arc::clone(&crawler.state);

    // Child links are keyed by their parsed form, so key the seed the same
    // way ("http://host" and "http://host/" are one page). A seed that doesn't
    // parse is kept as-is and fails in the fetcher.
    let seed = match Url::parse(seed) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => seed.to_string(),
    };

    info!(seed = %seed, depth, "starting crawl");
    state.visited.mark(&seed);
    crawler.spawn(seed, depth);
    drop(crawler);

    // No more top-level tasks. wait() resolves once closed and empty, and
    // children are spawned from running tasks, so it can't fire early.
    state.tracker.close();

    tokio::spawn(async move {
        state.tracker.wait().await;
        info!(
            emitted = state.emitted.load(Ordering::Relaxed),
            skipped = state.skipped.load(Ordering::Relaxed),
            visited = state.visited.len(),
            "crawl finished"
        );
        // Every task (and its sender) is gone, so this closes the channel
        drop(sink);
    });

    SiteMapStream { results }
}

impl Crawler {
    fn new(fetcher: Fetcher, sink: mpsc::Sender<SiteMap>) -> Self {
        let state = CrawlState {
            fetcher,
            visited: VisitedSet::new(),
            tracker: TaskTracker::new(),
            emitted: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
        };

        Self {
            state: Arc::new(state),
            sink,
        }
    }

    // The only way a crawl task gets started
    fn spawn(&self, url: String, depth: usize) {
        let crawler = self.clone();
        self.state.tracker.spawn(async move {
            let outcome = crawler.visit(&url, depth).await;
            crawler.record(&url, &outcome);
        });
    }

    // One crawl task, start to finish
    pub async fn visit(&self, url: &str, depth: usize) -> CrawlOutcome {
        if depth == 0 {
            return CrawlOutcome::Skipped(SkipReason::DepthExhausted);
        }
        self.state.visited.mark(url);

        let map = match self.state.fetcher.fetch(url).await {
            Ok(map) => map,
            Err(e) => return CrawlOutcome::Skipped(SkipReason::FetchFailed(e)),
        };

        // A child at depth 0 would stop straight away, so don't spawn it,
        // and don't claim its URL either: another path may reach it with
        // depth to spare.
        if depth > 1 && !self.sink.is_closed() {
            let spawned = self
                .state
                .visited
                .visit_new(&map.links, |link| self.spawn(link.clone(), depth - 1));
            debug!(url, spawned, "spawned child tasks");
        }

        match self.sink.send(map).await {
            Ok(()) => CrawlOutcome::Emitted,
            Err(_) => CrawlOutcome::Skipped(SkipReason::SinkClosed),
        }
    }

    fn record(&self, url: &str, outcome: &CrawlOutcome) {
        match outcome {
            CrawlOutcome::Emitted => {
                self.state.emitted.fetch_add(1, Ordering::Relaxed);
                debug!(url, "emitted site map");
            }
            CrawlOutcome::Skipped(SkipReason::FetchFailed(e)) => {
                self.state.skipped.fetch_add(1, Ordering::Relaxed);
                warn!(url, error = %e, "skipped");
            }
            CrawlOutcome::Skipped(reason) => {
                self.state.skipped.fetch_add(1, Ordering::Relaxed);
                debug!(url, ?reason, "skipped");
            }
        }
    }
}

// The results of one crawl run, in completion order.
//
// Ends once every crawl task has finished. Dropping it early makes the
// remaining tasks stop spawning new work.
pub struct SiteMapStream {
    results: mpsc::Receiver<SiteMap>,
}

impl SiteMapStream {
    pub async fn recv(&mut self) -> Option<SiteMap> {
        self.results.recv().await
    }
}

impl Stream for SiteMapStream {
    type Item = SiteMap;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<SiteMap>> {
        self.results.poll_recv(cx)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a TaskTracker instead of counting tasks ourselves?
//    - tracker.spawn() registers the task and starts it in one call
//    - tracker.wait() resolves when the tracker is closed AND empty
//    - We close it right after spawning the seed task; children spawned
//      later still count, because a parent is alive while it spawns them
//
// 2. How does the result channel get closed?
//    - An mpsc channel ends when every Sender has been dropped
//    - Each task holds a Sender (inside its Crawler clone) until it finishes
//    - The supervisor holds one more, and drops it only after wait()
//
// 3. Why is the channel so small (capacity 1 by default)?
//    - send().await blocks when the channel is full
//    - A slow reader therefore slows the crawl down instead of letting
//      finished pages pile up in memory
// -----------------------------------------------------------------------------
