// src/crawl/visited.rs
// =============================================================================
// The set of URLs that have already been claimed by a crawl task.
//
// One VisitedSet is created per crawl run and shared (via Arc) by every task
// in that run. All access goes through a Mutex, so "is it visited?" followed
// by "mark it" can be done as a single step with visit_new().
//
// The lock is only ever held for a few HashSet operations and never across
// an .await, so a std Mutex is fine here (no need for tokio's async Mutex).
// =============================================================================

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    // Marks a URL as visited. Marking twice is harmless.
    pub fn mark(&self, url: &str) {
        self.lock().insert(url.to_string());
    }

    // Runs `f` on every URL in `urls` that is not yet visited, all under one
    // lock acquisition, and marks each of them visited first.
    //
    // Returns how many URLs were new.
    pub fn visit_new<'a, I, F>(&self, urls: I, mut f: F) -> usize
    where
        I: IntoIterator<Item = &'a String>,
        F: FnMut(&'a String),
    {
        let mut set = self.lock();
        let mut fresh = 0;
        for url in urls {
            if set.insert(url.clone()) {
                fresh += 1;
                f(url);
            }
        }
        fresh
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // A panic in another task while holding the lock doesn't make the set
    // itself inconsistent, so we keep using it.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
