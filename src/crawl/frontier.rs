// src/crawl/frontier.rs
// =============================================================================
// The frontier holds the URLs waiting to be crawled plus the set of URLs
// that have already been claimed by a worker.
//
// How it works:
// 1. Discovered links are pushed onto a FIFO queue (no dedup check, cheap)
// 2. The scheduler pops a URL and claims it before starting any work
// 3. claim() checks and marks the URL as visited in one step, so two
//    in-flight tasks can never both process the same URL
//
// Both collections sit behind a single Mutex. No lock is ever held across
// an .await, so a plain std Mutex is enough.
// =============================================================================

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct State {
    queue: VecDeque<String>,
    visited: HashSet<String>,
}

#[derive(Debug, Default)]
pub struct Frontier {
    state: Mutex<State>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic in another task cannot leave the queue or the set half
    // updated, so a poisoned lock is still safe to use
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Appends a URL to the back of the queue
    pub fn enqueue(&self, url: impl Into<String>) {
        self.lock().queue.push_back(url.into());
    }

    /// Appends every URL that has not been claimed yet.
    ///
    /// Returns how many URLs were queued.
    pub fn enqueue_unvisited<I>(&self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut state = self.lock();
        let mut queued = 0;
        for url in urls {
            if !state.visited.contains(&url) {
                state.queue.push_back(url);
                queued += 1;
            }
        }
        queued
    }

    /// Pops the oldest queued URL
    pub fn dequeue(&self) -> Option<String> {
        self.lock().queue.pop_front()
    }

    /// Marks `url` as visited.
    ///
    /// Returns `true` if this call claimed it, `false` if it was already
    /// claimed and the caller must skip it.
    pub fn claim(&self, url: &str) -> bool {
        let mut state = self.lock();
        if state.visited.contains(url) {
            return false;
        }
        state.visited.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.lock().visited.contains(url)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().queue.is_empty()
    }

    /// Number of URLs waiting in the queue
    pub fn len(&self) -> usize {
        self.lock().queue.len()
    }

    /// Number of URLs claimed so far
    pub fn visited_count(&self) -> usize {
        self.lock().visited.len()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Mutex if tasks run on one thread?
//    - The Crawler can still be shared across threads by a library user
//    - Mutex<T> is what makes &Frontier usable from many places at once
//
// 2. What is MutexGuard?
//    - The value returned by lock(); the lock is released when it is dropped
//    - Each method takes the lock once, so every operation is atomic
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_fifo_order() {
        let frontier = Frontier::new();
        frontier.enqueue("https://example.com/a");
        frontier.enqueue("https://example.com/b");
        frontier.enqueue("https://example.com/a");

        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.dequeue().as_deref(), Some("https://example.com/a"));
        assert_eq!(frontier.dequeue().as_deref(), Some("https://example.com/b"));
        assert_eq!(frontier.dequeue().as_deref(), Some("https://example.com/a"));
        assert_eq!(frontier.dequeue(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_claim_once() {
        let frontier = Frontier::new();
        assert!(frontier.claim("https://example.com/"));
        assert!(!frontier.claim("https://example.com/"));
        assert!(frontier.is_visited("https://example.com/"));
        assert_eq!(frontier.visited_count(), 1);
    }

    #[test]
    fn test_enqueue_does_not_claim() {
        let frontier = Frontier::new();
        frontier.enqueue("https://example.com/a");
        assert!(!frontier.is_visited("https://example.com/a"));
        assert!(frontier.claim("https://example.com/a"));
    }

    #[test]
    fn test_enqueue_unvisited_skips_claimed() {
        let frontier = Frontier::new();
        frontier.claim("https://example.com/");

        let queued = frontier.enqueue_unvisited(vec![
            "https://example.com/".to_string(),
            "https://example.com/new".to_string(),
        ]);

        assert_eq!(queued, 1);
        assert_eq!(frontier.dequeue().as_deref(), Some("https://example.com/new"));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_concurrent_claims_have_one_winner() {
        let frontier = Arc::new(Frontier::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let frontier = Arc::clone(&frontier);
                std::thread::spawn(move || frontier.claim("https://example.com/race"))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|claimed| *claimed)
            .count();

        assert_eq!(winners, 1);
    }
}
