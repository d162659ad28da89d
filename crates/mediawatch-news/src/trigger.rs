//! Turns UI-side load signals into feed fetches.
//!
//! The rendered list places a sentinel after the last item; each time it
//! scrolls into view the view layer reports [`LoadSignal::SentinelVisible`].
//! A "Load More" button reports [`LoadSignal::LoadMore`]. The trigger fires
//! at most one fetch per signal and drops signals that arrive while a fetch
//! is in flight or after the final page; they are ignored, never queued.

use crate::feed::ArticleFeed;

/// Why the next page was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSignal {
    /// The end-of-list sentinel became visible.
    SentinelVisible,
    /// The user pressed the manual "Load More" control.
    LoadMore,
}

/// Gate between load signals and [`ArticleFeed::fetch_next_page`].
#[derive(Debug, Default)]
pub struct LoadTrigger {
    signals_seen: u64,
    fetches_started: u64,
}

impl LoadTrigger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles one load signal. Returns whether a fetch was performed.
    ///
    /// Sentinel visibility never auto-retries a failed fetch: after an
    /// error only the manual control re-attempts, so a broken backend does
    /// not get hammered by every scroll event.
    pub async fn notify(&mut self, signal: LoadSignal, feed: &mut ArticleFeed) -> bool {
        self.signals_seen += 1;
        if !feed.has_more() || feed.is_loading() || feed.is_fetching_more() {
            return false;
        }
        if signal == LoadSignal::SentinelVisible && feed.last_error().is_some() {
            return false;
        }
        let fetched = feed.fetch_next_page().await;
        if fetched {
            self.fetches_started += 1;
        }
        fetched
    }

    /// Convenience for [`LoadSignal::SentinelVisible`].
    pub async fn on_sentinel_visible(&mut self, feed: &mut ArticleFeed) -> bool {
        self.notify(LoadSignal::SentinelVisible, feed).await
    }

    /// Convenience for [`LoadSignal::LoadMore`].
    pub async fn on_load_more(&mut self, feed: &mut ArticleFeed) -> bool {
        self.notify(LoadSignal::LoadMore, feed).await
    }

    /// Signals received so far, fetched or not.
    #[must_use]
    pub fn signals_seen(&self) -> u64 {
        self.signals_seen
    }

    /// Signals that actually started a fetch.
    #[must_use]
    pub fn fetches_started(&self) -> u64 {
        self.fetches_started
    }
}
