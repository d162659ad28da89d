//! The infinite article collection.
//!
//! [`FeedState`] is the pure pagination state machine: it decides when a
//! fetch may start, applies results, and enforces the core invariants:
//! at most one fetch in flight, offset advances by the page size only on
//! success, `has_more` latches false on the first short page, and a
//! completion from a superseded filter session is discarded rather than
//! merged. [`ArticleFeed`] wires the machine to a [`NewsClient`] and the
//! current [`FilterState`].
//!
//! Splitting the machine from the I/O keeps every transition testable
//! without a server: the async wrapper only ever calls `begin`, performs
//! the HTTP request, and calls `complete` with the outcome.

use crate::client::NewsClient;
use crate::error::NewsError;
use crate::filters::FilterState;
use crate::types::Article;

/// Articles per page. Constant for the life of one scroll session.
pub const DEFAULT_PAGE_SIZE: u64 = 30;

/// Where the collection is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchPhase {
    Idle,
    LoadingFirstPage,
    LoadingMore,
}

/// Proof that a fetch was begun, carrying the filter-session generation and
/// the offset to request. A ticket whose generation has been superseded by
/// a reset is rejected at completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    generation: u64,
    offset: u64,
}

impl PageTicket {
    /// Item offset the page request should start at.
    #[must_use]
    pub fn offset(self) -> u64 {
        self.offset
    }
}

/// Pagination state machine for one article collection.
#[derive(Debug)]
pub struct FeedState {
    items: Vec<Article>,
    offset: u64,
    page_size: u64,
    has_more: bool,
    phase: FetchPhase,
    last_error: Option<NewsError>,
    generation: u64,
}

impl FeedState {
    #[must_use]
    pub fn new(page_size: u64) -> Self {
        Self {
            items: Vec::new(),
            offset: 0,
            page_size,
            has_more: true,
            phase: FetchPhase::Idle,
            last_error: None,
            generation: 0,
        }
    }

    /// Discards all accumulated state for a new filter session: items and
    /// error cleared, offset back to zero, `has_more` true again. Bumps the
    /// generation so any fetch still in flight completes into the void.
    pub fn reset(&mut self) {
        self.items.clear();
        self.offset = 0;
        self.has_more = true;
        self.phase = FetchPhase::Idle;
        self.last_error = None;
        self.generation += 1;
    }

    /// Starts a fetch if one may start now.
    ///
    /// Returns `None` (a no-op for the caller) while a fetch is already
    /// in flight or once the collection is terminal (`has_more` false).
    pub fn begin(&mut self) -> Option<PageTicket> {
        if self.phase != FetchPhase::Idle {
            tracing::debug!(offset = self.offset, "fetch already in flight, ignoring");
            return None;
        }
        if !self.has_more {
            return None;
        }
        self.phase = if self.items.is_empty() && self.offset == 0 {
            FetchPhase::LoadingFirstPage
        } else {
            FetchPhase::LoadingMore
        };
        Some(PageTicket {
            generation: self.generation,
            offset: self.offset,
        })
    }

    /// Applies the outcome of the fetch begun with `ticket`.
    ///
    /// A stale ticket (the state was reset after `begin`) is discarded
    /// without touching the current session. On success the page is appended
    /// even when empty, the offset advances by the page size, and `has_more`
    /// turns false iff the page was shorter than the page size. On failure
    /// the error is stored and nothing else moves, so a retry re-attempts
    /// the same offset.
    pub fn complete(&mut self, ticket: PageTicket, result: Result<Vec<Article>, NewsError>) {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding page fetched for superseded filters"
            );
            return;
        }
        self.phase = FetchPhase::Idle;
        match result {
            Ok(page) => {
                self.has_more = page.len() as u64 >= self.page_size;
                self.items.extend(page);
                self.offset += self.page_size;
                self.last_error = None;
            }
            Err(err) => {
                tracing::warn!(offset = ticket.offset, error = %err, "page fetch failed");
                self.last_error = Some(err);
            }
        }
    }

    /// All articles fetched so far, in arrival order.
    #[must_use]
    pub fn items(&self) -> &[Article] {
        &self.items
    }

    /// True while the first page of a filter session is being fetched.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::LoadingFirstPage
    }

    /// True while a follow-up page is being fetched.
    #[must_use]
    pub fn is_fetching_more(&self) -> bool {
        self.phase == FetchPhase::LoadingMore
    }

    /// False once a page came back shorter than the page size.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Error of the most recent failed fetch, cleared by the next success
    /// or reset.
    #[must_use]
    pub fn last_error(&self) -> Option<&NewsError> {
        self.last_error.as_ref()
    }

    /// Item offset the next page would start at.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn page_size(&self) -> u64 {
        self.page_size
    }
}

/// Accumulating, paginated article collection bound to a [`NewsClient`].
pub struct ArticleFeed {
    client: NewsClient,
    filters: FilterState,
    state: FeedState,
    started: bool,
}

impl ArticleFeed {
    #[must_use]
    pub fn new(client: NewsClient) -> Self {
        Self::with_page_size(client, DEFAULT_PAGE_SIZE)
    }

    #[must_use]
    pub fn with_page_size(client: NewsClient, page_size: u64) -> Self {
        Self {
            client,
            filters: FilterState::default(),
            state: FeedState::new(page_size),
            started: false,
        }
    }

    /// Replaces the filter set and, if it differs from the current one,
    /// discards the collection and fetches page zero.
    ///
    /// Returns whether a fetch was performed. Fetch failures are stored on
    /// the feed ([`Self::last_error`]) rather than returned, mirroring how
    /// the collection surfaces errors to its consumer.
    pub async fn apply_filters(&mut self, filters: FilterState) -> bool {
        if self.started && filters == self.filters {
            return false;
        }
        self.filters = filters;
        self.started = true;
        self.state.reset();
        self.fetch_next_page().await
    }

    /// Fetches the next page. A no-op returning `false` while a fetch is in
    /// flight or after the final page has arrived.
    pub async fn fetch_next_page(&mut self) -> bool {
        let Some(ticket) = self.state.begin() else {
            return false;
        };
        let result = self
            .client
            .fetch_page(&self.filters, ticket.offset(), self.state.page_size())
            .await;
        self.state.complete(ticket, result);
        true
    }

    /// Re-attempts the fetch that last failed, at the same offset.
    pub async fn retry(&mut self) -> bool {
        self.fetch_next_page().await
    }

    #[must_use]
    pub fn items(&self) -> &[Article] {
        self.state.items()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    #[must_use]
    pub fn is_fetching_more(&self) -> bool {
        self.state.is_fetching_more()
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.state.has_more()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&NewsError> {
        self.state.last_error()
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }
}
