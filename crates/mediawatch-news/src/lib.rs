//! Typed async client for the media-monitoring news API.
//!
//! Covers the search surface of the dashboard backend: a multi-dimensional
//! [`FilterState`], a deterministic query encoder, the [`NewsClient`] HTTP
//! wrapper around `/news` and its distinct/aggregate endpoints, and the
//! [`ArticleFeed`] infinite collection that accumulates pages in request
//! order with a single fetch in flight at a time.

pub mod client;
pub mod error;
pub mod feed;
pub mod filters;
pub mod query;
pub mod trigger;
pub mod types;

pub use client::NewsClient;
pub use error::NewsError;
pub use feed::{ArticleFeed, FeedState, DEFAULT_PAGE_SIZE};
pub use filters::{DateRange, FilterState, Sentiment};
pub use trigger::{LoadSignal, LoadTrigger};
pub use types::{Article, CountResponse, SentimentByCountry, SentimentByDay, SentimentCount};
