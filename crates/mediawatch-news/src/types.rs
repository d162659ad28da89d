//! Wire types for the news API.
//!
//! Articles are created by the remote crawler and read-only here. Decoding is
//! strict on the identity fields (`id`, `url`, `title`) and on `sentiment`;
//! everything else defaults so older crawl records with missing metadata
//! still decode.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::filters::Sentiment;

/// One crawled article as returned by `GET /news`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub url: String,
    pub title: String,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub publish_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub top_image: Option<String>,
    #[serde(default)]
    pub meta_img: Option<String>,
    /// Outlet name as reported by the page metadata.
    #[serde(default)]
    pub meta_site_name: Option<String>,
    #[serde(default)]
    pub canonical_link: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub extracted_keywords: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Article {
    /// Best available image URL: `top_image` first, then `meta_img`.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.top_image
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.meta_img.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Response of `GET /news/count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

/// One bucket of the overall sentiment distribution
/// (`GET /news/aggregate/sentiment`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCount {
    pub name: String,
    pub count: u64,
}

/// Daily sentiment series entry (`GET /news/aggregate/sentiment/date`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentByDay {
    pub date: NaiveDate,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
    pub very_negative: u64,
    pub very_positive: u64,
    pub all: u64,
}

/// Per-country sentiment breakdown (`GET /news/aggregate/sentiment/country`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentByCountry {
    pub country: String,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
    pub very_negative: u64,
    pub very_positive: u64,
    pub all: u64,
}
