//! HTTP client for the media-monitoring news API.
//!
//! Wraps `reqwest` with the tunnel-bypass and bearer-token headers every
//! request needs, typed response deserialization, and per-element article
//! decoding that fails closed on malformed entries.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::NewsError;
use crate::filters::FilterState;
use crate::query::{encode, encode_filters};
use crate::types::{Article, CountResponse, SentimentByCountry, SentimentByDay, SentimentCount};

/// Header that tells the tunneling proxy in front of the API to skip its
/// browser interstitial.
const BYPASS_HEADER: &str = "ngrok-skip-browser-warning";
const BYPASS_VALUE: &str = "69420";

/// Client for the news API.
///
/// Manages the HTTP client, base URL, and optional bearer token. Use
/// [`NewsClient::new`] for production or point `base_url` at a mock server
/// in tests.
pub struct NewsClient {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl NewsClient {
    /// Creates a new client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`NewsError::InvalidUrl`] if `base_url`
    /// is not a valid URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("mediawatch/0.1 (media-monitoring)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends endpoint paths rather than replacing the last path
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| NewsError::InvalidUrl(format!("base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            auth_token: None,
        })
    }

    /// Attaches a bearer token sent as `Authorization` on every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Fetches one page of articles matching `filters`.
    ///
    /// Issues exactly one `GET /news`. The body is parsed as a JSON array
    /// and each element is decoded individually; a malformed element fails
    /// the whole page rather than being silently dropped, because a silently
    /// shortened page would terminate pagination early.
    ///
    /// # Errors
    ///
    /// - [`NewsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`NewsError::Deserialize`] if the body is not a JSON array or an
    ///   element does not decode as an article.
    pub async fn fetch_page(
        &self,
        filters: &FilterState,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Article>, NewsError> {
        let params = encode(filters, offset, limit);
        let url = self.build_url("news", &params)?;
        tracing::debug!(offset, limit, "fetching article page");
        let body = self.request_json(&url).await?;

        let entries: Vec<serde_json::Value> =
            serde_json::from_value(body).map_err(|e| NewsError::Deserialize {
                context: format!("GET /news (offset={offset})"),
                source: e,
            })?;

        let mut articles = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let article: Article =
                serde_json::from_value(entry).map_err(|e| NewsError::Deserialize {
                    context: format!("GET /news article at offset={offset} index={index}"),
                    source: e,
                })?;
            articles.push(article);
        }
        Ok(articles)
    }

    /// Total number of articles matching `filters` (`GET /news/count`).
    ///
    /// # Errors
    ///
    /// - [`NewsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`NewsError::Deserialize`] if the response shape is unexpected.
    pub async fn count(&self, filters: &FilterState) -> Result<CountResponse, NewsError> {
        let params = encode_filters(filters);
        let url = self.build_url("news/count", &params)?;
        let body = self.request_json(&url).await?;
        serde_json::from_value(body).map_err(|e| NewsError::Deserialize {
            context: "GET /news/count".to_owned(),
            source: e,
        })
    }

    /// Distinct values of `field` across the corpus, e.g.
    /// `distinct_values("country")` → `["India", "France", ...]`.
    ///
    /// The API returns nulls for records missing the field; those are
    /// skipped.
    ///
    /// # Errors
    ///
    /// - [`NewsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`NewsError::Deserialize`] if the response shape is unexpected.
    pub async fn distinct_values(&self, field: &str) -> Result<Vec<String>, NewsError> {
        let params = vec![("field".to_owned(), field.to_owned())];
        self.fetch_distinct(&params, field).await
    }

    /// Distinct outlet names, optionally scoped to already-selected
    /// countries. Used to populate the outlet filter after countries are
    /// picked.
    ///
    /// # Errors
    ///
    /// - [`NewsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`NewsError::Deserialize`] if the response shape is unexpected.
    pub async fn distinct_outlets(&self, countries: &[String]) -> Result<Vec<String>, NewsError> {
        let mut params = vec![("field".to_owned(), "meta_site_name".to_owned())];
        for country in countries {
            params.push(("country".to_owned(), country.clone()));
        }
        self.fetch_distinct(&params, "meta_site_name").await
    }

    /// Overall sentiment distribution (`GET /news/aggregate/sentiment`).
    ///
    /// # Errors
    ///
    /// - [`NewsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`NewsError::Deserialize`] if the response shape is unexpected.
    pub async fn sentiment_totals(&self) -> Result<Vec<SentimentCount>, NewsError> {
        let url = self.build_url("news/aggregate/sentiment", &[])?;
        let body = self.request_json(&url).await?;
        serde_json::from_value(body).map_err(|e| NewsError::Deserialize {
            context: "GET /news/aggregate/sentiment".to_owned(),
            source: e,
        })
    }

    /// Daily sentiment series from `from` (inclusive), to `to` or now
    /// (`GET /news/aggregate/sentiment/date`).
    ///
    /// # Errors
    ///
    /// - [`NewsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`NewsError::Deserialize`] if the response shape is unexpected.
    pub async fn sentiment_by_date(
        &self,
        from: chrono::NaiveDate,
        to: Option<chrono::NaiveDate>,
    ) -> Result<Vec<SentimentByDay>, NewsError> {
        let mut params = vec![("from".to_owned(), from.to_string())];
        if let Some(to) = to {
            params.push(("to".to_owned(), to.to_string()));
        }
        let url = self.build_url("news/aggregate/sentiment/date", &params)?;
        let body = self.request_json(&url).await?;
        serde_json::from_value(body).map_err(|e| NewsError::Deserialize {
            context: format!("GET /news/aggregate/sentiment/date (from={from})"),
            source: e,
        })
    }

    /// Per-country sentiment breakdown
    /// (`GET /news/aggregate/sentiment/country`).
    ///
    /// # Errors
    ///
    /// - [`NewsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`NewsError::Deserialize`] if the response shape is unexpected.
    pub async fn sentiment_by_country(&self) -> Result<Vec<SentimentByCountry>, NewsError> {
        let url = self.build_url("news/aggregate/sentiment/country", &[])?;
        let body = self.request_json(&url).await?;
        serde_json::from_value(body).map_err(|e| NewsError::Deserialize {
            context: "GET /news/aggregate/sentiment/country".to_owned(),
            source: e,
        })
    }

    async fn fetch_distinct(
        &self,
        params: &[(String, String)],
        field: &str,
    ) -> Result<Vec<String>, NewsError> {
        let url = self.build_url("news/distinct", params)?;
        let body = self.request_json(&url).await?;
        let values: Vec<Option<String>> =
            serde_json::from_value(body).map_err(|e| NewsError::Deserialize {
                context: format!("GET /news/distinct (field={field})"),
                source: e,
            })?;
        Ok(values.into_iter().flatten().collect())
    }

    /// Builds the full endpoint URL with properly percent-encoded query
    /// parameters appended via [`Url::query_pairs_mut`].
    fn build_url(&self, path: &str, params: &[(String, String)]) -> Result<Url, NewsError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| NewsError::InvalidUrl(format!("endpoint '{path}': {e}")))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET with the bypass and authorization headers, asserts a 2xx
    /// HTTP status, and parses the response body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, NewsError> {
        let mut request = self.client.get(url.clone()).header(BYPASS_HEADER, BYPASS_VALUE);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| NewsError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}
