//! Filter dimensions for article search.
//!
//! [`FilterState`] is the full set of user-selected dimensions at a point in
//! time. Set-valued dimensions keep entries unique in insertion order
//! (checkbox semantics: toggling an already-present value removes it).
//! Equality on the whole struct is what the feed uses to detect a filter
//! change and reset pagination.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed five-way sentiment classification used uniformly by the query
/// encoder, the article decoder, and the aggregate consumers.
///
/// Unknown wire values fail deserialization rather than defaulting to
/// [`Sentiment::Neutral`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl Sentiment {
    /// Wire name of the sentiment category, as the API emits and accepts it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::VeryNegative => "very_negative",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Positive => "positive",
            Sentiment::VeryPositive => "very_positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "very_negative" => Ok(Sentiment::VeryNegative),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            "positive" => Ok(Sentiment::Positive),
            "very_positive" => Ok(Sentiment::VeryPositive),
            other => Err(format!("unknown sentiment category: {other}")),
        }
    }
}

/// Inclusive publish-date window. An open end means "up to now".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: Option<DateTime<Utc>>,
}

/// All active filter dimensions for one search session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Free-text search across title and summary.
    pub search_text: String,
    /// Headline-only search; superseded by `search_text` when both are set.
    pub search_headlines: String,
    pub tags: Vec<String>,
    pub exclude_tags: Vec<String>,
    pub sentiments: Vec<Sentiment>,
    pub media_types: Vec<String>,
    pub outlets: Vec<String>,
    pub outlet_countries: Vec<String>,
    pub outlet_regions: Vec<String>,
    /// Numeric-like tier labels ("1", "2", "3").
    pub outlet_tiers: Vec<String>,
    pub languages: Vec<String>,
    pub date_range: Option<DateRange>,
    pub critical_only: bool,
    pub verified_only: bool,
    pub premium_only: bool,
    /// Threshold strings kept as entered; emitted only when non-empty.
    pub min_followers: String,
    pub min_impressions: String,
    pub min_engagements: String,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `sentiment` if absent, removes it if present.
    pub fn toggle_sentiment(&mut self, sentiment: Sentiment) {
        if let Some(pos) = self.sentiments.iter().position(|s| *s == sentiment) {
            self.sentiments.remove(pos);
        } else {
            self.sentiments.push(sentiment);
        }
    }
}

/// Adds `value` to `entries` if absent, removes it if present.
///
/// Entries stay unique and in first-insertion order, matching the dashboard
/// checkbox behaviour for every string-valued dimension.
pub fn toggle_value(entries: &mut Vec<String>, value: &str) {
    if let Some(pos) = entries.iter().position(|e| e == value) {
        entries.remove(pos);
    } else {
        entries.push(value.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_value_adds_then_removes() {
        let mut entries = Vec::new();
        toggle_value(&mut entries, "India");
        toggle_value(&mut entries, "France");
        assert_eq!(entries, vec!["India", "France"]);

        toggle_value(&mut entries, "India");
        assert_eq!(entries, vec!["France"]);
    }

    #[test]
    fn toggle_value_keeps_entries_unique() {
        let mut entries = vec!["CNN".to_owned()];
        toggle_value(&mut entries, "CNN");
        toggle_value(&mut entries, "CNN");
        assert_eq!(entries, vec!["CNN"]);
    }

    #[test]
    fn toggle_sentiment_roundtrip() {
        let mut filters = FilterState::new();
        filters.toggle_sentiment(Sentiment::Negative);
        filters.toggle_sentiment(Sentiment::VeryPositive);
        assert_eq!(
            filters.sentiments,
            vec![Sentiment::Negative, Sentiment::VeryPositive]
        );
        filters.toggle_sentiment(Sentiment::Negative);
        assert_eq!(filters.sentiments, vec![Sentiment::VeryPositive]);
    }

    #[test]
    fn sentiment_parses_wire_names() {
        assert_eq!(
            "very_negative".parse::<Sentiment>().unwrap(),
            Sentiment::VeryNegative
        );
        assert!("angry".parse::<Sentiment>().is_err());
    }

    #[test]
    fn default_filter_states_are_equal() {
        assert_eq!(FilterState::new(), FilterState::default());
    }
}
