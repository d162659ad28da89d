//! Filter-to-query-parameter encoding for `GET /news`.
//!
//! Pure and deterministic: equal [`FilterState`] values produce an identical
//! pair list, byte for byte, so the encoded output can key caches. Values are
//! emitted unescaped; percent-encoding happens when the pairs are appended to
//! a URL via `query_pairs_mut` in the client.
//!
//! Search precedence: `search_text` carries the `search` parameter scoped to
//! title and summary. `search_headlines` is used only when `search_text` is
//! empty and scopes to title alone. Excluded tags never touch `search`; they
//! go out as repeated `exclude` parameters alongside `not_in_fields[]=tags`.

use chrono::SecondsFormat;

use crate::filters::FilterState;

/// Encodes the full page request: `limit` and `offset` first, then every
/// active filter dimension in a fixed order.
#[must_use]
pub fn encode(filters: &FilterState, offset: u64, limit: u64) -> Vec<(String, String)> {
    let mut params = vec![
        ("limit".to_owned(), limit.to_string()),
        ("offset".to_owned(), offset.to_string()),
    ];
    params.extend(encode_filters(filters));
    params
}

/// Encodes the filter dimensions alone, without pagination parameters.
/// Used for endpoints that take filters but no page window (`/news/count`).
#[must_use]
pub fn encode_filters(filters: &FilterState) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = Vec::new();

    let repeated = [
        ("country", &filters.outlet_countries),
        ("language", &filters.languages),
        ("meta_site_name", &filters.outlets),
        ("region", &filters.outlet_regions),
        ("tier", &filters.outlet_tiers),
        ("media_type", &filters.media_types),
        ("tag", &filters.tags),
    ];
    for (name, values) in repeated {
        for value in values {
            params.push((name.to_owned(), value.clone()));
        }
    }

    for sentiment in &filters.sentiments {
        params.push(("sentiment".to_owned(), sentiment.as_str().to_owned()));
    }

    if !filters.search_text.is_empty() {
        params.push(("search".to_owned(), filters.search_text.clone()));
        params.push(("search_fields[]".to_owned(), "title".to_owned()));
        params.push(("search_fields[]".to_owned(), "summary".to_owned()));
    } else if !filters.search_headlines.is_empty() {
        params.push(("search".to_owned(), filters.search_headlines.clone()));
        params.push(("search_fields[]".to_owned(), "title".to_owned()));
    }

    if !filters.exclude_tags.is_empty() {
        params.push(("not_in_fields[]".to_owned(), "tags".to_owned()));
        for tag in &filters.exclude_tags {
            params.push(("exclude".to_owned(), tag.clone()));
        }
    }

    if let Some(range) = &filters.date_range {
        params.push((
            "from".to_owned(),
            range.from.to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
        if let Some(to) = range.to {
            params.push(("to".to_owned(), to.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
    }

    if filters.critical_only {
        params.push(("critical".to_owned(), "true".to_owned()));
    }
    if filters.verified_only {
        params.push(("verified".to_owned(), "true".to_owned()));
    }
    if filters.premium_only {
        params.push(("premium".to_owned(), "true".to_owned()));
    }

    let thresholds = [
        ("min_followers", &filters.min_followers),
        ("min_impressions", &filters.min_impressions),
        ("min_engagements", &filters.min_engagements),
    ];
    for (name, value) in thresholds {
        if !value.is_empty() {
            params.push((name.to_owned(), value.clone()));
        }
    }

    params
}
