//! Integration tests for `ArticleFeed` and `LoadTrigger` against a mock
//! server: filter resets, short-page termination, error handling, and the
//! signal-driven paging loop.

use mediawatch_news::{ArticleFeed, FilterState, LoadTrigger, NewsClient, Sentiment};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn article_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "url": format!("https://news.example.com/{id}"),
        "title": format!("Article {id}"),
        "sentiment": "negative"
    })
}

fn page_body(ids: &[&str]) -> serde_json::Value {
    serde_json::Value::Array(ids.iter().map(|id| article_json(id)).collect())
}

async fn mount_page(server: &MockServer, offset: u64, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/news"))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(ids)))
        .mount(server)
        .await;
}

fn feed(server: &MockServer, page_size: u64) -> ArticleFeed {
    let client = NewsClient::new(&server.uri(), 30).expect("client construction should not fail");
    ArticleFeed::with_page_size(client, page_size)
}

#[tokio::test]
async fn pages_accumulate_until_short_page() {
    let server = MockServer::start().await;
    mount_page(&server, 0, &["A", "B"]).await;
    mount_page(&server, 2, &["C"]).await;

    let mut feed = feed(&server, 2);
    let mut filters = FilterState::new();
    filters.sentiments = vec![Sentiment::Negative];

    assert!(feed.apply_filters(filters).await, "page 0 should be fetched");
    assert!(feed.has_more(), "full first page leaves more to fetch");
    assert_eq!(feed.items().len(), 2);

    assert!(feed.fetch_next_page().await);
    let ids: Vec<&str> = feed.items().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    assert!(!feed.has_more(), "short page ends the session");

    assert!(
        !feed.fetch_next_page().await,
        "terminal feed must not issue further requests"
    );
}

#[tokio::test]
async fn server_error_on_first_page_is_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut feed = feed(&server, 30);
    feed.apply_filters(FilterState::new()).await;

    assert!(feed.items().is_empty());
    assert!(feed.last_error().is_some());
    assert!(!feed.is_loading());
    assert!(feed.has_more(), "error does not end the session");
}

#[tokio::test]
async fn retry_after_error_reaches_the_same_offset() {
    let server = MockServer::start().await;

    // First attempt fails, the retry succeeds at the same offset.
    Mock::given(method("GET"))
        .and(path("/news"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, 0, &["A"]).await;

    let mut feed = feed(&server, 2);
    feed.apply_filters(FilterState::new()).await;
    assert!(feed.last_error().is_some());

    assert!(feed.retry().await, "retry should issue a request");
    assert!(feed.last_error().is_none(), "success clears the error");
    assert_eq!(feed.items().len(), 1);
    assert!(!feed.has_more());
}

#[tokio::test]
async fn filter_change_resets_and_fetches_page_zero_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news"))
        .and(query_param("offset", "0"))
        .and(query_param("country", "India"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["in-1"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .and(query_param("offset", "0"))
        .and(query_param("country", "France"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["fr-1"])))
        .expect(1)
        .mount(&server)
        .await;

    let mut feed = feed(&server, 30);

    let mut filters = FilterState::new();
    filters.outlet_countries = vec!["India".to_owned()];
    feed.apply_filters(filters.clone()).await;
    assert_eq!(feed.items().len(), 1);
    assert_eq!(feed.items()[0].id, "in-1");

    // Same filters again: no reset, no request.
    assert!(!feed.apply_filters(filters.clone()).await);

    filters.outlet_countries = vec!["France".to_owned()];
    feed.apply_filters(filters).await;
    let ids: Vec<&str> = feed.items().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["fr-1"], "old items must be discarded on filter change");
}

#[tokio::test]
async fn trigger_follows_sentinel_until_terminal() {
    let server = MockServer::start().await;
    mount_page(&server, 0, &["A", "B"]).await;
    mount_page(&server, 2, &["C", "D"]).await;
    mount_page(&server, 4, &[]).await;

    let mut feed = feed(&server, 2);
    feed.apply_filters(FilterState::new()).await;

    let mut trigger = LoadTrigger::new();
    assert!(trigger.on_sentinel_visible(&mut feed).await);
    assert!(trigger.on_sentinel_visible(&mut feed).await);
    assert!(
        !trigger.on_sentinel_visible(&mut feed).await,
        "terminal feed ignores further sentinel signals"
    );

    assert_eq!(feed.items().len(), 4);
    assert_eq!(trigger.signals_seen(), 3);
    assert_eq!(trigger.fetches_started(), 2);
}

#[tokio::test]
async fn sentinel_does_not_auto_retry_after_error_but_load_more_does() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, 0, &["A"]).await;

    let mut feed = feed(&server, 2);
    feed.apply_filters(FilterState::new()).await;
    assert!(feed.last_error().is_some());

    let mut trigger = LoadTrigger::new();
    assert!(
        !trigger.on_sentinel_visible(&mut feed).await,
        "scroll signals must not retry a failed fetch"
    );
    assert!(feed.last_error().is_some());

    assert!(trigger.on_load_more(&mut feed).await, "manual retry is allowed");
    assert!(feed.last_error().is_none());
    assert_eq!(feed.items().len(), 1);
}
