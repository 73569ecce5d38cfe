//! Integration tests for the search-trend source using wiremock
//!
//! The mock server plays the three-step protocol: cookie bootstrap, explore
//! widgets, then one related-searches call per related-queries widget.

mod common;

use common::{guarded, test_client};
use serde_json::json;
use trendcast::crawler::{SearchTrendsFetcher, TrendSource};
use trendcast::models::{SourceKind, TrendQuery, NO_DATA_PLACEHOLDER};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn query() -> TrendQuery {
    TrendQuery::new(["best products", "trending items"], "now 7-d").unwrap()
}

fn widget(keyword: &str, token: &str) -> serde_json::Value {
    json!({
        "id": "RELATED_QUERIES",
        "token": token,
        "request": {
            "restriction": {
                "complexKeywordsRestriction": {
                    "keyword": [ { "type": "BROAD", "value": keyword } ]
                }
            }
        }
    })
}

fn ranked(top: &[&str], rising: &[&str]) -> serde_json::Value {
    let entries = |qs: &[&str]| -> Vec<serde_json::Value> {
        qs.iter().map(|q| json!({ "query": q, "value": 100 })).collect()
    };
    json!({
        "default": {
            "rankedList": [
                { "rankedKeyword": entries(top) },
                { "rankedKeyword": entries(rising) }
            ]
        }
    })
}

async fn mount_bootstrap(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("geo", "US"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "NID=abc; Path=/")
                .set_body_string("<html></html>"),
        )
        .mount(server)
        .await;
}

async fn mount_explore(server: &MockServer, widgets: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/trends/api/explore"))
        .and(query_param("hl", "en-US"))
        .and(query_param("tz", "360"))
        .respond_with(ResponseTemplate::new(200).set_body_string(guarded(&json!({
            "widgets": widgets
        }))))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_related(server: &MockServer, token: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/trends/api/widgetdata/relatedsearches"))
        .and(query_param("token", token))
        .respond_with(ResponseTemplate::new(200).set_body_string(guarded(&body)))
        .expect(1)
        .mount(server)
        .await;
}

/// Top related queries of the first keyword, capped at ten
#[tokio::test]
async fn test_top_queries_of_primary_keyword() {
    let mock_server = MockServer::start().await;
    mount_bootstrap(&mock_server).await;
    mount_explore(
        &mock_server,
        json!([
            { "id": "TIMESERIES", "token": "ts" },
            widget("best products", "tok-best"),
            widget("trending items", "tok-trend")
        ]),
    )
    .await;

    let top: Vec<String> = (0..12).map(|i| format!("query {i}")).collect();
    let top_refs: Vec<&str> = top.iter().map(String::as_str).collect();
    mount_related(&mock_server, "tok-best", ranked(&top_refs, &["rising one"])).await;
    mount_related(&mock_server, "tok-trend", ranked(&["other"], &[])).await;

    let fetcher = SearchTrendsFetcher::new(test_client(), &mock_server.uri(), query());
    let trends = fetcher.fetch().await.unwrap();

    assert_eq!(trends.source(), SourceKind::GoogleTrends);
    assert_eq!(trends.len(), 10);
    assert_eq!(trends.texts()[0], "query 0");
    assert_eq!(trends.texts()[9], "query 9");
}

/// Both keywords' tables are exposed by the lower-level call
#[tokio::test]
async fn test_related_queries_per_keyword() {
    let mock_server = MockServer::start().await;
    mount_bootstrap(&mock_server).await;
    mount_explore(
        &mock_server,
        json!([widget("best products", "t1"), widget("trending items", "t2")]),
    )
    .await;
    mount_related(&mock_server, "t1", ranked(&["air fryer"], &[])).await;
    mount_related(&mock_server, "t2", ranked(&[], &["led mask"])).await;

    let fetcher = SearchTrendsFetcher::new(test_client(), &mock_server.uri(), query());
    let related = fetcher.related_queries().await.unwrap();

    assert_eq!(related.len(), 2);
    assert_eq!(related["best products"].top, Some(vec!["air fryer".to_string()]));
    assert_eq!(related["best products"].rising, None);
    assert_eq!(related["trending items"].top, None);
    assert_eq!(related["trending items"].rising, Some(vec!["led mask".to_string()]));
}

/// Missing entry for the primary keyword degrades to the placeholder
#[tokio::test]
async fn test_missing_primary_keyword_is_placeholder() {
    let mock_server = MockServer::start().await;
    mount_bootstrap(&mock_server).await;
    mount_explore(&mock_server, json!([widget("trending items", "t2")])).await;
    mount_related(&mock_server, "t2", ranked(&["something"], &[])).await;

    let fetcher = SearchTrendsFetcher::new(test_client(), &mock_server.uri(), query());
    let trends = fetcher.fetch().await.unwrap();

    assert!(trends.is_placeholder());
    assert_eq!(trends.texts(), vec![NO_DATA_PLACEHOLDER]);
}

/// Empty top table degrades to the placeholder
#[tokio::test]
async fn test_empty_top_table_is_placeholder() {
    let mock_server = MockServer::start().await;
    mount_bootstrap(&mock_server).await;
    mount_explore(&mock_server, json!([widget("best products", "t1")])).await;
    mount_related(&mock_server, "t1", ranked(&[], &["rising"])).await;

    let fetcher = SearchTrendsFetcher::new(test_client(), &mock_server.uri(), query());
    let trends = fetcher.fetch().await.unwrap();

    assert!(trends.is_placeholder());
}

/// Throttling by the service degrades to the placeholder instead of failing
#[tokio::test]
async fn test_rate_limited_is_placeholder() {
    let mock_server = MockServer::start().await;
    mount_bootstrap(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/trends/api/explore"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let fetcher = SearchTrendsFetcher::new(test_client(), &mock_server.uri(), query());
    assert!(fetcher.related_queries().await.is_err());

    let trends = fetcher.fetch().await.unwrap();
    assert!(trends.is_placeholder());
}

/// A body that is not the expected JSON degrades to the placeholder
#[tokio::test]
async fn test_garbage_explore_is_placeholder() {
    let mock_server = MockServer::start().await;
    mount_bootstrap(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/trends/api/explore"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>unusual traffic</html>"))
        .mount(&mock_server)
        .await;

    let fetcher = SearchTrendsFetcher::new(test_client(), &mock_server.uri(), query());
    let trends = fetcher.fetch().await.unwrap();

    assert!(trends.is_placeholder());
}
