//! Integration tests for the hashtag source using wiremock

mod common;

use common::test_client;
use serde_json::json;
use trendcast::crawler::{HashtagFetcher, TrendSource};
use trendcast::models::SourceKind;
use trendcast::utils::error::FetchError;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TAG_INFO: &str = "/api/v1/tags/web_info/";

fn tag_info(codes: &[String]) -> serde_json::Value {
    let medias: Vec<_> = codes.iter().map(|c| json!({ "media": { "code": c } })).collect();
    json!({
        "data": {
            "top": {
                "sections": [ { "layout_content": { "medias": medias } } ]
            }
        },
        "status": "ok"
    })
}

fn codes(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

fn hashtags() -> Vec<String> {
    vec![
        "#trendingproducts".to_string(),
        "#viralproducts".to_string(),
        "#dropshipping".to_string(),
    ]
}

async fn mount_tag(server: &MockServer, tag: &str, body: serde_json::Value, expected: u64) {
    Mock::given(method("GET"))
        .and(path(TAG_INFO))
        .and(query_param("tag_name", tag))
        .and(header("x-ig-app-id", "936619743392459"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected)
        .mount(server)
        .await;
}

/// 5 + 5 posts fill the cap; the third hashtag is never requested
#[tokio::test]
async fn test_global_cap_stops_before_third_hashtag() {
    let mock_server = MockServer::start().await;
    mount_tag(&mock_server, "trendingproducts", tag_info(&codes("A", 5)), 1).await;
    mount_tag(&mock_server, "viralproducts", tag_info(&codes("B", 5)), 1).await;
    mount_tag(&mock_server, "dropshipping", tag_info(&codes("C", 5)), 0).await;

    let fetcher = HashtagFetcher::new(test_client(), &mock_server.uri(), hashtags());
    let trends = fetcher.fetch().await.unwrap();

    assert_eq!(trends.source(), SourceKind::Instagram);
    assert_eq!(trends.len(), 10);
    assert_eq!(trends.texts()[0], "https://www.instagram.com/p/A0/");
    assert_eq!(trends.texts()[4], "https://www.instagram.com/p/A4/");
    assert_eq!(trends.texts()[5], "https://www.instagram.com/p/B0/");
    assert_eq!(trends.texts()[9], "https://www.instagram.com/p/B4/");
}

/// A single large hashtag is cut mid-list
#[tokio::test]
async fn test_cap_within_first_hashtag() {
    let mock_server = MockServer::start().await;
    mount_tag(&mock_server, "trendingproducts", tag_info(&codes("A", 25)), 1).await;
    mount_tag(&mock_server, "viralproducts", tag_info(&codes("B", 5)), 0).await;
    mount_tag(&mock_server, "dropshipping", tag_info(&codes("C", 5)), 0).await;

    let fetcher = HashtagFetcher::new(test_client(), &mock_server.uri(), hashtags());
    let trends = fetcher.fetch().await.unwrap();

    assert_eq!(trends.len(), 10);
    assert!(trends.texts().iter().all(|url| url.contains("/p/A")));
}

/// Short hashtags are all walked and concatenated in order
#[tokio::test]
async fn test_fewer_posts_than_cap() {
    let mock_server = MockServer::start().await;
    mount_tag(&mock_server, "trendingproducts", tag_info(&codes("A", 2)), 1).await;
    mount_tag(&mock_server, "viralproducts", tag_info(&[]), 1).await;
    mount_tag(&mock_server, "dropshipping", tag_info(&codes("C", 3)), 1).await;

    let fetcher = HashtagFetcher::new(test_client(), &mock_server.uri(), hashtags());
    let trends = fetcher.fetch().await.unwrap();

    assert_eq!(
        trends.texts(),
        vec![
            "https://www.instagram.com/p/A0/",
            "https://www.instagram.com/p/A1/",
            "https://www.instagram.com/p/C0/",
            "https://www.instagram.com/p/C1/",
            "https://www.instagram.com/p/C2/",
        ]
    );
}

/// Unauthenticated requests fail the whole source
#[tokio::test]
async fn test_unauthorized_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TAG_INFO))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HashtagFetcher::new(test_client(), &mock_server.uri(), hashtags());
    let result = fetcher.fetch().await;

    assert!(matches!(result, Err(FetchError::ServerError(401))));
}

/// A login page instead of JSON is a parse failure
#[tokio::test]
async fn test_login_page_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TAG_INFO))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Log in</html>"))
        .mount(&mock_server)
        .await;

    let fetcher = HashtagFetcher::new(test_client(), &mock_server.uri(), hashtags());
    let result = fetcher.top_post_urls("#trendingproducts").await;

    assert!(matches!(result, Err(FetchError::Parse(_))));
}
