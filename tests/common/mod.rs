//! Common test utilities

use trendcast::config::HttpConfig;
use trendcast::crawler::HttpClient;

/// Client with the stock configuration
pub fn test_client() -> HttpClient {
    HttpClient::new(&HttpConfig::default()).unwrap()
}

/// HTML page with `count` elements `<tag class="class">{prefix} {i}</tag>`
#[allow(dead_code)]
pub fn listing_page(tag: &str, class: &str, prefix: &str, count: usize) -> String {
    let body: String = (0..count)
        .map(|i| format!(r#"<div class="card"><{tag} class="{class}">{prefix} {i}</{tag}></div>"#))
        .collect();
    format!("<!DOCTYPE html><html><head><title>listing</title></head><body>{body}</body></html>")
}

/// Body of the search-trend service with its anti-XSSI guard
#[allow(dead_code)]
pub fn guarded(json: &serde_json::Value) -> String {
    format!(")]}}'\n{json}")
}
