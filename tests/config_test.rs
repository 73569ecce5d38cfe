//! Tests for config loading from files and the environment

use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;
use trendcast::config::Config;

const ENV_KEYS: &[&str] = &[
    "TRENDCAST_REQUEST_TIMEOUT",
    "TRENDCAST_USER_AGENT",
    "TRENDCAST_KEYWORDS",
    "TRENDCAST_TIMEFRAME",
    "TRENDCAST_HASHTAGS",
    "TRENDCAST_SEED",
    "TRENDCAST_HORIZON_DAYS",
    "TRENDCAST_LOG_LEVEL",
    "TRENDCAST_LOG_FORMAT",
];

fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config(
        r#"
[http]
request_timeout_secs = 20

[sources.google_trends]
keywords = ["air fryer", "led lights"]

[sources.tiktok]
url = "https://example.com/discover"
selector = "div.tag > h3"

[forecast]
seed = 7
horizon_days = 14
"#,
    );

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.http.request_timeout_secs, Some(20));
    assert_eq!(config.sources.google_trends.keywords, vec!["air fryer", "led lights"]);
    assert_eq!(config.sources.google_trends.timeframe, "now 7-d");
    assert_eq!(config.sources.tiktok.selector, "div.tag > h3");
    assert_eq!(config.sources.amazon, Config::default().sources.amazon);
    assert_eq!(config.forecast.seed, 7);
    assert_eq!(config.forecast.horizon_days, 14);
    assert_eq!(config.forecast.periods, 90);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_file_is_default() {
    let file = write_config("");
    assert_eq!(Config::from_file(file.path()).unwrap(), Config::default());
}

#[test]
fn test_malformed_file_is_error() {
    let file = write_config("[forecast\nseed = ");
    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_error() {
    let result = Config::from_file(std::path::Path::new("/nonexistent/trendcast.toml"));
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_env_overrides() {
    clear_env();
    std::env::set_var("TRENDCAST_KEYWORDS", "gadgets, home decor");
    std::env::set_var("TRENDCAST_HASHTAGS", "#a,#b");
    std::env::set_var("TRENDCAST_SEED", "1234");
    std::env::set_var("TRENDCAST_REQUEST_TIMEOUT", "15");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.sources.google_trends.keywords, vec!["gadgets", "home decor"]);
    assert_eq!(config.sources.instagram.hashtags, vec!["#a", "#b"]);
    assert_eq!(config.forecast.seed, 1234);
    assert_eq!(config.http.request_timeout(), Some(std::time::Duration::from_secs(15)));
}

#[test]
#[serial]
fn test_empty_env_is_default() {
    clear_env();
    assert_eq!(Config::from_env().unwrap(), Config::default());
}

#[test]
#[serial]
fn test_invalid_env_number_is_error() {
    clear_env();
    std::env::set_var("TRENDCAST_SEED", "forty-two");

    let result = Config::from_env();
    clear_env();

    assert!(result.is_err());
}
