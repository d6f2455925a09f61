use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults() {
    let cfg = ApiConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, ApiConfig::default());
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.ws_url, DEFAULT_WS_URL);
    assert_eq!(cfg.snapshot_decode, SnapshotDecode::Lines);
    assert_eq!(
        cfg.timeouts,
        HttpTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ApiConfig::from_lookup(lookup_from(&[
        ("NOTPX_API_URL", "http://127.0.0.1:9000/"),
        ("NOTPX_PAGE_URL", "http://127.0.0.1:9001"),
        ("NOTPX_WS_URL", "ws://127.0.0.1:9002/ws"),
        ("NOTPX_PAGE_HOST", "https://app.example.test/"),
        ("NOTPX_PAGE_DOMAIN", "example.test"),
        ("NOTPX_REQUEST_TIMEOUT_SECS", "42"),
        ("NOTPX_CONNECT_TIMEOUT_SECS", " 7 "),
        ("NOTPX_SNAPSHOT_DECODE", "structured"),
    ]))
    .unwrap();

    assert_eq!(cfg.api_url, "http://127.0.0.1:9000");
    assert_eq!(cfg.page_url, "http://127.0.0.1:9001");
    assert_eq!(cfg.ws_url, "ws://127.0.0.1:9002/ws");
    assert_eq!(cfg.page_host, "https://app.example.test");
    assert_eq!(cfg.page_domain, "example.test");
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: 42, connect_secs: 7 });
    assert_eq!(cfg.snapshot_decode, SnapshotDecode::Structured);
}

#[test]
fn unparsable_timeouts_fall_back_to_defaults() {
    let cfg = ApiConfig::from_lookup(lookup_from(&[("NOTPX_REQUEST_TIMEOUT_SECS", "soon")])).unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
}

#[test]
fn unknown_snapshot_decode_errors() {
    let err = ApiConfig::from_lookup(lookup_from(&[("NOTPX_SNAPSHOT_DECODE", "json")]))
        .unwrap_err()
        .to_string();
    assert!(err.contains("unsupported snapshot decode"));
}
