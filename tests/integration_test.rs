//! Integration tests for acrs
//!
//! These tests run the complete path from route tokens to rendered output.

use acrs::output::{cgi_page, route_lines, summary_json};
use acrs::{parse_route_list, summarize, Error, Route};
use pretty_assertions::assert_eq;

fn summarize_tokens(tokens: &str) -> (Vec<String>, bool) {
    let routes = parse_route_list(&[tokens]).expect("tokens should parse");
    let summary = summarize(&routes).expect("routes are valid");
    (route_lines(&summary.routes, true), summary.changed)
}

#[test]
fn test_merge_correctness() {
    let (lines, changed) = summarize_tokens("192.168.0.0/24 192.168.1.0/24");
    assert!(changed);
    assert_eq!(lines, vec!["192.168.0.0/23 in 0"]);
}

#[test]
fn test_non_adjacent_no_merge() {
    let (lines, changed) = summarize_tokens("192.168.0.0/24 192.168.2.0/24");
    assert!(!changed);
    assert_eq!(lines, vec!["192.168.0.0/24 in 0", "192.168.2.0/24 in 0"]);
}

#[test]
fn test_overlap_pruning() {
    let (lines, changed) = summarize_tokens("10.0.0.0/8 10.1.0.0/16");
    assert!(changed);
    assert_eq!(lines, vec!["10.0.0.0/8 in 0"]);

    let (lines, changed) = summarize_tokens("10.0.0.0/8m5 10.1.0.0/16m1");
    assert!(!changed);
    assert_eq!(lines, vec!["10.0.0.0/8 in 5", "10.1.0.0/16 in 1"]);
}

#[test]
fn test_class_c_block() {
    let tokens = (0..64)
        .map(|i| format!("172.16.{i}.0/24"))
        .collect::<Vec<_>>()
        .join(" ");
    let (lines, changed) = summarize_tokens(&tokens);
    assert!(changed);
    assert_eq!(lines, vec!["172.16.0.0/18 in 0"]);
}

#[test]
fn test_mixed_list() {
    let (lines, changed) = summarize_tokens(
        "10.0.0.0/25 10.0.0.128/25 10.0.1.0/24 10.0.2.0/24m2 10.0.3.0/24m2 \
         10.0.2.64/26m1 192.168.7.7/32",
    );
    assert!(changed);
    assert_eq!(
        lines,
        vec![
            "10.0.0.0/23 in 0",
            "10.0.2.0/23 in 2",
            "10.0.2.64/26 in 1",
            "192.168.7.7/32 in 0",
        ]
    );
}

#[test]
fn test_idempotence() {
    let routes = parse_route_list(&[
        "10.0.0.0/24 10.0.1.0/24 10.0.2.0/23m1 10.0.3.0/24 10.8.0.0/13 10.9.0.0/16m0",
    ])
    .unwrap();
    let first = summarize(&routes).unwrap();
    let second = summarize(&first.routes).unwrap();
    assert!(!second.changed);
    assert_eq!(second, acrs::Summary { routes: first.routes.clone(), changed: false });
}

#[test]
fn test_invalid_route_index() {
    let routes = vec![
        Route::new("10.0.0.0", 8),
        Route::new("10.0.0.0", "255.255.0.255"),
        Route::new("10.0.0.0", 16),
    ];
    match summarize(&routes) {
        Err(Error::InvalidRoute { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected InvalidRoute, got {:?}", other),
    }
}

#[test]
fn test_json_output() {
    let routes = parse_route_list(&["192.168.0.0/24", "192.168.1.0/24"]).unwrap();
    let summary = summarize(&routes).unwrap();
    let json = summary_json(&summary).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "routes": [{ "cidr": "192.168.0.0/23", "metric": 0 }],
            "changed": true
        })
    );
}

#[test]
fn test_cgi_round_trip() {
    let page = cgi_page("summary-input=10.0.0.0%2F8+10.1.0.0%2F16", 50);
    assert!(page.contains("10.0.0.0/8 in 0 </br>"));
    assert!(!page.contains("10.1.0.0/16"));
}
