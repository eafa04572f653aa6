use std::net::TcpListener;

use httpmock::prelude::*;

use google_analytics_rs::{Config, GoogleAnalytics, Request, Response};

fn test_config(url: String) -> Config {
    Config::default()
        .with_url(url)
        .with_derive_system_properties(false)
}

#[test]
fn merged_payload_prefers_explicit_values() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/collect")
            .header("content-type", "application/x-www-form-urlencoded")
            .body_contains("tid=UA-1")
            .body_contains("ul=en-US");
        then.status(200).body("ok");
    });

    // The default request's tracking id is blank, i.e. absent; its user
    // language fills the gap the per-hit request leaves.
    let defaults = Request::new().tracking_id("").user_language("en-US");
    let analytics = GoogleAnalytics::with_config(test_config(server.url("/collect")), defaults);

    let response = analytics.send(&Request::new().tracking_id("UA-1"));

    mock.assert();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "ok");
}

#[test]
fn per_hit_value_overrides_default() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/collect").body_contains("ul=fr-FR");
        then.status(200);
    });

    let defaults = Request::new().tracking_id("UA-1").user_language("en-US");
    let analytics = GoogleAnalytics::with_config(test_config(server.url("/collect")), defaults);

    analytics.send(&Request::new().user_language("fr-FR"));

    mock.assert();
}

#[test]
fn repeated_sends_leave_defaults_untouched() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/collect").body_contains("an=demo");
        then.status(200);
    });

    let defaults = Request::new().tracking_id("UA-1").app_name("demo");
    let analytics =
        GoogleAnalytics::with_config(test_config(server.url("/collect")), defaults.clone());

    analytics.send(&Request::new().hit_type("pageview"));
    analytics.send(&Request::new().hit_type("event"));

    mock.assert_hits(2);
    // Merging works on copies; the stored defaults still carry exactly the
    // fields they started with (plus the auto-filled protocol fields).
    let stored = analytics.default_request();
    assert_eq!(stored.get_tracking_id(), Some("UA-1"));
    assert_eq!(stored.get_app_name(), Some("demo"));
    assert_eq!(stored.get_hit_type(), None);
}

#[test]
fn disabled_client_never_touches_the_network() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/collect");
        then.status(200);
    });

    let config = test_config(server.url("/collect")).with_enabled(false);
    let analytics = GoogleAnalytics::with_config(config, Request::new().tracking_id("UA-1"));

    let response = analytics.send(&Request::new().hit_type("pageview"));

    assert_eq!(response, Response::default());
    assert!(!response.is_sent());
    mock.assert_hits(0);
}

#[test]
fn transport_failure_yields_unset_response() {
    // Bind and immediately drop a listener so the port is closed.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };

    let config = test_config(format!("http://127.0.0.1:{port}/collect"));
    let analytics = GoogleAnalytics::with_config(config, Request::new().tracking_id("UA-1"));

    let response = analytics.send(&Request::new().hit_type("pageview"));

    assert_eq!(response, Response::default());
}

#[test]
fn collector_error_status_is_reported_verbatim() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/collect");
        then.status(503).body("go away");
    });

    let analytics = GoogleAnalytics::with_config(
        test_config(server.url("/collect")),
        Request::new().tracking_id("UA-1"),
    );

    let response = analytics.send(&Request::new());
    assert_eq!(response.status_code, 503);
    assert_eq!(response.body, "go away");
    assert!(response.is_sent());
}

#[test]
fn custom_parameters_are_sent_with_merge_precedence() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/collect")
            .body_contains("cd1=explicit")
            .body_contains("cd2=fallback");
        then.status(200);
    });

    let defaults = Request::new()
        .tracking_id("UA-1")
        .custom("cd1", "fallback")
        .custom("cd2", "fallback");
    let analytics = GoogleAnalytics::with_config(test_config(server.url("/collect")), defaults);

    analytics.send(&Request::new().custom("cd1", "explicit"));

    mock.assert();
}
