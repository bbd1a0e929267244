use std::time::Duration;

use pretty_assertions::assert_eq;
use ring_engine::{FailureKind, FetchSettings, Fetcher, ReqwestFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetcher_returns_body_and_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi.yaml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("openapi: 3.0.0\n", "application/yaml"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let url = format!("{}/openapi.yaml", server.uri());

    let output = fetcher.fetch(&url).await.expect("fetch ok");
    assert_eq!(output.metadata.original_url, url);
    assert_eq!(output.metadata.final_url, output.metadata.original_url);
    assert_eq!(output.metadata.redirect_count, 0);
    assert_eq!(output.metadata.content_type.as_deref(), Some("application/yaml"));
    assert_eq!(output.metadata.byte_len, 15);
    assert_eq!(output.bytes, b"openapi: 3.0.0\n");
}

#[tokio::test]
async fn fetcher_follows_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old.json"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", "/new.json"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let output = fetcher
        .fetch(&format!("{}/old.json", server.uri()))
        .await
        .expect("fetch ok");
    assert_eq!(output.metadata.redirect_count, 1);
    assert!(output.metadata.final_url.ends_with("/new.json"));
    assert_eq!(output.bytes, b"{}");
}

#[tokio::test]
async fn fetcher_stops_at_redirect_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop.yaml"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop.yaml"))
        .expect(3)
        .mount(&server)
        .await;

    let settings = FetchSettings {
        redirect_limit: 2,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings).unwrap();
    let err = fetcher
        .fetch(&format!("{}/loop.yaml", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::RedirectLimitExceeded);
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.yaml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let url = format!("{}/missing.yaml", server.uri());

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_rejects_invalid_url() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let err = fetcher.fetch("not a url/doc.yaml").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.yaml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow: true"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings).unwrap();
    let url = format!("{}/slow.yaml", server.uri());

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings).unwrap();
    let url = format!("{}/large.json", server.uri());

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}
