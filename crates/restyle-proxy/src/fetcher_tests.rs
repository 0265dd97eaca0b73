use super::*;
use wiremock::matchers::{header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> Fetcher {
    Fetcher::new(&FetcherConfig::default()).unwrap()
}

#[test]
fn test_parse_http_url() {
    assert!(parse_http_url("https://example.com/a").is_ok());
    assert!(parse_http_url("  http://example.com  ").is_ok());
    assert!(matches!(
        parse_http_url("ftp://example.com"),
        Err(FetchError::InvalidUrl(_))
    ));
    assert!(matches!(
        parse_http_url("not a url"),
        Err(FetchError::InvalidUrl(_))
    ));
}

#[test]
fn test_invalid_user_agent_is_client_build_error() {
    let config = FetcherConfig {
        user_agent: "bad\nagent".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        Fetcher::new(&config),
        Err(FetchError::ClientBuild(_))
    ));
}

#[tokio::test]
async fn test_fetch_sends_browser_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header_eq("accept-encoding", "identity"))
        .and(header_eq("sec-fetch-mode", "navigate"))
        .and(header_eq("accept-language", "en-US,en;q=0.9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>ok</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let result = fetcher().fetch(&server.uri()).await.unwrap();
    assert_eq!(result.status_code, 200);
    assert_eq!(result.raw_html, "<p>ok</p>");
    assert_eq!(result.origin, server.uri());
}

#[tokio::test]
async fn test_fetch_uses_final_url_after_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", format!("{}/new", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
        .mount(&server)
        .await;

    let result = fetcher().fetch(&format!("{}/old", server.uri())).await.unwrap();
    assert_eq!(result.final_url.path(), "/new");
    assert_eq!(result.raw_html, "moved");
}

#[tokio::test]
async fn test_fetch_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fetcher().fetch(&server.uri()).await.unwrap_err();
    assert!(matches!(err, FetchError::HttpStatus { status: 404 }));
}

#[tokio::test]
async fn test_fetch_transport_error() {
    // Port 9 (discard) is not listening on loopback in test environments.
    let err = fetcher().fetch("http://127.0.0.1:9/").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn test_fetch_stylesheet_swallows_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok.css"))
        .respond_with(ResponseTemplate::new(200).set_body_string("a{}"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing.css"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = fetcher();
    assert_eq!(
        fetcher
            .fetch_stylesheet(&format!("{}/ok.css", server.uri()))
            .await
            .as_deref(),
        Some("a{}")
    );
    assert!(fetcher
        .fetch_stylesheet(&format!("{}/missing.css", server.uri()))
        .await
        .is_none());
    assert!(fetcher.fetch_stylesheet("http://127.0.0.1:9/x.css").await.is_none());
}

#[tokio::test]
async fn test_fetch_stylesheet_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("a{}")
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = FetcherConfig {
        stylesheet_timeout_seconds: 1,
        ..Default::default()
    };
    let fetcher = Fetcher::new(&config).unwrap();
    assert!(fetcher
        .fetch_stylesheet(&format!("{}/slow.css", server.uri()))
        .await
        .is_none());
}
