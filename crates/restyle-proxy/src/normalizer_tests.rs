use super::*;
use restyle_config::FetcherConfig;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORIGIN: &str = "http://example.test";

fn rewrite(html: &str) -> RewrittenDocument {
    rewrite_document(html, ORIGIN, "http").unwrap()
}

#[test]
fn test_title_and_inline_styles() {
    let doc = rewrite(
        "<html><head><title> A &amp; B </title><style>a{}</style><style>b{}</style></head><body></body></html>",
    );
    assert_eq!(doc.title.as_deref(), Some("A & B"));
    assert_eq!(doc.inline_css, "a{}\nb{}\n");
}

#[test]
fn test_empty_title_is_none() {
    let doc = rewrite("<html><head><title>  </title></head><body>x</body></html>");
    assert_eq!(doc.title, None);
}

#[test]
fn test_body_extracted() {
    let doc = rewrite("<html><head></head><body class=\"x\"><h1>Hi</h1></body></html>");
    assert_eq!(doc.body_html, "<h1>Hi</h1>");
}

#[test]
fn test_no_body_uses_whole_document() {
    let doc = rewrite("<div>fragment</div>");
    assert_eq!(doc.body_html, "<div>fragment</div>");
}

#[test]
fn test_scripts_removed() {
    let doc = rewrite(
        "<html><head><script src=\"/a.js\"></script></head><body><p>x</p><script>alert(1)</script></body></html>",
    );
    assert!(!doc.body_html.contains("<script"));
    assert!(!doc.body_html.contains("alert"));
    assert_eq!(doc.body_html, "<p>x</p>");
}

#[test]
fn test_refresh_meta_removed() {
    let doc = rewrite(
        "<meta http-equiv=\"Refresh\" content=\"0; url=/elsewhere\"><meta http-equiv=\"content-type\" content=\"text/html\"><p>x</p>",
    );
    assert!(!doc.body_html.to_ascii_lowercase().contains("refresh"));
    assert!(doc.body_html.contains("content-type"));
}

#[test]
fn test_root_relative_references_absolutized() {
    let doc = rewrite(
        "<body><img src=\"/img/a.png\"><a href=\"/about\">About</a><div style=\"background: url(/bg.png)\"></div></body>",
    );
    assert!(doc.body_html.contains("src=\"http://example.test/img/a.png\""));
    assert!(doc.body_html.contains("href=\"http://example.test/about\""));
    assert!(doc.body_html.contains("url(http://example.test/bg.png)"));
}

#[test]
fn test_style_block_urls_absolutized_in_body() {
    let doc = rewrite(
        "<html><body><style>.a{background:url(/x.png)} .b{background:url('/y.png')}</style><p>x</p></body></html>",
    );
    assert!(doc.body_html.contains("url(http://example.test/x.png)"));
    assert!(doc.body_html.contains("http://example.test/y.png"));
    assert!(!doc.body_html.contains("&gt;"));
    assert!(doc.body_html.ends_with("</style><p>x</p>"));
}

#[test]
fn test_style_block_child_combinator_kept() {
    let doc = rewrite("<body><style>ul > li{background:url(/dot.png)}</style></body>");
    assert_eq!(
        doc.body_html,
        "<style>ul > li{background:url(http://example.test/dot.png)}</style>"
    );
}

#[test]
fn test_protocol_relative_uses_request_scheme() {
    let doc = rewrite_document(
        "<body><img src=\"//cdn.test/a.png\"></body>",
        ORIGIN,
        "http",
    )
    .unwrap();
    assert!(doc.body_html.contains("src=\"http://cdn.test/a.png\""));
    assert!(!doc.body_html.contains("https:"));
    assert!(!doc.body_html.contains("example.test//cdn"));
}

#[test]
fn test_relative_and_absolute_references_untouched() {
    let doc = rewrite("<body><a href=\"page.html\">a</a><a href=\"https://x.test/\">b</a></body>");
    assert!(doc.body_html.contains("href=\"page.html\""));
    assert!(doc.body_html.contains("href=\"https://x.test/\""));
}

#[test]
fn test_stylesheet_links_collected() {
    let doc = rewrite(
        "<head><link rel=\"stylesheet\" href=\"/a.css\"><link rel=\"icon\" href=\"/f.ico\"><link rel=\"Alternate StyleSheet\" href=\"b.css\"></head>",
    );
    assert_eq!(doc.stylesheet_hrefs, vec!["/a.css", "b.css"]);
}

#[test]
fn test_resolve_stylesheet_href() {
    assert_eq!(resolve_stylesheet_href("/a.css", ORIGIN, "http"), "http://example.test/a.css");
    assert_eq!(resolve_stylesheet_href("a.css", ORIGIN, "http"), "http://example.test/a.css");
    assert_eq!(resolve_stylesheet_href("//cdn.test/a.css", ORIGIN, "https"), "https://cdn.test/a.css");
    assert_eq!(resolve_stylesheet_href("https://x.test/a.css", ORIGIN, "http"), "https://x.test/a.css");
}

fn fetched(server: &MockServer, html: &str) -> FetchResult {
    FetchResult::new(Url::parse(&server.uri()).unwrap(), 200, html)
}

#[tokio::test]
async fn test_linked_stylesheets_inlined_with_provenance() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/theme.css"))
        .respond_with(ResponseTemplate::new(200).set_body_string(".a { background: url(../img/x.png) }"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken.css"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(&FetcherConfig::default()).unwrap();
    let page = Normalizer::new(5)
        .normalize(
            &fetcher,
            &fetched(
                &server,
                "<head><style>p{}</style><link rel=\"stylesheet\" href=\"/broken.css\"><link rel=\"stylesheet\" href=\"/theme.css\"></head><body>x</body>",
            ),
            "http",
        )
        .await
        .unwrap();

    let origin = server.uri();
    let expected = format!(
        "p{{}}\n\n/* From: {origin}/theme.css */\n.a {{ background: url({origin}/img/x.png) }}\n"
    );
    assert_eq!(page.css, expected);
    assert!(page.success);
    assert_eq!(page.base_url, origin);
}

#[tokio::test]
async fn test_stylesheet_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x{}"))
        .expect(2)
        .mount(&server)
        .await;

    let html = (0..4)
        .map(|i| format!("<link rel=\"stylesheet\" href=\"/{}.css\">", i))
        .collect::<String>();
    let fetcher = Fetcher::new(&FetcherConfig::default()).unwrap();
    let page = Normalizer::new(2)
        .normalize(&fetcher, &fetched(&server, &html), "http")
        .await
        .unwrap();
    assert_eq!(page.css.matches("/* From:").count(), 2);
}

#[tokio::test]
async fn test_title_falls_back_to_hostname() {
    let server = MockServer::start().await;
    let fetcher = Fetcher::new(&FetcherConfig::default()).unwrap();
    let page = Normalizer::new(5)
        .normalize(&fetcher, &fetched(&server, "<body>x</body>"), "http")
        .await
        .unwrap();
    assert_eq!(page.title, "127.0.0.1");
}
