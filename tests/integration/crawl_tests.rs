//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use page_harvest::config::{ClientConfig, CrawlConfig};
use page_harvest::crawler::Coordinator;
use page_harvest::output::{CsvExporter, Exporter, JsonExporter};
use page_harvest::state::CrawlPhase;
use page_harvest::PageRecord;
use std::time::{Duration, Instant};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no politeness delay
fn create_test_config(seed: &str, max_pages: u32) -> CrawlConfig {
    CrawlConfig::new(seed, max_pages, 0.0).with_jitter(0.0)
}

/// Creates a client configuration with a short timeout for testing
fn create_test_client() -> ClientConfig {
    ClientConfig {
        timeout_seconds: 5,
        user_agents: vec!["TestBot/1.0".to_string()],
    }
}

/// Mounts an HTML page at `route` that must be requested exactly `times` times
async fn mount_page(server: &MockServer, route: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

fn urls(pages: &[PageRecord]) -> Vec<String> {
    pages.iter().map(|p| p.url.clone()).collect()
}

#[tokio::test]
async fn test_page_budget_stops_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="/a">A</a>
            <a href="{}/b">B</a>
            <a href="https://other.example/x">Elsewhere</a>
            </body></html>"#,
            base_url
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/a", "<title>A</title>".to_string(), 1).await;
    mount_page(&mock_server, "/b", "<title>B</title>".to_string(), 0).await;

    let mut coordinator =
        Coordinator::with_client(create_test_config(&base_url, 2), create_test_client())
            .expect("Failed to create coordinator");
    let pages = coordinator.crawl().await.expect("Crawl failed");

    assert_eq!(
        urls(&pages),
        vec![format!("{}/", base_url), format!("{}/a", base_url)]
    );
    assert_eq!(pages[0].title, "Home");
    assert_eq!(pages[0].links.len(), 3, "link list is never filtered");
    assert!(pages.iter().all(|p| !p.url.contains("other.example")));
    assert_eq!(coordinator.phase(), CrawlPhase::Done);
}

#[tokio::test]
async fn test_other_authority_is_never_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let port = url::Url::parse(&base_url)
        .expect("Failed to parse base URL")
        .port()
        .expect("Mock server URI has a port");

    // Same server, different authority: only the host spelling differs
    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<a href="http://localhost:{}/ext">Elsewhere</a><a href="/in">Inside</a>"#,
            port
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/in", "<title>In</title>".to_string(), 1).await;
    mount_page(&mock_server, "/ext", "<title>Ext</title>".to_string(), 0).await;

    let mut coordinator =
        Coordinator::with_client(create_test_config(&base_url, 10), create_test_client())
            .expect("Failed to create coordinator");
    let pages = coordinator.crawl().await.expect("Crawl failed");

    assert_eq!(
        urls(&pages),
        vec![format!("{}/", base_url), format!("{}/in", base_url)]
    );
    assert_eq!(
        pages[0].links[0].href,
        format!("http://localhost:{}/ext", port),
        "off-authority links stay in the record"
    );
}

#[tokio::test]
async fn test_failed_fetch_does_not_stop_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/broken">Broken</a><a href="/missing">Missing</a><a href="/ok">OK</a>"#
            .to_string(),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok", "<p>Fine</p>".to_string(), 1).await;

    let mut coordinator =
        Coordinator::with_client(create_test_config(&base_url, 10), create_test_client())
            .expect("Failed to create coordinator");
    let pages = coordinator.crawl().await.expect("Crawl failed");

    assert_eq!(
        urls(&pages),
        vec![format!("{}/", base_url), format!("{}/ok", base_url)]
    );
    assert_eq!(pages[1].paragraphs, vec!["Fine".to_string()]);
}

#[tokio::test]
async fn test_no_url_fetched_twice() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Cycles and repeated links; every page must still be requested once
    mount_page(
        &mock_server,
        "/",
        r#"<a href="/a">A</a><a href="/a">A again</a><a href="/">Home</a><a href="/b">B</a>"#
            .to_string(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/a",
        r#"<a href="/">Home</a><a href="/b">B</a>"#.to_string(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/b",
        r#"<a href="/a">A</a><a href="/">Home</a>"#.to_string(),
        1,
    )
    .await;

    let mut coordinator =
        Coordinator::with_client(create_test_config(&base_url, 10), create_test_client())
            .expect("Failed to create coordinator");
    let pages = coordinator.crawl().await.expect("Crawl failed");

    assert_eq!(pages.len(), 3);
    assert_eq!(
        urls(&pages),
        vec![
            format!("{}/", base_url),
            format!("{}/a", base_url),
            format!("{}/b", base_url)
        ],
        "pages are fetched in breadth-first order"
    );
}

#[tokio::test]
async fn test_frontier_exhaustion_ends_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "<html><body><h1>Only page</h1></body></html>".to_string(),
        1,
    )
    .await;

    let mut coordinator =
        Coordinator::with_client(create_test_config(&base_url, 10), create_test_client())
            .expect("Failed to create coordinator");
    let pages = coordinator.crawl().await.expect("Crawl failed");

    assert_eq!(pages.len(), 1);
    assert!(pages.len() <= 10);
    assert_eq!(pages[0].headings[0].text, "Only page");
    assert_eq!(coordinator.phase(), CrawlPhase::Done);

    let second = coordinator.crawl().await;
    assert!(second.is_err(), "a finished coordinator cannot crawl again");
}

#[tokio::test]
async fn test_seed_failure_yields_empty_result() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut coordinator =
        Coordinator::with_client(create_test_config(&base_url, 5), create_test_client())
            .expect("Failed to create coordinator");
    let pages = coordinator.crawl().await.expect("Crawl failed");

    assert!(pages.is_empty());
    assert_eq!(coordinator.statistics().total_pages, 0);
}

#[tokio::test]
async fn test_latin1_page_decoded_from_meta_charset() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"<html><head><meta charset=\"iso-8859-1\"><title>caf\xE9</title></head>\
              <body><h1>Cr\xE8me br\xFBl\xE9e</h1><p>d\xE9j\xE0 vu</p></body></html>"
                .to_vec(),
            "text/html",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut coordinator =
        Coordinator::with_client(create_test_config(&base_url, 1), create_test_client())
            .expect("Failed to create coordinator");
    let pages = coordinator.crawl().await.expect("Crawl failed");

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].title, "café");
    assert_eq!(pages[0].headings[0].text, "Crème brûlée");
    assert_eq!(pages[0].paragraphs, vec!["déjà vu".to_string()]);
}

#[tokio::test]
async fn test_statistics_after_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Home</title></head><body>
        <h1>Welcome</h1>
        <p>First</p>
        <a href="/next">Next</a>
        <img src="/logo.png" alt="Logo">
        </body></html>"#
            .to_string(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/next",
        r#"<h1>Next</h1><h2>Section</h2><p>One</p><p>Two</p>"#.to_string(),
        1,
    )
    .await;

    let mut coordinator =
        Coordinator::with_client(create_test_config(&base_url, 10), create_test_client())
            .expect("Failed to create coordinator");
    coordinator.crawl().await.expect("Crawl failed");

    let stats = coordinator.statistics();
    assert_eq!(stats.total_pages, 2);
    assert_eq!(stats.total_headings, 3);
    assert_eq!(stats.total_paragraphs, 3);
    assert_eq!(stats.total_links, 1);
    assert_eq!(stats.total_images, 1);
    assert_eq!(stats.unique_urls, 2);
}

#[tokio::test]
async fn test_politeness_delay_between_requests() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/a">A</a><a href="/b">B</a>"#.to_string(),
        1,
    )
    .await;
    mount_page(&mock_server, "/a", String::new(), 1).await;
    mount_page(&mock_server, "/b", String::new(), 1).await;

    let config = CrawlConfig::new(&base_url, 3, 0.2).with_jitter(0.0);
    let mut coordinator = Coordinator::with_client(config, create_test_client())
        .expect("Failed to create coordinator");

    let start = Instant::now();
    let pages = coordinator.crawl().await.expect("Crawl failed");

    assert_eq!(pages.len(), 3);
    assert!(
        start.elapsed() >= Duration::from_millis(400),
        "three fetches need two full delays, took {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn test_export_crawl_results() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<title>Export</title><h1>Top</h1><p>Body</p><a href="/x">X</a>"#.to_string(),
        1,
    )
    .await;
    mount_page(&mock_server, "/x", "<title>X</title>".to_string(), 1).await;

    let mut coordinator =
        Coordinator::with_client(create_test_config(&base_url, 10), create_test_client())
            .expect("Failed to create coordinator");
    let pages = coordinator.crawl().await.expect("Crawl failed");

    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("pages.json");
    let csv_path = dir.path().join("pages.csv");

    JsonExporter
        .export(&pages, Some(&json_path))
        .expect("Failed to export JSON");
    CsvExporter
        .export(&pages, Some(&csv_path))
        .expect("Failed to export CSV");

    let json = std::fs::read_to_string(&json_path).expect("Failed to read JSON");
    let parsed: Vec<PageRecord> = serde_json::from_str(&json).expect("Invalid JSON");
    assert_eq!(parsed, pages);

    let csv = std::fs::read_to_string(&csv_path).expect("Failed to read CSV");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "url,title,num_headings,num_paragraphs,num_links,num_images,fetched_at"
    );
    assert!(lines[1].starts_with(&format!("{}/,Export,1,1,1,0,", base_url)));
}
