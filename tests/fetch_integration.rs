//! Integration tests for static and rendered page fetching.

use std::path::PathBuf;
use std::time::Duration;

use link_harvester::config::WaitCondition;
use link_harvester::error::{BrowserError, FetchError};
use link_harvester::fetch::{FetchRequest, HttpClient, PageFetcher, UserAgents};
use link_harvester::links::{extract_links, LinkFilter};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::{FakeBrowser, LISTING};

fn fetcher(browser: &FakeBrowser) -> PageFetcher {
    PageFetcher::new(HttpClient::new(UserAgents::default()).unwrap(), browser.launcher())
}

fn rendered(url: &str, wait_for: WaitCondition) -> FetchRequest {
    FetchRequest::new(Url::parse(url).unwrap())
        .dynamic(wait_for)
        .with_timeout(Duration::from_millis(300))
        .with_poll_interval(Duration::from_millis(20))
}

#[tokio::test]
async fn test_static_fetch_parses_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/listing/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING))
        .mount(&server)
        .await;
    let browser = FakeBrowser::default();
    let url = Url::parse(&format!("{}/listing/", server.uri())).unwrap();

    let page = fetcher(&browser)
        .fetch(&FetchRequest::new(url.clone()))
        .await
        .unwrap();

    assert_eq!(page.url(), &url);
    let filter = LinkFilter::from_suffixes(&[".csv", ".txt"]);
    assert_eq!(extract_links(&page, &filter), vec!["a.csv", "files/b.txt"]);
    assert!(browser.events().is_empty());
}

#[tokio::test]
async fn test_static_fetch_error_status_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let url = Url::parse(&format!("{}/broken", server.uri())).unwrap();

    let result = fetcher(&FakeBrowser::default())
        .fetch(&FetchRequest::new(url))
        .await;

    assert!(matches!(result, Err(FetchError::Status { status: 500, .. })));
}

#[tokio::test]
async fn test_static_fetch_unreachable_host() {
    let url = Url::parse("http://127.0.0.1:9/listing/").unwrap();

    let result = fetcher(&FakeBrowser::default())
        .fetch(&FetchRequest::new(url).with_timeout(Duration::from_secs(2)))
        .await;

    assert!(matches!(result, Err(FetchError::Transport { .. })));
}

#[tokio::test]
async fn test_dynamic_without_wait_survives_navigation_error() {
    let browser = FakeBrowser::serving(LISTING).unreachable();

    let page = fetcher(&browser)
        .fetch(&rendered("https://unreachable.invalid/", WaitCondition::None))
        .await
        .unwrap();

    assert_eq!(
        extract_links(&page, &LinkFilter::All).len(),
        4,
        "current document is parsed even though navigation failed"
    );
    assert_eq!(
        browser.events(),
        vec![
            "launch",
            "navigate https://unreachable.invalid/",
            "content",
            "close"
        ]
    );
}

#[tokio::test]
async fn test_dynamic_wait_finds_later_suffix() {
    let browser = FakeBrowser::serving(LISTING).with_present("a[href$='.txt']");
    let wait = WaitCondition::Suffixes(vec![".pdf".to_string(), ".txt".to_string()]);

    let page = fetcher(&browser)
        .fetch(&rendered("https://example.org/data/", wait))
        .await
        .unwrap();

    let filter = LinkFilter::from_suffixes(&[".txt"]);
    assert_eq!(extract_links(&page, &filter), vec!["files/b.txt"]);
    assert_eq!(browser.events().last().map(String::as_str), Some("close"));
}

#[tokio::test]
async fn test_dynamic_wait_exhausted_still_returns_page() {
    let browser = FakeBrowser::serving(LISTING);
    let wait = WaitCondition::Suffixes(vec![".xlsx".to_string()]);

    let page = fetcher(&browser)
        .fetch(&rendered("https://example.org/data/", wait))
        .await
        .unwrap();

    assert!(page.document().html().contains("a.csv"));
    assert!(browser.events().contains(&"close".to_string()));
}

#[tokio::test]
async fn test_dynamic_launch_failure() {
    let browser = FakeBrowser::serving(LISTING).failing_launch();

    let result = fetcher(&browser)
        .fetch(&rendered("https://example.org/", WaitCondition::AnyLink))
        .await;

    assert!(matches!(
        result,
        Err(FetchError::Driver(BrowserError::Launch(_)))
    ));
    assert_eq!(browser.events(), vec!["launch"]);
}

#[tokio::test]
async fn test_dynamic_content_failure_still_closes_browser() {
    let browser = FakeBrowser::serving(LISTING)
        .with_present("a[href]")
        .failing_content();

    let result = fetcher(&browser)
        .fetch(&rendered("https://example.org/", WaitCondition::AnyLink))
        .await;

    assert!(matches!(result, Err(FetchError::Render { .. })));
    assert_eq!(browser.events().last().map(String::as_str), Some("close"));
}

#[tokio::test]
async fn test_dynamic_launch_options() {
    let browser = FakeBrowser::serving(LISTING);
    let download_dir = PathBuf::from("/tmp/browser-downloads");

    fetcher(&browser)
        .with_browser_download_dir(Some(download_dir.clone()))
        .fetch(&rendered("https://example.org/", WaitCondition::None).headless(false))
        .await
        .unwrap();

    let options = browser.launched_with().unwrap();
    assert!(!options.headless);
    assert_eq!(options.download_dir, Some(download_dir));
}
