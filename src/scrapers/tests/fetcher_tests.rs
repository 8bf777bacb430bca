use crate::config::ScraperConfig;
use crate::error::FetchError;
use crate::scrapers::fetcher::{Fetch, HttpFetcher, validate_url};
use crate::scrapers::tourism::TouristSiteScraper;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(Duration::from_secs(10))
}

#[test]
fn test_validate_url() {
    assert!(validate_url("https://tourisme.gouv.ci/accueil/sitetouristique").is_ok());
    assert!(validate_url("http://127.0.0.1:8080/page").is_ok());
    assert!(matches!(
        validate_url("not a url"),
        Err(FetchError::InvalidUrl { .. })
    ));
    assert!(matches!(
        validate_url("ftp://example.org/file"),
        Err(FetchError::InvalidUrl { .. })
    ));
    assert!(matches!(
        validate_url("/relative/path"),
        Err(FetchError::InvalidUrl { .. })
    ));
}

#[test]
fn test_timeout_comes_from_config() {
    let fetcher = HttpFetcher::from_config(&ScraperConfig::default());
    assert_eq!(fetcher.timeout(), Duration::from_secs(10));

    let config = ScraperConfig {
        timeout_secs: 2,
        ..ScraperConfig::default()
    };
    assert_eq!(HttpFetcher::from_config(&config).timeout(), Duration::from_secs(2));
}

#[tokio::test]
async fn test_fetch_ok_returns_body() {
    let server = MockServer::start().await;
    let body = "<html><body><h1>Title</h1><p>Test fetch succeeded</p></body></html>";
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let result = fetcher()
        .fetch(&format!("{}/page", server.uri()))
        .await
        .unwrap();

    assert_eq!(result, body);
}

#[tokio::test]
async fn test_fetch_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetcher()
        .fetch(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { .. }));
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_fetch_service_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = fetcher().fetch(&server.uri()).await.unwrap_err();

    assert_eq!(err.status_code(), Some(503));
}

#[tokio::test]
async fn test_fetch_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = fetcher()
        .fetch_with_timeout(&server.uri(), Duration::from_millis(100))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Grab a free port, then release it so nothing is listening there
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = fetcher()
        .fetch(&format!("http://127.0.0.1:{port}/"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Connection { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_invalid_url_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = fetcher().fetch("htp:/broken").await.unwrap_err();

    assert!(matches!(err, FetchError::InvalidUrl { .. }));
}

#[tokio::test]
async fn test_scrape_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accueil/sitetouristique"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="item"><h2>Basilique Notre-Dame de la Paix</h2><a href="/site/1">Lire plus</a></div>
               <div class="item"><h2>Parc national de Taï</h2><a href="/site/2">Lire plus</a></div>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/site/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="news_content"><a href="/site/1">Basilique Notre-Dame de la Paix</a><img src="/img/1.jpg"><p>Yamoussoukro.</p><span>Partager</span></div>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/site/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>Page en travaux</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let config = ScraperConfig::new(&format!("{}/accueil/sitetouristique", server.uri()));
    let scraper = TouristSiteScraper::from_config(config).unwrap();
    let report = scraper.scrape_report().await.unwrap();

    let sites = report.sites();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].url, format!("{}/site/1", server.uri()));
    assert_eq!(
        sites[0].title.as_deref(),
        Some("Basilique Notre-Dame de la Paix")
    );
    assert_eq!(sites[0].picture.as_deref(), Some("/img/1.jpg"));
    assert_eq!(sites[0].description.as_deref(), Some("Yamoussoukro."));
    assert_eq!(report.skipped.len(), 1);
}
