//! Download cache behaviour against a mock HTTP server

mod common;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zcta_ingest::{Fetcher, IngestConfig};

fn fetcher(cache: &std::path::Path) -> Fetcher {
    let config = IngestConfig::builder().cache_dir(cache).build();
    Fetcher::new(&config).unwrap()
}

#[tokio::test]
async fn test_download_is_cached_by_file_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rel/zcta_county_rel_10.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain; charset=utf-8")
                .set_body_string(common::RELATIONSHIP),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let cache = dir.path().join("build");
    let fetcher = fetcher(&cache);
    let url = format!("{}/rel/zcta_county_rel_10.txt", server.uri());

    let first = fetcher.retrieve(&url).await.unwrap();
    assert_eq!(first, cache.join("zcta_county_rel_10.txt"));
    assert_eq!(std::fs::read_to_string(&first).unwrap(), common::RELATIONSHIP);

    // Served from disk; the mock verifies a single request on drop
    let second = fetcher.retrieve(&url).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_existing_cache_file_skips_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fresh"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("data.csv"), "stale").unwrap();

    let path = fetcher(dir.path())
        .retrieve(&format!("{}/data.csv", server.uri()))
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), "stale");
}

#[tokio::test]
async fn test_zip_archive_written_verbatim() {
    let archive = common::gazetteer_archive(common::GAZETTEER);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Gaz_counties_national.zip"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/zip")
                .set_body_bytes(archive.clone()),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let path = fetcher(dir.path())
        .retrieve(&format!("{}/Gaz_counties_national.zip", server.uri()))
        .await
        .unwrap();

    assert_eq!(std::fs::read(path).unwrap(), archive);
}

#[tokio::test]
async fn test_text_without_charset_is_decoded_as_latin1() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/csv")
                .set_body_bytes(b"zip,city\n88001,Do\xf1a Ana\n".to_vec()),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let path = fetcher(dir.path())
        .retrieve(&format!("{}/zips.csv", server.uri()))
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        "zip,city\n88001,Doña Ana\n"
    );
}

#[tokio::test]
async fn test_http_error_is_reported_and_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let result = fetcher(dir.path())
        .retrieve(&format!("{}/missing.txt", server.uri()))
        .await;

    assert!(result.is_err());
    assert!(!dir.path().join("missing.txt").exists());
}
