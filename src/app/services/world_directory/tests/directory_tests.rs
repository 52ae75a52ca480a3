//! Tests for directory payload parsing and region resolution

use super::DIRECTORY_PAYLOAD;
use crate::Error;
use crate::app::services::fetch::EndpointClient;
use crate::app::services::world_directory::{
    RegionDirectory, parse_directory_payload, resolve_region,
};
use crate::constants::DEFAULT_TIMEOUT_SECS;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn quoted(tokens: &[&str]) -> String {
    tokens
        .iter()
        .map(|t| format!("\"{}\"", t))
        .collect::<Vec<_>>()
        .join(";")
}

#[test]
fn test_parse_portal_payload() {
    let rows = parse_directory_payload("http://test/dir", DIRECTORY_PAYLOAD).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].server, "pts1");
    assert_eq!(
        rows[0].url.as_deref(),
        Some("https://pts1.tribalwars.com.pt")
    );
    assert_eq!(rows[1].server, "pt92");
    assert_eq!(
        rows[1].url.as_deref(),
        Some("https://pt92.tribalwars.com.pt")
    );
}

#[test]
fn test_even_token_count_pairs_fully() {
    let body = quoted(&["a1", "http://a1", "b2", "http://b2", "c3", "http://c3"]);
    let rows = parse_directory_payload("http://test/dir", &body).unwrap();

    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row.url.is_some()));
}

#[test]
fn test_odd_token_count_keeps_dangling_code() {
    let body = quoted(&["a1", "http://a1", "b2", "http://b2", "c3"]);
    let rows = parse_directory_payload("http://test/dir", &body).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].server, "c3");
    assert_eq!(rows[2].url, None);
}

#[test]
fn test_empty_body_means_no_worlds() {
    let rows = parse_directory_payload("http://test/dir", "").unwrap();
    assert!(rows.is_empty());

    let rows = parse_directory_payload("http://test/dir", "  \n ").unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_tokenless_body_is_a_parse_error() {
    let result = parse_directory_payload("http://test/dir", "<html>maintenance</html>");
    match result {
        Err(Error::DirectoryParse { url, .. }) => assert_eq!(url, "http://test/dir"),
        other => panic!("expected directory parse error, got {:?}", other),
    }
}

#[test]
fn test_duplicate_code_takes_last_url_at_first_position() {
    let body = quoted(&["a1", "http://old", "b2", "http://b2", "a1", "http://new"]);
    let rows = parse_directory_payload("http://test/dir", &body).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].server, "a1");
    assert_eq!(rows[0].url.as_deref(), Some("http://new"));
    assert_eq!(rows[1].server, "b2");
}

#[test]
fn test_rows_carry_region_columns() {
    let rows = parse_directory_payload("http://test/dir", DIRECTORY_PAYLOAD).unwrap();

    assert_eq!(rows[0].region.as_deref(), Some("PT"));
    assert_eq!(rows[0].region_name.as_deref(), Some("Portugal"));
}

#[test]
fn test_row_without_letter_prefix_has_no_region() {
    let body = quoted(&["123", "http://numeric"]);
    let rows = parse_directory_payload("http://test/dir", &body).unwrap();

    assert_eq!(rows[0].region, None);
    assert_eq!(rows[0].region_name, None);
}

#[test]
fn test_worlds_skips_rows_without_url() {
    let body = quoted(&["a1", "http://a1", "b2"]);
    let rows = parse_directory_payload("http://test/dir", &body).unwrap();
    let directory = RegionDirectory::new("example.test", rows);

    let worlds = directory.worlds();
    assert_eq!(worlds.len(), 1);
    assert_eq!(worlds[0].code, "a1");
    assert_eq!(worlds[0].url, "http://a1");
}

#[tokio::test]
async fn test_resolve_region_against_portal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/backend/get_servers.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DIRECTORY_PAYLOAD))
        .mount(&server)
        .await;

    let client = EndpointClient::new(DEFAULT_TIMEOUT_SECS, "test-agent").unwrap();
    let directory = resolve_region(&client, &server.uri()).await.unwrap();

    assert_eq!(directory.region, server.uri());
    assert_eq!(directory.len(), 2);
    assert_eq!(directory.worlds().len(), 2);
}

#[tokio::test]
async fn test_resolve_region_propagates_http_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/backend/get_servers.php"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = EndpointClient::new(DEFAULT_TIMEOUT_SECS, "test-agent").unwrap();
    let result = resolve_region(&client, &server.uri()).await;

    assert!(matches!(result, Err(Error::Fetch { .. })));
}
