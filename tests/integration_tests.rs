// Integration tests for Location Matcher

use location_matcher::core::{DistanceModel, Matcher};
use location_matcher::error::AppError;
use location_matcher::models::{Coordinates, Direction};
use location_matcher::pipeline::{run, RunOptions};
use location_matcher::services::{Geocoder, NominatimClient, StaticGeocoder};
use location_matcher::tabular::LoadError;
use mockito::Matcher as QueryMatcher;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

const LIST_A: &str = "street,house number,zip code,city\n\
    Unter den Linden,1,10117,Berlin\n\
    Marienplatz,8,80331,München\n\
    Nowhere,0,00000,Atlantis\n";

const LIST_B: &str = "City,Zip Code\n\
    Potsdam,14467\n\
    Augsburg,86150\n\
    Hamburg,20095\n";

fn geocoder() -> StaticGeocoder {
    StaticGeocoder::new()
        .with("Unter den Linden 1, 10117 Berlin", 52.5170, 13.3889)
        .with("Marienplatz 8, 80331 München", 48.1374, 11.5755)
        .with("Potsdam, 14467", 52.3989, 13.0657)
        .with("Augsburg, 86150", 48.3665, 10.8944)
        .with("Hamburg, 20095", 53.5503, 10.0007)
}

fn options(dir: &TempDir, direction: Direction) -> RunOptions {
    let list_a = dir.path().join("list_a.csv");
    let list_b = dir.path().join("list_b.csv");
    fs::write(&list_a, LIST_A).unwrap();
    fs::write(&list_b, LIST_B).unwrap();

    RunOptions {
        list_a,
        list_b,
        output: dir.path().join("matched_locations.csv"),
        direction,
        concurrency: 2,
        matcher: Matcher::new(DistanceModel::Geodesic),
    }
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let mut rows = vec![reader
        .headers()
        .unwrap()
        .iter()
        .map(String::from)
        .collect::<Vec<_>>()];
    for record in reader.records() {
        rows.push(record.unwrap().iter().map(String::from).collect());
    }
    rows
}

#[tokio::test]
async fn test_integration_a_to_b() {
    let dir = TempDir::new().unwrap();
    let options = options(&dir, Direction::AToB);

    let summary = run(&options, &geocoder()).await.unwrap();

    assert_eq!(summary.list_a_rows, 3);
    assert_eq!(summary.list_a_geocoded, 2);
    assert_eq!(summary.list_b_geocoded, 3);
    assert_eq!(summary.matched, 2);
    assert_eq!(summary.dropped, 1);

    let rows = read_rows(&options.output);
    assert_eq!(rows[0], vec!["Address from List A", "Location from List B", "Distance (km)"]);
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[1][0], "Unter den Linden 1, 10117 Berlin");
    assert_eq!(rows[1][1], "Potsdam 14467");
    let berlin_potsdam: f64 = rows[1][2].parse().unwrap();
    assert!(berlin_potsdam > 20.0 && berlin_potsdam < 30.0, "got {}", berlin_potsdam);

    assert_eq!(rows[2][0], "Marienplatz 8, 80331 München");
    assert_eq!(rows[2][1], "Augsburg 86150");
}

#[tokio::test]
async fn test_integration_customer_to_stock() {
    let dir = TempDir::new().unwrap();
    let options = options(&dir, Direction::CustomerToStock);

    let summary = run(&options, &geocoder()).await.unwrap();

    assert_eq!(summary.matched, 3);
    assert_eq!(summary.dropped, 0);

    let rows = read_rows(&options.output);
    assert_eq!(rows[0], vec!["Customer Location", "Closest Stock Location", "Distance (km)"]);
    assert_eq!(rows[1][..2], ["Potsdam 14467", "Unter den Linden 1, 10117 Berlin"]);
    assert_eq!(rows[2][..2], ["Augsburg 86150", "Marienplatz 8, 80331 München"]);
    assert_eq!(rows[3][..2], ["Hamburg 20095", "Unter den Linden 1, 10117 Berlin"]);
}

#[tokio::test]
async fn test_integration_nothing_geocoded_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let options = options(&dir, Direction::AToB);

    let summary = run(&options, &StaticGeocoder::new()).await.unwrap();

    assert_eq!(summary.matched, 0);
    assert_eq!(summary.dropped, 3);
    assert_eq!(read_rows(&options.output).len(), 1);
}

#[tokio::test]
async fn test_integration_missing_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let options = options(&dir, Direction::AToB);
    fs::write(&options.list_a, "street,house number,zip code\nA,1,10115\n").unwrap();

    let err = run(&options, &geocoder()).await.unwrap_err();

    match err {
        AppError::Load(LoadError::MissingColumn { column, .. }) => assert_eq!(column, "city"),
        other => panic!("unexpected error: {}", other),
    }
    assert!(!options.output.exists());
}

#[tokio::test]
async fn test_integration_missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut options = options(&dir, Direction::AToB);
    options.list_b = dir.path().join("does_not_exist.csv");

    let err = run(&options, &geocoder()).await.unwrap_err();

    assert!(matches!(err, AppError::Load(LoadError::Open { .. })));
    assert!(!options.output.exists());
}

#[tokio::test]
async fn test_nominatim_resolves_first_hit() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search")
        .match_query(QueryMatcher::AllOf(vec![
            QueryMatcher::UrlEncoded("q".into(), "Berlin, 10115".into()),
            QueryMatcher::UrlEncoded("format".into(), "json".into()),
            QueryMatcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .match_header("user-agent", "location-matcher-test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"place_id":1,"lat":"52.5321","lon":"13.3849","display_name":"Berlin"}]"#)
        .create_async()
        .await;

    let client = NominatimClient::new(server.url(), "location-matcher-test", Duration::from_secs(5)).unwrap();

    let coords = client.geocode("Berlin, 10115").await;

    assert_eq!(coords, Some(Coordinates::new(52.5321, 13.3849)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_nominatim_empty_result_is_none() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(QueryMatcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = NominatimClient::new(server.url(), "location-matcher-test", Duration::from_secs(5)).unwrap();

    assert!(client.geocode("Atlantis, 00000").await.is_none());
}

#[tokio::test]
async fn test_nominatim_service_error_is_none() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(QueryMatcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = NominatimClient::new(server.url(), "location-matcher-test", Duration::from_secs(5)).unwrap();

    assert!(client.geocode("Berlin, 10115").await.is_none());
}

#[tokio::test]
async fn test_nominatim_malformed_body_is_none() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(QueryMatcher::Any)
        .with_status(200)
        .with_body(r#"{"error":"unexpected"}"#)
        .create_async()
        .await;

    let client = NominatimClient::new(server.url(), "location-matcher-test", Duration::from_secs(5)).unwrap();

    assert!(client.geocode("Berlin, 10115").await.is_none());
}
