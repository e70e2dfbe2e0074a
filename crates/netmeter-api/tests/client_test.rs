#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use chrono::NaiveDate;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netmeter_api::client::{EntityKind, EntityPath};
use netmeter_api::{ApiClient, DateRange, Error, TimeAggregation};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Info ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_location_info() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/locations/nauswaseattle/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "client_city": "Seattle", "type": "city" }
        })))
        .mount(&server)
        .await;

    let body = client
        .info(&EntityPath::Location("nauswaseattle".into()))
        .await
        .unwrap();

    let meta = body.meta.unwrap();
    assert_eq!(meta.client_city.as_deref(), Some("Seattle"));
    assert_eq!(meta.meta_type.as_deref(), Some("city"));
}

#[tokio::test]
async fn test_composite_info_path_nesting() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(
            "/locations/nauswaseattle/clientisps/AS7922/transitisps/AS3356/info",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meta": {} })))
        .mount(&server)
        .await;

    let body = client
        .info(&EntityPath::LocationClientIspTransitIsp(
            "nauswaseattle".into(),
            "AS7922".into(),
            "AS3356".into(),
        ))
        .await
        .unwrap();
    assert!(body.meta.is_some());
}

// ── Series ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_time_series_with_date_range() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/locations/nauswaseattle/time/month/metrics"))
        .and(query_param("startdate", "2015-10"))
        .and(query_param("enddate", "2016-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [ { "date": "2015-10-01", "download_speed_mbps_median": 12.5 } ]
        })))
        .mount(&server)
        .await;

    let body = client
        .time_series(
            TimeAggregation::Month,
            &EntityPath::Location("nauswaseattle".into()),
            DateRange::new(Some(date(2015, 10, 1)), Some(date(2016, 2, 1))),
        )
        .await
        .unwrap();

    assert_eq!(body.results.len(), 1);
    assert_eq!(body.results[0].date.as_deref(), Some("2015-10-01"));
}

#[tokio::test]
async fn test_hourly_uses_hour_segment() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clientisps/AS7922/time/day_hour/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [ { "date": "2016-01-01", "hour": "14" } ]
        })))
        .mount(&server)
        .await;

    let body = client
        .hourly(
            TimeAggregation::Day,
            &EntityPath::ClientIsp("AS7922".into()),
            DateRange::default(),
        )
        .await
        .unwrap();

    assert_eq!(body.results[0].hour, Some(json!("14")));
}

// ── Listings ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_search() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/locations/search/seat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [ { "meta": { "client_city": "Seattle" } } ]
        })))
        .mount(&server)
        .await;

    let body = client.search(EntityKind::Location, "seat").await.unwrap();
    assert_eq!(body.results.unwrap().len(), 1);
}

#[tokio::test]
async fn test_top_with_filter_ids() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clientisps/top"))
        .and(query_param("locations", "nauswaseattle,eufrparis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;

    let ids = vec!["nauswaseattle".to_owned(), "eufrparis".to_owned()];
    let body = client
        .top(EntityKind::ClientIsp, Some((EntityKind::Location, ids.as_slice())))
        .await
        .unwrap();
    assert_eq!(body.results.unwrap().len(), 0);
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_surfaces_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such location"))
        .mount(&server)
        .await;

    let result = client
        .info(&EntityPath::Location("nowhere".into()))
        .await;

    match result {
        Err(Error::Http { status, ref message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("no such location"));
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client
        .info(&EntityPath::Location("nauswaseattle".into()))
        .await;

    match result {
        Err(Error::Deserialization { ref message, .. }) => {
            assert!(message.contains("body preview"), "got message: {message}");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
