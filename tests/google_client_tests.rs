// Google Maps client tests against a mock HTTP server

use fitfindr::core::recommender::DETAIL_FIELDS;
use fitfindr::models::Coordinates;
use fitfindr::services::{Geocoder, GoogleMapsClient, MapsError, PlaceDetailsProvider, PlacesSearch};
use mockito::{Matcher, Server};
use secrecy::SecretString;
use serde_json::json;
use std::time::Duration;

fn client(server: &Server) -> GoogleMapsClient {
    GoogleMapsClient::new(
        server.url(),
        SecretString::new("test-key".into()),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_geocode_returns_first_result() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/maps/api/geocode/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("address".into(), "Central Park, NY".into()),
            Matcher::UrlEncoded("key".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "status": "OK",
                "results": [
                    {
                        "formatted_address": "Central Park, New York, NY, USA",
                        "geometry": {"location": {"lat": 40.7812, "lng": -73.9665}}
                    },
                    {
                        "formatted_address": "Central Park, Queens, NY, USA",
                        "geometry": {"location": {"lat": 40.7, "lng": -73.8}}
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let location = client(&server)
        .geocode("Central Park, NY")
        .await
        .unwrap()
        .unwrap();

    mock.assert_async().await;
    assert_eq!(location.formatted_address, "Central Park, New York, NY, USA");
    assert_eq!(location.coordinates, Coordinates::new(40.7812, -73.9665));
}

#[tokio::test]
async fn test_geocode_zero_results_is_none() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/maps/api/geocode/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"status": "ZERO_RESULTS", "results": []}).to_string())
        .create_async()
        .await;

    let location = client(&server).geocode("Atlantis").await.unwrap();
    assert!(location.is_none());
}

#[tokio::test]
async fn test_nearby_search_sends_location_radius_and_type() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/maps/api/place/nearbysearch/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("location".into(), "40.7812,-73.9665".into()),
            Matcher::UrlEncoded("radius".into(), "5000".into()),
            Matcher::UrlEncoded("type".into(), "gym".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "status": "OK",
                "results": [
                    {
                        "place_id": "gym-a",
                        "name": "Gym A",
                        "rating": 4.6,
                        "geometry": {"location": {"lat": 40.78, "lng": -73.96}}
                    },
                    {"place_id": "gym-b", "name": "Gym B"},
                    {"name": "Nameless"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let places = client(&server)
        .nearby_search(Coordinates::new(40.7812, -73.9665), 5000, "gym")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(places.len(), 3);
    assert_eq!(places[0].place_id.as_deref(), Some("gym-a"));
    assert_eq!(places[0].coordinates, Some(Coordinates::new(40.78, -73.96)));
    assert_eq!(places[0].rating, Some(4.6));
    assert_eq!(places[1].coordinates, None);
    assert_eq!(places[2].place_id, None);
}

#[tokio::test]
async fn test_place_details_requests_fields_and_maps_reviews() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/maps/api/place/details/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("place_id".into(), "gym-a".into()),
            Matcher::UrlEncoded("fields".into(), DETAIL_FIELDS.join(",")),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "status": "OK",
                "result": {
                    "name": "Gym A",
                    "formatted_address": "1 Fifth Ave, New York, NY",
                    "formatted_phone_number": "(212) 555-0100",
                    "reviews": [
                        {"text": "Very clean", "author_name": "Sam", "rating": 5},
                        {"author_name": "Lee"}
                    ]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let details = client(&server)
        .place_details("gym-a", &DETAIL_FIELDS)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(details.name.as_deref(), Some("Gym A"));
    assert_eq!(details.phone.as_deref(), Some("(212) 555-0100"));
    assert_eq!(details.website, None);
    assert_eq!(details.reviews.len(), 2);
    assert_eq!(details.reviews[0].text, "Very clean");
    assert_eq!(details.reviews[1].text, "");
}

#[tokio::test]
async fn test_place_details_without_reviews() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/maps/api/place/details/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"status": "OK", "result": {"name": "Quiet Gym"}}).to_string())
        .create_async()
        .await;

    let details = client(&server)
        .place_details("quiet", &DETAIL_FIELDS)
        .await
        .unwrap();

    assert!(details.reviews.is_empty());
    assert_eq!(details.address, None);
}

#[tokio::test]
async fn test_denied_request_is_api_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/maps/api/place/nearbysearch/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "status": "REQUEST_DENIED",
                "error_message": "The provided API key is invalid.",
                "results": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = client(&server)
        .nearby_search(Coordinates::new(0.0, 0.0), 1000, "gym")
        .await
        .unwrap_err();

    match err {
        MapsError::ApiError { status, message } => {
            assert_eq!(status, "REQUEST_DENIED");
            assert_eq!(message, "The provided API key is invalid.");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_http_failure_is_status_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/maps/api/geocode/json")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let err = client(&server).geocode("Central Park, NY").await.unwrap_err();
    assert!(matches!(err, MapsError::HttpStatus(500)));
}

#[tokio::test]
async fn test_garbage_body_is_invalid_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/maps/api/geocode/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = client(&server).geocode("Central Park, NY").await.unwrap_err();
    assert!(matches!(err, MapsError::InvalidResponse(_)));
}
