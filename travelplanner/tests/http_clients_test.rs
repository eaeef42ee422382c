//! HTTP provider tests against a local mock server
//!
//! These tests verify the request shape each client sends and how the
//! response envelopes of the weather, places and identity APIs are read.

use travelplanner::error::ErrorKind;
use travelplanner::integrations::{
    FirebaseIdentityClient, GooglePlacesClient, IdentityProvider, OpenWeatherClient, PlaceKind,
    PlacesProvider, WeatherProvider,
};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_weather_request_and_parse() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "weather-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": { "temp": 14.2, "humidity": 72 },
            "weather": [{ "description": "light rain" }],
            "wind": { "speed": 4.1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(server.uri(), Some("weather-key".to_string())).unwrap();
    let report = client.current_weather("London").await.unwrap();

    assert_eq!(report.temperature, 14.2);
    assert_eq!(report.description, "light rain");
    assert_eq!(report.humidity, 72.0);
    assert_eq!(report.wind_speed, 4.1);
}

#[tokio::test]
async fn test_weather_error_message_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(server.uri(), Some("weather-key".to_string())).unwrap();
    let err = client.current_weather("Atlantis").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ExternalServiceFailure);
    assert!(err.to_string().contains("city not found"));
}

#[tokio::test]
async fn test_weather_without_key_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(server.uri(), None).unwrap();
    assert!(client.current_weather("London").await.is_err());
}

#[tokio::test]
async fn test_place_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .and(query_param("query", "restaurant in Rome"))
        .and(query_param("key", "places-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [
                { "name": "Roscioli", "formatted_address": "Via dei Giubbonari 21", "rating": 4.6 },
                { "name": "Da Enzo" }
            ]
        })))
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(server.uri(), Some("places-key".to_string())).unwrap();
    let places = client
        .recommendations("Rome", PlaceKind::Restaurant)
        .await
        .unwrap();

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "Roscioli");
    assert_eq!(places[0].rating, 4.6);
    assert_eq!(places[1].address, "");
}

#[tokio::test]
async fn test_place_search_non_ok_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_DENIED",
            "results": [],
            "error_message": "The provided API key is invalid."
        })))
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(server.uri(), Some("bad-key".to_string())).unwrap();
    let err = client
        .recommendations("Rome", PlaceKind::TouristAttraction)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("REQUEST_DENIED"));
    assert!(err.to_string().contains("API key is invalid"));
}

#[tokio::test]
async fn test_traffic_without_live_duration() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/directions/json"))
        .and(query_param("origin", "Soho"))
        .and(query_param("destination", "Camden"))
        .and(query_param("departure_time", "now"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "routes": [{
                "legs": [{
                    "distance": { "text": "4.2 km", "value": 4200 },
                    "duration": { "text": "14 mins", "value": 840 }
                }]
            }]
        })))
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(server.uri(), Some("places-key".to_string())).unwrap();
    let info = client.traffic("Soho", "Camden").await.unwrap();

    assert_eq!(info.distance, "4.2 km");
    assert_eq!(info.duration, "14 mins");
    assert_eq!(info.traffic_duration, "Unknown");
}

#[tokio::test]
async fn test_identity_sign_up() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/accounts:signUp"))
        .and(query_param("key", "identity-key"))
        .and(body_partial_json(serde_json::json!({
            "email": "ada@example.com",
            "returnSecureToken": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "localId": "uid-123",
            "email": "ada@example.com",
            "idToken": "token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        FirebaseIdentityClient::new(server.uri(), Some("identity-key".to_string())).unwrap();
    let account = client
        .create_account("ada@example.com", "secret1")
        .await
        .unwrap();

    assert_eq!(account.uid, "uid-123");
    assert_eq!(account.email, "ada@example.com");
}

#[tokio::test]
async fn test_identity_error_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 400, "message": "INVALID_LOGIN_CREDENTIALS" }
        })))
        .mount(&server)
        .await;

    let client =
        FirebaseIdentityClient::new(server.uri(), Some("identity-key".to_string())).unwrap();
    let err = client.sign_in("ada@example.com", "wrong").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ExternalServiceFailure);
    assert!(err.to_string().contains("INVALID_LOGIN_CREDENTIALS"));
}
