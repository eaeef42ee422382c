//! Google Places text search and Directions client

use super::{build_http_client, require_key, Place, PlaceKind, PlacesProvider, TrafficInfo};
use crate::config::{PLACES_RESULT_LIMIT, PLACES_SEARCH_RADIUS_M};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const SERVICE: &str = "Places";

#[derive(Deserialize, Debug)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
    error_message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct PlaceResult {
    name: String,
    #[serde(default)]
    formatted_address: String,
    #[serde(default)]
    rating: f64,
}

#[derive(Deserialize, Debug)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<Route>,
    error_message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Route {
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Deserialize, Debug)]
struct Leg {
    distance: TextValue,
    duration: TextValue,
    duration_in_traffic: Option<TextValue>,
}

#[derive(Deserialize, Debug)]
struct TextValue {
    text: String,
}

pub struct GooglePlacesClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GooglePlacesClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// GET a Maps endpoint and decode its JSON body
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let api_key = require_key(SERVICE, &self.api_key)?;
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", api_key)])
            .send()
            .await
            .map_err(|e| AppError::external(SERVICE, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external(SERVICE, format!("HTTP {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::external(SERVICE, format!("Unexpected response: {}", e)))
    }
}

fn status_error(status: String, message: Option<String>) -> AppError {
    match message {
        Some(message) => AppError::external(SERVICE, format!("{}: {}", status, message)),
        None => AppError::external(SERVICE, status),
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn recommendations(&self, city: &str, kind: PlaceKind) -> Result<Vec<Place>> {
        let search = format!("{} in {}", kind.as_str(), city);
        let radius = PLACES_SEARCH_RADIUS_M.to_string();

        tracing::debug!("Searching places: {}", search);

        let body: TextSearchResponse = self
            .get(
                "/maps/api/place/textsearch/json",
                &[("query", search.as_str()), ("radius", radius.as_str())],
            )
            .await?;

        if body.status != "OK" {
            tracing::warn!("Place search for {} returned {}", search, body.status);
            return Err(status_error(body.status, body.error_message));
        }

        Ok(body
            .results
            .into_iter()
            .take(PLACES_RESULT_LIMIT)
            .map(|p| Place {
                name: p.name,
                address: p.formatted_address,
                rating: p.rating,
            })
            .collect())
    }

    async fn traffic(&self, origin: &str, destination: &str) -> Result<TrafficInfo> {
        tracing::debug!("Fetching directions: {} -> {}", origin, destination);

        let body: DirectionsResponse = self
            .get(
                "/maps/api/directions/json",
                &[
                    ("origin", origin),
                    ("destination", destination),
                    ("departure_time", "now"),
                ],
            )
            .await?;

        if body.status != "OK" {
            tracing::warn!("Directions lookup returned {}", body.status);
            return Err(status_error(body.status, body.error_message));
        }

        let leg = body
            .routes
            .into_iter()
            .next()
            .and_then(|route| route.legs.into_iter().next())
            .ok_or_else(|| AppError::external(SERVICE, "No route found"))?;

        Ok(TrafficInfo {
            distance: leg.distance.text,
            duration: leg.duration.text,
            traffic_duration: leg
                .duration_in_traffic
                .map(|d| d.text)
                .unwrap_or_else(|| "Unknown".to_string()),
        })
    }
}
