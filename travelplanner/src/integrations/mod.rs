//! External service integrations
//!
//! Weather, place recommendations, directions and identity are reached
//! through the traits below so services can run against real HTTP clients
//! or the in-process mocks.

pub mod identity;
pub mod mock;
pub mod places;
pub mod weather;

pub use identity::{FirebaseIdentityClient, LocalIdentityProvider};
pub use places::GooglePlacesClient;
pub use weather::OpenWeatherClient;

use crate::config::HTTP_TIMEOUT;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Current conditions for a city, metric units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature: f64,
    pub description: String,
    pub humidity: f64,
    pub wind_speed: f64,
}

/// What kind of place to recommend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceKind {
    TouristAttraction,
    Restaurant,
}

impl PlaceKind {
    /// Search term sent to the places API
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceKind::TouristAttraction => "tourist_attraction",
            PlaceKind::Restaurant => "restaurant",
        }
    }
}

impl fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "tourist_attraction" | "attraction" | "attractions" => Ok(PlaceKind::TouristAttraction),
            "restaurant" | "restaurants" => Ok(PlaceKind::Restaurant),
            other => Err(AppError::validation(format!("Unknown place type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub rating: f64,
}

impl Place {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            address: String::new(),
            rating: 0.0,
        }
    }
}

/// Route summary between two locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficInfo {
    pub distance: String,
    pub duration: String,
    /// "Unknown" when the provider has no live traffic estimate
    pub traffic_duration: String,
}

/// An account known to the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityAccount {
    pub uid: String,
    pub email: String,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport>;
}

#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Up to ten places of `kind` in `city`
    async fn recommendations(&self, city: &str, kind: PlaceKind) -> Result<Vec<Place>>;

    async fn traffic(&self, origin: &str, destination: &str) -> Result<TrafficInfo>;
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_account(&self, email: &str, password: &str) -> Result<IdentityAccount>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityAccount>;

    /// True when sign-in checks the local users table, so a local email
    /// change is all it takes to move the login
    fn uses_local_credentials(&self) -> bool {
        false
    }
}

/// HTTP client shared by the API clients
pub(crate) fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("travelplanner/", env!("CARGO_PKG_VERSION")))
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| AppError::Generic(format!("Failed to create HTTP client: {}", e)))
}

/// Fail with a clear message when an API key was never configured
pub(crate) fn require_key<'a>(service: &'static str, key: &'a Option<String>) -> Result<&'a str> {
    key.as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::external(service, "API key not configured"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_kind_parsing() {
        assert_eq!(
            "tourist_attraction".parse::<PlaceKind>().unwrap(),
            PlaceKind::TouristAttraction
        );
        assert_eq!(
            "Restaurants".parse::<PlaceKind>().unwrap(),
            PlaceKind::Restaurant
        );
        assert!("museum".parse::<PlaceKind>().is_err());
    }

    #[test]
    fn test_require_key() {
        assert!(require_key("Weather", &None).is_err());
        assert!(require_key("Weather", &Some(String::new())).is_err());
        assert_eq!(require_key("Weather", &Some("k".into())).unwrap(), "k");
    }
}
