//! Weather, place and traffic lookups

use crate::error::Result;
use crate::integrations::{Place, PlaceKind, PlacesProvider, TrafficInfo, WeatherProvider, WeatherReport};
use crate::validation;
use std::sync::Arc;

#[derive(Clone)]
pub struct RecommendationsService {
    weather: Arc<dyn WeatherProvider>,
    places: Arc<dyn PlacesProvider>,
}

impl RecommendationsService {
    pub fn new(weather: Arc<dyn WeatherProvider>, places: Arc<dyn PlacesProvider>) -> Self {
        Self { weather, places }
    }

    pub async fn weather(&self, city: &str) -> Result<WeatherReport> {
        let city = validation::require_text("City", city)?;
        tracing::info!("Weather lookup: {}", city);
        self.weather.current_weather(&city).await
    }

    pub async fn places(&self, city: &str, kind: PlaceKind) -> Result<Vec<Place>> {
        let city = validation::require_text("City", city)?;
        tracing::info!("Place lookup: {} in {}", kind, city);
        self.places.recommendations(&city, kind).await
    }

    pub async fn traffic(&self, origin: &str, destination: &str) -> Result<TrafficInfo> {
        let origin = validation::require_text("Origin", origin)?;
        let destination = validation::require_text("Destination", destination)?;
        tracing::info!("Traffic lookup: {} -> {}", origin, destination);
        self.places.traffic(&origin, &destination).await
    }
}
