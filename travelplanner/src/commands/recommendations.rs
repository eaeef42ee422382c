//! Weather, places and traffic commands

use super::CommandResponse;
use crate::app::AppState;
use crate::error::Result;
use crate::integrations::{Place, PlaceKind, TrafficInfo, WeatherReport};

pub async fn get_weather(state: &AppState, city: &str) -> CommandResponse<WeatherReport> {
    let result = state.recommendations_service.weather(city).await;
    CommandResponse::from_result("get_weather", result, |report| {
        format!("{:.1}°C, {}", report.temperature, report.description)
    })
}

pub async fn get_places(state: &AppState, city: &str, kind: &str) -> CommandResponse<Vec<Place>> {
    let result: Result<Vec<Place>> = async {
        let kind: PlaceKind = kind.parse()?;
        state.recommendations_service.places(city, kind).await
    }
    .await;

    CommandResponse::from_result("get_places", result, |places| {
        format!("{} place(s) found", places.len())
    })
}

pub async fn get_traffic(
    state: &AppState,
    origin: &str,
    destination: &str,
) -> CommandResponse<TrafficInfo> {
    let result = state.recommendations_service.traffic(origin, destination).await;
    CommandResponse::from_result("get_traffic", result, |info| {
        format!("{} ({})", info.duration, info.distance)
    })
}
