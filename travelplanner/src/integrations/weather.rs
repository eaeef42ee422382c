//! OpenWeatherMap current-weather client

use super::{build_http_client, require_key, WeatherProvider, WeatherReport};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde::Deserialize;

const SERVICE: &str = "Weather";

#[derive(Deserialize, Debug)]
struct CurrentWeather {
    main: MainReadings,
    #[serde(default)]
    weather: Vec<Condition>,
    wind: Wind,
}

#[derive(Deserialize, Debug)]
struct MainReadings {
    temp: f64,
    humidity: f64,
}

#[derive(Deserialize, Debug)]
struct Condition {
    description: String,
}

#[derive(Deserialize, Debug)]
struct Wind {
    speed: f64,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    message: String,
}

pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport> {
        let api_key = require_key(SERVICE, &self.api_key)?;
        let url = format!("{}/data/2.5/weather", self.base_url);

        tracing::debug!("Fetching weather for: {}", city);

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| AppError::external(SERVICE, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ApiError>().await {
                Ok(body) => body.message,
                Err(_) => format!("HTTP {}", status),
            };
            tracing::warn!("Weather lookup for {} failed: {}", city, message);
            return Err(AppError::external(SERVICE, message));
        }

        let body: CurrentWeather = response
            .json()
            .await
            .map_err(|e| AppError::external(SERVICE, format!("Unexpected response: {}", e)))?;

        Ok(WeatherReport {
            temperature: body.main.temp,
            description: body
                .weather
                .into_iter()
                .next()
                .map(|c| c.description)
                .unwrap_or_default(),
            humidity: body.main.humidity,
            wind_speed: body.wind.speed,
        })
    }
}
