//! In-process providers for deterministic testing.
//!
//! ```rust
//! use travelplanner::integrations::mock::MockPlaces;
//! use travelplanner::integrations::{PlaceKind, PlacesProvider};
//!
//! # tokio_test_block(async {
//! let places = MockPlaces::new()
//!     .with_attractions(&["Tower of London", "British Museum"]);
//! let found = places.recommendations("London", PlaceKind::TouristAttraction).await.unwrap();
//! assert_eq!(found.len(), 2);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f);
//! # }
//! ```

use super::{
    IdentityAccount, IdentityProvider, Place, PlaceKind, PlacesProvider, TrafficInfo,
    WeatherProvider, WeatherReport,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Weather provider returning a fixed reading, or always failing
#[derive(Clone)]
pub struct MockWeather {
    report: Option<WeatherReport>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockWeather {
    pub fn with_temperature(temperature: f64) -> Self {
        Self {
            report: Some(WeatherReport {
                temperature,
                description: "clear sky".to_string(),
                humidity: 50.0,
                wind_speed: 3.0,
            }),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            report: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Cities requested so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl WeatherProvider for MockWeather {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(city.to_string());
        }

        self.report
            .clone()
            .ok_or_else(|| AppError::external("Weather", "mock weather failure"))
    }
}

/// Places provider serving fixed lists
#[derive(Clone, Default)]
pub struct MockPlaces {
    attractions: Vec<Place>,
    restaurants: Vec<Place>,
    traffic: Option<TrafficInfo>,
    failing: bool,
}

impl MockPlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_attractions(mut self, names: &[&str]) -> Self {
        self.attractions = names.iter().map(|n| Place::named(n)).collect();
        self
    }

    pub fn with_restaurants(mut self, names: &[&str]) -> Self {
        self.restaurants = names.iter().map(|n| Place::named(n)).collect();
        self
    }

    pub fn with_traffic(mut self, traffic: TrafficInfo) -> Self {
        self.traffic = Some(traffic);
        self
    }
}

#[async_trait]
impl PlacesProvider for MockPlaces {
    async fn recommendations(&self, _city: &str, kind: PlaceKind) -> Result<Vec<Place>> {
        if self.failing {
            return Err(AppError::external("Places", "mock places failure"));
        }

        Ok(match kind {
            PlaceKind::TouristAttraction => self.attractions.clone(),
            PlaceKind::Restaurant => self.restaurants.clone(),
        })
    }

    async fn traffic(&self, _origin: &str, _destination: &str) -> Result<TrafficInfo> {
        if self.failing {
            return Err(AppError::external("Places", "mock places failure"));
        }

        self.traffic
            .clone()
            .ok_or_else(|| AppError::external("Places", "No route found"))
    }
}

/// Identity provider backed by an in-memory account table
#[derive(Clone, Default)]
pub struct MockIdentity {
    accounts: Arc<Mutex<HashMap<String, (String, String)>>>,
    failing: bool,
}

impl MockIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().map(|a| a.len()).unwrap_or(0)
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    async fn create_account(&self, email: &str, password: &str) -> Result<IdentityAccount> {
        if self.failing {
            return Err(AppError::external("Identity", "mock identity failure"));
        }

        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| AppError::Generic("mock identity lock poisoned".into()))?;

        let key = email.to_lowercase();
        if accounts.contains_key(&key) {
            return Err(AppError::external("Identity", "EMAIL_EXISTS"));
        }

        let uid = Uuid::new_v4().to_string();
        accounts.insert(key, (uid.clone(), password.to_string()));

        Ok(IdentityAccount {
            uid,
            email: email.to_string(),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityAccount> {
        if self.failing {
            return Err(AppError::external("Identity", "mock identity failure"));
        }

        let accounts = self
            .accounts
            .lock()
            .map_err(|_| AppError::Generic("mock identity lock poisoned".into()))?;

        match accounts.get(&email.to_lowercase()) {
            Some((uid, stored)) if stored == password => Ok(IdentityAccount {
                uid: uid.clone(),
                email: email.to_string(),
            }),
            _ => Err(AppError::external("Identity", "INVALID_LOGIN_CREDENTIALS")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_identity_round_trip() {
        let identity = MockIdentity::new();

        identity.create_account("a@b.com", "secret1").await.unwrap();
        assert!(identity.create_account("A@B.com", "x").await.is_err());
        assert!(identity.sign_in("a@b.com", "secret1").await.is_ok());
        assert!(identity.sign_in("a@b.com", "nope").await.is_err());
        assert_eq!(identity.account_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_weather_records_calls() {
        let weather = MockWeather::with_temperature(5.0);

        let report = weather.current_weather("Oslo").await.unwrap();
        assert_eq!(report.temperature, 5.0);
        assert_eq!(weather.calls(), vec!["Oslo"]);

        assert!(MockWeather::failing().current_weather("Oslo").await.is_err());
    }
}
