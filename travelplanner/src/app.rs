//! Application state and initialization
//!
//! This module wires the database, external providers and services
//! together. All services are initialized here and made available through
//! AppState.

use crate::config::Config;
use crate::database::{self, Repository};
use crate::error::Result;
use crate::integrations::{
    FirebaseIdentityClient, GooglePlacesClient, IdentityProvider, LocalIdentityProvider,
    OpenWeatherClient, PlacesProvider, WeatherProvider,
};
use crate::services::{
    ItineraryService, JournalService, PackingService, PhotosService, RecommendationsService,
    TripsService, UsersService,
};
use std::sync::Arc;

/// External collaborators the services depend on
#[derive(Clone)]
pub struct Providers {
    pub weather: Arc<dyn WeatherProvider>,
    pub places: Arc<dyn PlacesProvider>,
    pub identity: Arc<dyn IdentityProvider>,
}

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub repo: Repository,
    pub users_service: UsersService,
    pub trips_service: TripsService,
    pub itinerary_service: ItineraryService,
    pub packing_service: PackingService,
    pub journal_service: JournalService,
    pub photos_service: PhotosService,
    pub recommendations_service: RecommendationsService,
}

impl AppState {
    pub fn new(repo: Repository, providers: Providers) -> Self {
        Self {
            users_service: UsersService::new(repo.clone(), providers.identity),
            trips_service: TripsService::new(repo.clone()),
            itinerary_service: ItineraryService::new(repo.clone(), providers.places.clone()),
            packing_service: PackingService::new(repo.clone(), providers.weather.clone()),
            journal_service: JournalService::new(repo.clone()),
            photos_service: PhotosService::new(repo.clone()),
            recommendations_service: RecommendationsService::new(
                providers.weather,
                providers.places,
            ),
            repo,
        }
    }

    /// Open the database and build the HTTP-backed providers from `config`
    pub async fn initialize(config: &Config) -> Result<Self> {
        tracing::info!("Initializing application");
        tracing::info!("Database path: {:?}", config.db_path);

        let pool = database::create_pool(&config.db_path).await?;
        let repo = Repository::new(pool);

        let identity: Arc<dyn IdentityProvider> = if config.identity_api_key.is_some() {
            tracing::info!("Using remote identity provider");
            Arc::new(FirebaseIdentityClient::new(
                config.identity_base_url.clone(),
                config.identity_api_key.clone(),
            )?)
        } else {
            tracing::info!("No identity API key configured, using local accounts");
            Arc::new(LocalIdentityProvider::new(repo.clone()))
        };

        if config.openweather_api_key.is_none() {
            tracing::warn!("OPENWEATHER_API_KEY not set, weather lookups will fail");
        }
        if config.places_api_key.is_none() {
            tracing::warn!("PLACES_API_KEY not set, itineraries will use placeholders");
        }

        let providers = Providers {
            weather: Arc::new(OpenWeatherClient::new(
                config.openweather_base_url.clone(),
                config.openweather_api_key.clone(),
            )?),
            places: Arc::new(GooglePlacesClient::new(
                config.places_base_url.clone(),
                config.places_api_key.clone(),
            )?),
            identity,
        };

        tracing::info!("Application initialized successfully");
        Ok(Self::new(repo, providers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_initialize_creates_database() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            db_path: dir.path().join("data").join("trips.db"),
            ..Config::default()
        };

        let state = AppState::initialize(&config).await.unwrap();

        assert!(config.db_path.exists());
        assert!(state.trips_service.list_user_trips("nobody").await.unwrap().is_empty());
    }
}
