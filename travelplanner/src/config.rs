//! Application configuration
//!
//! Central location for configuration constants, resource limits and
//! validation boundaries, plus the runtime [`Config`] read from the
//! environment.

use std::path::PathBuf;
use std::time::Duration;

// ===== Validation Limits =====

/// Minimum password length accepted at registration.
/// Matches the identity provider's own lower bound.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum length for names, destinations, titles and item names
pub const MAX_SHORT_TEXT_LENGTH: usize = 200;

/// Maximum length for stored photo filenames
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Maximum photo payload size in bytes (16 MiB)
pub const MAX_PHOTO_SIZE_BYTES: usize = 16 * 1024 * 1024;

/// Longest trip accepted, in days including both ends
pub const MAX_TRIP_DAYS: i64 = 365;

/// Photo file extensions accepted for upload
pub const ALLOWED_PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

// ===== Recommendation Settings =====

/// Number of places kept from a recommendation response
pub const PLACES_RESULT_LIMIT: usize = 10;

/// Search radius in meters for place recommendations
pub const PLACES_SEARCH_RADIUS_M: u32 = 5_000;

/// Placeholder attraction used when no recommendations are available
pub const FALLBACK_ATTRACTION: &str = "Local sightseeing";

/// Placeholder restaurant used when no recommendations are available
pub const FALLBACK_RESTAURANT: &str = "Local dining";

// ===== Packing Rules =====

/// Below this temperature (°C) the cold clothing set is packed
pub const COLD_THRESHOLD_C: f64 = 10.0;

/// Below this temperature (°C) the cool clothing set is packed
pub const COOL_THRESHOLD_C: f64 = 20.0;

/// Temperature assumed when the weather lookup fails
pub const DEFAULT_TEMPERATURE_C: f64 = 20.0;

// ===== Journal =====

/// Moods offered by the journal form. Stored moods are free text.
pub const SUGGESTED_MOODS: &[&str] = &[
    "Happy",
    "Excited",
    "Relaxed",
    "Adventurous",
    "Tired",
    "Nostalgic",
];

// ===== HTTP =====

/// Timeout applied to every external API request
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com";
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

/// Default database file when `TRAVELPLANNER_DB_PATH` is unset
pub const DEFAULT_DB_PATH: &str = "travelplanner.db";

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
    pub places_api_key: Option<String>,
    pub places_base_url: String,
    /// When unset, accounts are verified against the local users table
    pub identity_api_key: Option<String>,
    pub identity_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            openweather_api_key: None,
            openweather_base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
            places_api_key: None,
            places_base_url: DEFAULT_PLACES_BASE_URL.to_string(),
            identity_api_key: None,
            identity_base_url: DEFAULT_IDENTITY_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            db_path: non_empty("TRAVELPLANNER_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            openweather_api_key: non_empty("OPENWEATHER_API_KEY"),
            openweather_base_url: non_empty("OPENWEATHER_BASE_URL")
                .unwrap_or(defaults.openweather_base_url),
            places_api_key: non_empty("PLACES_API_KEY"),
            places_base_url: non_empty("PLACES_BASE_URL").unwrap_or(defaults.places_base_url),
            identity_api_key: non_empty("FIREBASE_API_KEY"),
            identity_base_url: non_empty("IDENTITY_BASE_URL")
                .unwrap_or(defaults.identity_base_url),
        }
    }
}
