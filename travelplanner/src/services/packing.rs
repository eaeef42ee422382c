//! Packing list service
//!
//! A fixed rule table turns the destination's current temperature and
//! keywords in its name into a checklist. Generated items are replaced on
//! every run; items the user added stay.

use crate::config::{COLD_THRESHOLD_C, COOL_THRESHOLD_C, DEFAULT_TEMPERATURE_C};
use crate::database::{
    PackingCategory, PackingItem, PackingProgress, PackingSuggestion, Repository,
};
use crate::error::Result;
use crate::integrations::WeatherProvider;
use std::sync::Arc;

use PackingCategory::*;

const ESSENTIALS: &[(&str, PackingCategory)] = &[
    ("Passport/ID", Documents),
    ("Credit/Debit Cards", Documents),
    ("Travel Insurance Info", Documents),
    ("Phone Charger", Electronics),
    ("Power Adapter", Electronics),
    ("Medications", Health),
    ("Toothbrush", Toiletries),
    ("Toothpaste", Toiletries),
    ("Deodorant", Toiletries),
    ("Shampoo/Conditioner", Toiletries),
    ("Soap/Body Wash", Toiletries),
];

const COLD_CLOTHING: &[(&str, PackingCategory)] = &[
    ("Winter Coat", Clothing),
    ("Sweaters/Fleece", Clothing),
    ("Thermal Underwear", Clothing),
    ("Gloves", Clothing),
    ("Scarf", Clothing),
    ("Winter Hat", Clothing),
    ("Warm Socks", Clothing),
];

const COOL_CLOTHING: &[(&str, PackingCategory)] = &[
    ("Light Jacket", Clothing),
    ("Long Sleeve Shirts", Clothing),
    ("Sweater", Clothing),
    ("Jeans/Pants", Clothing),
];

const WARM_CLOTHING: &[(&str, PackingCategory)] = &[
    ("T-shirts", Clothing),
    ("Shorts", Clothing),
    ("Sunglasses", Accessories),
    ("Sunscreen", Toiletries),
    ("Hat", Clothing),
    ("Sandals", Clothing),
];

const BASIC_CLOTHING: &[(&str, PackingCategory)] = &[
    ("Underwear", Clothing),
    ("Socks", Clothing),
    ("Comfortable Walking Shoes", Clothing),
    ("Pajamas", Clothing),
];

const BEACH_KEYWORDS: &[&str] = &["beach", "ocean", "sea", "island"];
const BEACH_ITEMS: &[(&str, PackingCategory)] = &[
    ("Swimsuit", Clothing),
    ("Beach Towel", Accessories),
    ("Flip Flops", Clothing),
    ("Beach Bag", Accessories),
];

const HIKING_KEYWORDS: &[&str] = &["mountain", "hiking", "trek", "national park"];
const HIKING_ITEMS: &[(&str, PackingCategory)] = &[
    ("Hiking Shoes", Clothing),
    ("Hiking Socks", Clothing),
    ("Water Bottle", Accessories),
    ("Backpack", Accessories),
    ("First Aid Kit", Health),
];

const WET_KEYWORDS: &[&str] = &["rain", "tropical", "jungle"];
const WET_ITEMS: &[(&str, PackingCategory)] = &[
    ("Rain Jacket", Clothing),
    ("Umbrella", Accessories),
    ("Waterproof Bag", Accessories),
];

const EXTRAS: &[(&str, PackingCategory)] = &[
    ("Camera", Electronics),
    ("Headphones", Electronics),
    ("E-reader/Books", Entertainment),
];

/// Temperature band used to pick clothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Cold,
    Cool,
    Warm,
}

impl TemperatureBand {
    pub fn from_celsius(temperature: f64) -> Self {
        if temperature < COLD_THRESHOLD_C {
            TemperatureBand::Cold
        } else if temperature < COOL_THRESHOLD_C {
            TemperatureBand::Cool
        } else {
            TemperatureBand::Warm
        }
    }

    fn clothing(&self) -> &'static [(&'static str, PackingCategory)] {
        match self {
            TemperatureBand::Cold => COLD_CLOTHING,
            TemperatureBand::Cool => COOL_CLOTHING,
            TemperatureBand::Warm => WARM_CLOTHING,
        }
    }
}

/// The generated checklist for a destination at a given temperature.
///
/// Keyword matches are case-insensitive substring matches on the
/// destination, so "Bali Beach Resort" picks up beach gear.
pub fn packing_rules(destination: &str, temperature: f64) -> Vec<PackingSuggestion> {
    let destination = destination.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|k| destination.contains(k));

    let mut groups: Vec<&[(&str, PackingCategory)]> = vec![
        ESSENTIALS,
        TemperatureBand::from_celsius(temperature).clothing(),
        BASIC_CLOTHING,
    ];
    if matches(BEACH_KEYWORDS) {
        groups.push(BEACH_ITEMS);
    }
    if matches(HIKING_KEYWORDS) {
        groups.push(HIKING_ITEMS);
    }
    if matches(WET_KEYWORDS) {
        groups.push(WET_ITEMS);
    }
    groups.push(EXTRAS);

    groups
        .into_iter()
        .flatten()
        .map(|(name, category)| PackingSuggestion::new(name, *category))
        .collect()
}

/// Service for trip packing lists
#[derive(Clone)]
pub struct PackingService {
    repo: Repository,
    weather: Arc<dyn WeatherProvider>,
}

impl PackingService {
    pub fn new(repo: Repository, weather: Arc<dyn WeatherProvider>) -> Self {
        Self { repo, weather }
    }

    /// Regenerate the rule-based part of a trip's packing list.
    ///
    /// A failed weather lookup falls back to the default temperature.
    /// Returns the full list, custom items included.
    pub async fn generate_packing_list(&self, trip_id: &str) -> Result<Vec<PackingItem>> {
        let trip = self.repo.get_trip(trip_id).await?;

        let temperature = match self.weather.current_weather(&trip.destination).await {
            Ok(report) => report.temperature,
            Err(e) => {
                tracing::warn!(
                    "Weather unavailable for {}, assuming {}°C: {}",
                    trip.destination,
                    DEFAULT_TEMPERATURE_C,
                    e
                );
                DEFAULT_TEMPERATURE_C
            }
        };

        let suggestions = packing_rules(&trip.destination, temperature);
        tracing::info!(
            "Generating {} packing items for {} at {:.1}°C",
            suggestions.len(),
            trip.destination,
            temperature
        );

        self.repo.replace_generated_items(&trip.id, &suggestions).await
    }

    pub async fn add_custom_item(
        &self,
        trip_id: &str,
        item_name: &str,
        category: PackingCategory,
    ) -> Result<PackingItem> {
        self.repo.get_trip(trip_id).await?;

        let item = self
            .repo
            .create_packing_item(trip_id, item_name, category, true)
            .await?;

        tracing::info!("Custom packing item added: {} ({})", item.item_name, item.id);
        Ok(item)
    }

    pub async fn get_item(&self, item_id: &str) -> Result<PackingItem> {
        self.repo.get_packing_item(item_id).await
    }

    pub async fn set_packed(&self, item_id: &str, packed: bool) -> Result<PackingItem> {
        self.repo.set_item_packed(item_id, packed).await
    }

    pub async fn delete_item(&self, item_id: &str) -> Result<()> {
        self.repo.delete_packing_item(item_id).await
    }

    pub async fn list_items(&self, trip_id: &str) -> Result<Vec<PackingItem>> {
        self.repo.list_packing_items(trip_id).await
    }

    pub async fn progress(&self, trip_id: &str) -> Result<PackingProgress> {
        self.repo.packing_progress(trip_id).await
    }
}
