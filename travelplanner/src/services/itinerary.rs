//! Itinerary generation
//!
//! Builds a day-by-day plan from place recommendations for the trip's
//! destination. Each day gets a morning attraction, a lunch restaurant,
//! a different afternoon attraction and a different dinner restaurant.
//! Regeneration replaces the whole itinerary.

use crate::config::{FALLBACK_ATTRACTION, FALLBACK_RESTAURANT};
use crate::database::{DayPlan, ItineraryEntry, Repository};
use crate::error::Result;
use crate::integrations::{PlaceKind, PlacesProvider};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Service for generating and reading itineraries
#[derive(Clone)]
pub struct ItineraryService {
    repo: Repository,
    places: Arc<dyn PlacesProvider>,
}

impl ItineraryService {
    pub fn new(repo: Repository, places: Arc<dyn PlacesProvider>) -> Self {
        Self { repo, places }
    }

    /// Generate (or regenerate) a trip's itinerary with entropy-seeded randomness
    pub async fn generate_itinerary(&self, trip_id: &str) -> Result<Vec<ItineraryEntry>> {
        let mut rng = StdRng::from_entropy();
        self.generate_itinerary_with_rng(trip_id, &mut rng).await
    }

    /// Generate a trip's itinerary, drawing choices from `rng`
    pub async fn generate_itinerary_with_rng<R: Rng + Send>(
        &self,
        trip_id: &str,
        rng: &mut R,
    ) -> Result<Vec<ItineraryEntry>> {
        let trip = self.repo.get_trip(trip_id).await?;

        tracing::info!(
            "Generating {}-day itinerary for {} (trip {})",
            trip.day_count(),
            trip.destination,
            trip.id
        );

        let attractions = self
            .candidates(&trip.destination, PlaceKind::TouristAttraction, FALLBACK_ATTRACTION)
            .await;
        let restaurants = self
            .candidates(&trip.destination, PlaceKind::Restaurant, FALLBACK_RESTAURANT)
            .await;

        let days = plan_days(
            trip.start_date,
            trip.day_count(),
            &attractions,
            &restaurants,
            rng,
        );

        let entries = self.repo.replace_itinerary(&trip.id, &days).await?;

        tracing::info!("Itinerary generated for trip {}: {} days", trip.id, entries.len());
        Ok(entries)
    }

    pub async fn get_itinerary(&self, trip_id: &str) -> Result<Vec<ItineraryEntry>> {
        self.repo.list_itinerary(trip_id).await
    }

    /// Distinct place names, or the single placeholder when the lookup
    /// fails or comes back empty
    async fn candidates(&self, destination: &str, kind: PlaceKind, fallback: &str) -> Vec<String> {
        let places = match self.places.recommendations(destination, kind).await {
            Ok(places) => places,
            Err(e) => {
                tracing::warn!("No {} recommendations for {}: {}", kind, destination, e);
                Vec::new()
            }
        };

        let mut names: Vec<String> = Vec::with_capacity(places.len());
        for place in places {
            if !place.name.trim().is_empty() && !names.contains(&place.name) {
                names.push(place.name);
            }
        }

        if names.is_empty() {
            vec![fallback.to_string()]
        } else {
            names
        }
    }
}

/// Lay out `day_count` days starting at `start`
pub fn plan_days<R: Rng + ?Sized>(
    start: NaiveDate,
    day_count: i64,
    attractions: &[String],
    restaurants: &[String],
    rng: &mut R,
) -> Vec<DayPlan> {
    (1..=day_count.max(0))
        .map(|day| {
            let date = start + Days::new((day - 1) as u64);
            let (morning, afternoon) = pick_pair(attractions, rng);
            let (lunch, dinner) = pick_pair(restaurants, rng);

            DayPlan {
                day,
                date,
                activity: format_day(day, date, morning, lunch, afternoon, dinner),
            }
        })
        .collect()
}

/// Two picks from `pool`, the second different from the first whenever the
/// pool has more than one entry
fn pick_pair<'a, R: Rng + ?Sized>(pool: &'a [String], rng: &mut R) -> (&'a str, &'a str) {
    let first = match pool.choose(rng) {
        Some(first) => first,
        None => return ("", ""),
    };

    let rest: Vec<&String> = pool.iter().filter(|p| *p != first).collect();
    let second = rest.choose(rng).copied().unwrap_or(first);

    (first.as_str(), second.as_str())
}

fn format_day(
    day: i64,
    date: NaiveDate,
    morning: &str,
    lunch: &str,
    afternoon: &str,
    dinner: &str,
) -> String {
    format!(
        "Day {} ({}):\nMorning: Visit {}\nLunch: Dine at {}\nAfternoon: Explore {}\nEvening: Dinner at {}",
        day,
        date.format("%Y-%m-%d"),
        morning,
        lunch,
        afternoon,
        dinner
    )
}
