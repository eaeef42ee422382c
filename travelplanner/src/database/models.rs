//! Database models
//!
//! Rust structs representing database entities.
//! All models use serde so command responses can carry them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Registered account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A planned trip owned by one user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: String,
    pub user_id: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// Number of calendar days covered, both ends inclusive
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Create trip request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTripRequest {
    pub user_id: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
}

/// Update trip request; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTripRequest {
    pub id: String,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
}

/// One generated day of a trip itinerary
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ItineraryEntry {
    pub id: String,
    pub trip_id: String,
    /// 1-based offset from the trip start date
    pub day: i64,
    /// Newline-delimited activity plan
    pub activity: String,
    pub date: NaiveDate,
}

/// A planned day before it is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: i64,
    pub date: NaiveDate,
    pub activity: String,
}

/// Expense categories offered for budgeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum ExpenseCategory {
    Accommodation,
    Food,
    Transportation,
    Activities,
    Shopping,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Accommodation,
        ExpenseCategory::Food,
        ExpenseCategory::Transportation,
        ExpenseCategory::Activities,
        ExpenseCategory::Shopping,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Accommodation => "Accommodation",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Activities => "Activities",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Other => "Other",
        }
    }
}

/// A single spend recorded against a trip
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: String,
    pub trip_id: String,
    pub category: ExpenseCategory,
    pub amount: f64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Total spend for one expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: f64,
}

/// Budget position of a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub budget: f64,
    pub total_spent: f64,
    /// Negative when the trip is over budget
    pub remaining: f64,
}

/// Packing list categories
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
pub enum PackingCategory {
    Accessories,
    Clothing,
    Documents,
    Electronics,
    Entertainment,
    Health,
    Other,
    Toiletries,
}

impl PackingCategory {
    pub const ALL: [PackingCategory; 8] = [
        PackingCategory::Accessories,
        PackingCategory::Clothing,
        PackingCategory::Documents,
        PackingCategory::Electronics,
        PackingCategory::Entertainment,
        PackingCategory::Health,
        PackingCategory::Other,
        PackingCategory::Toiletries,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackingCategory::Accessories => "Accessories",
            PackingCategory::Clothing => "Clothing",
            PackingCategory::Documents => "Documents",
            PackingCategory::Electronics => "Electronics",
            PackingCategory::Entertainment => "Entertainment",
            PackingCategory::Health => "Health",
            PackingCategory::Toiletries => "Toiletries",
            PackingCategory::Other => "Other",
        }
    }
}

/// Error returned when parsing an unknown category name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for ExpenseCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl FromStr for PackingCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackingCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PackingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Packing list entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PackingItem {
    pub id: String,
    pub trip_id: String,
    pub item_name: String,
    pub category: PackingCategory,
    pub packed: bool,
    /// True for user-added items, false for rule-generated ones
    pub custom: bool,
}

/// An item proposed by the packing rules, before it is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingSuggestion {
    pub item_name: String,
    pub category: PackingCategory,
}

impl PackingSuggestion {
    pub fn new(item_name: &str, category: PackingCategory) -> Self {
        Self {
            item_name: item_name.to_string(),
            category,
        }
    }
}

/// Packing completion for a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingProgress {
    pub total: i64,
    pub packed: i64,
    /// 0..=100; zero for an empty list
    pub percentage: f64,
}

impl PackingProgress {
    pub fn new(total: i64, packed: i64) -> Self {
        let percentage = if total > 0 {
            packed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total,
            packed,
            percentage,
        }
    }
}

/// Travel journal entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TravelNote {
    pub id: String,
    pub trip_id: String,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub location: Option<String>,
    pub mood: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating or replacing a travel note
#[derive(Debug, Clone, Deserialize)]
pub struct TravelNoteInput {
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub location: Option<String>,
    pub mood: Option<String>,
}

/// Number of notes recorded with one mood
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MoodCount {
    pub mood: String,
    pub count: i64,
}

/// Photo metadata, without the image payload
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PhotoMeta {
    pub id: String,
    pub user_id: String,
    pub trip_id: String,
    pub filename: String,
    pub description: Option<String>,
    pub mime_type: String,
    pub size: i64,
    /// SHA-256 hash of the payload
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Photo including its payload
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TravelPhoto {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub meta: PhotoMeta,
    #[serde(skip_serializing)]
    pub file_data: Vec<u8>,
}

/// A validated upload ready to be stored
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub user_id: String,
    pub trip_id: String,
    pub filename: String,
    pub description: Option<String>,
    pub mime_type: String,
    pub content_hash: String,
    pub file_data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("Food".parse::<ExpenseCategory>(), Ok(ExpenseCategory::Food));
        assert_eq!(
            " transportation ".parse::<ExpenseCategory>(),
            Ok(ExpenseCategory::Transportation)
        );
        assert!("Souvenirs".parse::<ExpenseCategory>().is_err());
        assert_eq!(
            "toiletries".parse::<PackingCategory>(),
            Ok(PackingCategory::Toiletries)
        );
    }

    #[test]
    fn test_packing_categories_sorted_like_database() {
        let mut names: Vec<&str> = PackingCategory::ALL.iter().map(|c| c.as_str()).collect();
        let original = names.clone();
        names.sort();
        assert_eq!(names, original);
    }

    #[test]
    fn test_progress_percentage() {
        assert_eq!(PackingProgress::new(0, 0).percentage, 0.0);
        assert_eq!(PackingProgress::new(4, 1).percentage, 25.0);
        assert_eq!(PackingProgress::new(3, 3).percentage, 100.0);
    }

    #[test]
    fn test_trip_day_count() {
        let trip = Trip {
            id: "t".to_string(),
            user_id: "u".to_string(),
            destination: "London".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            budget: 1000.0,
            created_at: Utc::now(),
        };

        assert_eq!(trip.day_count(), 3);
    }
}
