//! Repository layer for database operations
//!
//! One `Repository` exposes CRUD operations for every entity; each entity's
//! operations live in their own submodule. All statements go through the
//! [`Executor`] with bound parameters, and every write runs in a transaction.

mod expenses;
mod itineraries;
mod notes;
mod packing;
mod photos;
mod trips;
mod users;

use super::executor::Executor;
use sqlx::SqlitePool;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    executor: Executor,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            executor: Executor::new(pool),
        }
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Repository;
    use crate::database::{create_memory_pool, CreateTripRequest, Trip, User};
    use chrono::NaiveDate;

    pub async fn create_test_repo() -> Repository {
        Repository::new(create_memory_pool().await.unwrap())
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub async fn create_test_user(repo: &Repository, email: &str) -> User {
        repo.create_user("Test User", email, "hash").await.unwrap()
    }

    pub async fn create_test_trip(repo: &Repository, user_id: &str, destination: &str) -> Trip {
        repo.create_trip(CreateTripRequest {
            user_id: user_id.to_string(),
            destination: destination.to_string(),
            start_date: date(2025, 6, 1),
            end_date: date(2025, 6, 3),
            budget: 1000.0,
        })
        .await
        .unwrap()
    }
}
