//! Trips service
//!
//! Trip lifecycle plus the expenses and budget tracked against a trip.

use crate::database::{
    BudgetStatus, CategoryTotal, CreateTripRequest, Expense, ExpenseCategory, Repository, Trip,
    UpdateTripRequest,
};
use crate::error::{AppError, Result};
use chrono::NaiveDate;

/// Service for trips and their expenses
#[derive(Clone)]
pub struct TripsService {
    repo: Repository,
}

impl TripsService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    pub async fn create_trip(&self, req: CreateTripRequest) -> Result<Trip> {
        tracing::info!("Creating trip to {} for user {}", req.destination, req.user_id);

        let trip = self.repo.create_trip(req).await?;

        tracing::info!("Trip created: {} ({} days)", trip.id, trip.day_count());
        Ok(trip)
    }

    pub async fn get_trip(&self, id: &str) -> Result<Trip> {
        self.repo.get_trip(id).await
    }

    /// A trip, visible only to the user who owns it
    pub async fn get_owned_trip(&self, user_id: &str, id: &str) -> Result<Trip> {
        let trip = self.repo.get_trip(id).await?;

        if trip.user_id != user_id {
            return Err(AppError::not_found("Trip", id));
        }

        Ok(trip)
    }

    pub async fn list_user_trips(&self, user_id: &str) -> Result<Vec<Trip>> {
        self.repo.list_user_trips(user_id).await
    }

    pub async fn update_trip(&self, req: UpdateTripRequest) -> Result<Trip> {
        tracing::debug!("Updating trip: {}", req.id);
        self.repo.update_trip(req).await
    }

    pub async fn delete_trip(&self, id: &str) -> Result<()> {
        tracing::info!("Deleting trip: {}", id);

        self.repo.delete_trip(id).await?;

        tracing::info!("Trip deleted: {}", id);
        Ok(())
    }

    /// Record an expense; the trip must exist
    pub async fn add_expense(
        &self,
        trip_id: &str,
        category: ExpenseCategory,
        amount: f64,
        date: NaiveDate,
    ) -> Result<Expense> {
        self.repo.get_trip(trip_id).await?;

        let expense = self.repo.create_expense(trip_id, category, amount, date).await?;

        tracing::info!(
            "Expense added to trip {}: {} {:.2}",
            trip_id,
            category,
            amount
        );
        Ok(expense)
    }

    pub async fn get_expense(&self, id: &str) -> Result<Expense> {
        self.repo.get_expense(id).await
    }

    pub async fn list_expenses(&self, trip_id: &str) -> Result<Vec<Expense>> {
        self.repo.list_trip_expenses(trip_id).await
    }

    pub async fn update_expense(
        &self,
        id: &str,
        category: ExpenseCategory,
        amount: f64,
        date: NaiveDate,
    ) -> Result<Expense> {
        self.repo.update_expense(id, category, amount, date).await
    }

    pub async fn delete_expense(&self, id: &str) -> Result<()> {
        self.repo.delete_expense(id).await
    }

    pub async fn expense_summary(&self, trip_id: &str) -> Result<Vec<CategoryTotal>> {
        self.repo.expense_summary(trip_id).await
    }

    /// Budget, spend to date and what is left
    pub async fn budget_status(&self, trip_id: &str) -> Result<BudgetStatus> {
        let trip = self.repo.get_trip(trip_id).await?;
        let total_spent = self.repo.total_spent(trip_id).await?;

        Ok(BudgetStatus {
            budget: trip.budget,
            total_spent,
            remaining: trip.budget - total_spent,
        })
    }
}
