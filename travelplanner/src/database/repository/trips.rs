use super::Repository;
use crate::database::executor::Statement;
use crate::database::models::{CreateTripRequest, Trip, UpdateTripRequest};
use crate::error::{AppError, Result};
use crate::validation;
use chrono::Utc;
use uuid::Uuid;

impl Repository {
    /// Create a new trip
    pub async fn create_trip(&self, req: CreateTripRequest) -> Result<Trip> {
        let destination = validation::require_text("Destination", &req.destination)?;
        validation::require_date_range(req.start_date, req.end_date)?;
        validation::require_budget(req.budget)?;

        let id = Uuid::new_v4().to_string();

        let trip = self
            .executor
            .execute_returning::<Trip>(
                r#"
                INSERT INTO trips (id, user_id, destination, start_date, end_date, budget, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                RETURNING *
                "#,
                &[
                    id.as_str().into(),
                    req.user_id.as_str().into(),
                    destination.into(),
                    req.start_date.into(),
                    req.end_date.into(),
                    req.budget.into(),
                    Utc::now().into(),
                ],
            )
            .await?;

        tracing::debug!("Created trip: {} for user: {}", trip.id, trip.user_id);
        Ok(trip)
    }

    /// Get a trip by ID
    pub async fn get_trip(&self, id: &str) -> Result<Trip> {
        self.executor
            .fetch_optional::<Trip>("SELECT * FROM trips WHERE id = ?", &[id.into()])
            .await?
            .ok_or_else(|| AppError::not_found("Trip", id))
    }

    /// List a user's trips, latest start date first
    pub async fn list_user_trips(&self, user_id: &str) -> Result<Vec<Trip>> {
        self.executor
            .fetch_all::<Trip>(
                r#"
                SELECT * FROM trips
                WHERE user_id = ?
                ORDER BY start_date DESC, created_at DESC
                "#,
                &[user_id.into()],
            )
            .await
    }

    /// Update a trip; the merged date range must still be valid
    pub async fn update_trip(&self, req: UpdateTripRequest) -> Result<Trip> {
        let current = self.get_trip(&req.id).await?;

        let destination = match &req.destination {
            Some(d) => validation::require_text("Destination", d)?,
            None => current.destination,
        };
        let start_date = req.start_date.unwrap_or(current.start_date);
        let end_date = req.end_date.unwrap_or(current.end_date);
        let budget = req.budget.unwrap_or(current.budget);

        validation::require_date_range(start_date, end_date)?;
        validation::require_budget(budget)?;

        let update = Statement::new(
            r#"
            UPDATE trips
            SET destination = ?, start_date = ?, end_date = ?, budget = ?
            WHERE id = ?
            "#,
            vec![
                destination.into(),
                start_date.into(),
                end_date.into(),
                budget.into(),
                req.id.as_str().into(),
            ],
        );

        // A stored itinerary is laid out over the old dates
        let dates_changed = start_date != current.start_date || end_date != current.end_date;
        if dates_changed {
            self.executor
                .execute_batch(&[
                    update,
                    Statement::new(
                        "DELETE FROM itineraries WHERE trip_id = ?",
                        vec![req.id.as_str().into()],
                    ),
                ])
                .await?;
            tracing::info!("Trip {} dates changed, itinerary cleared", req.id);
        } else {
            let rows = self.executor.execute(&update.sql, &update.params).await?;
            if rows == 0 {
                return Err(AppError::not_found("Trip", &req.id));
            }
        }

        tracing::debug!("Updated trip: {}", req.id);
        self.get_trip(&req.id).await
    }

    /// Delete a trip together with its itinerary, expenses, packing list,
    /// notes and photos
    pub async fn delete_trip(&self, id: &str) -> Result<()> {
        let rows = self
            .executor
            .execute("DELETE FROM trips WHERE id = ?", &[id.into()])
            .await?;

        if rows == 0 {
            return Err(AppError::not_found("Trip", id));
        }

        tracing::debug!("Deleted trip: {}", id);
        Ok(())
    }
}
