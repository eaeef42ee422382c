use super::Repository;
use crate::database::executor::Statement;
use crate::database::models::{DayPlan, ItineraryEntry};
use crate::error::{AppError, Result};
use uuid::Uuid;

impl Repository {
    /// Replace a trip's whole itinerary.
    ///
    /// Existing entries are deleted and the new days inserted in a single
    /// transaction. Days must be numbered 1..=n in order.
    pub async fn replace_itinerary(
        &self,
        trip_id: &str,
        days: &[DayPlan],
    ) -> Result<Vec<ItineraryEntry>> {
        for (index, plan) in days.iter().enumerate() {
            if plan.day != index as i64 + 1 {
                return Err(AppError::validation(format!(
                    "Itinerary day {} out of sequence at position {}",
                    plan.day,
                    index + 1
                )));
            }
        }

        let mut statements = Vec::with_capacity(days.len() + 1);
        statements.push(Statement::new(
            "DELETE FROM itineraries WHERE trip_id = ?",
            vec![trip_id.into()],
        ));

        for plan in days {
            statements.push(Statement::new(
                "INSERT INTO itineraries (id, trip_id, day, activity, date) VALUES (?, ?, ?, ?, ?)",
                vec![
                    Uuid::new_v4().to_string().into(),
                    trip_id.into(),
                    plan.day.into(),
                    plan.activity.as_str().into(),
                    plan.date.into(),
                ],
            ));
        }

        self.executor.execute_batch(&statements).await?;

        tracing::debug!("Replaced itinerary for trip: {} ({} days)", trip_id, days.len());
        self.list_itinerary(trip_id).await
    }

    /// Itinerary entries for a trip, by day
    pub async fn list_itinerary(&self, trip_id: &str) -> Result<Vec<ItineraryEntry>> {
        self.executor
            .fetch_all::<ItineraryEntry>(
                "SELECT * FROM itineraries WHERE trip_id = ? ORDER BY day ASC",
                &[trip_id.into()],
            )
            .await
    }
}
