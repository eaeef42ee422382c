//! Commands exposed to the presentation layer
//!
//! All commands follow the pattern:
//! - Take AppState as first parameter, then the request's Session
//! - Never fail: every outcome is a `CommandResponse`
//! - Are async when performing I/O
//!
//! Submodules:
//! - `users`: registration, login and profile
//! - `trips`: trip CRUD and budget
//! - `itinerary`: itinerary generation
//! - `expenses`: expense tracking
//! - `packing`: packing list
//! - `journal`: travel notes
//! - `photos`: photo upload and export
//! - `recommendations`: weather, places and traffic

pub mod expenses;
pub mod itinerary;
pub mod journal;
pub mod packing;
pub mod photos;
pub mod recommendations;
pub mod trips;
pub mod users;

pub use expenses::*;
pub use itinerary::*;
pub use journal::*;
pub use packing::*;
pub use photos::*;
pub use recommendations::*;
pub use trips::*;
pub use users::*;

use crate::app::AppState;
use crate::database::Trip;
use crate::error::{AppError, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Outcome of a command: a success flag, an optional payload and a message
/// for the user
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

impl<T> CommandResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
        }
    }

    /// Fold a service result into a response, logging failures
    pub fn from_result(
        operation: &str,
        result: Result<T>,
        message: impl FnOnce(&T) -> String,
    ) -> Self {
        match result {
            Ok(data) => {
                let message = message(&data);
                Self::ok(data, message)
            }
            Err(e) => {
                tracing::warn!("{} failed ({:?}): {}", operation, e.kind(), e);
                Self::failure(e.to_string())
            }
        }
    }
}

/// Request-scoped context: who is asking, and which trip they are working on
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user_id: Option<String>,
    pub current_trip_id: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            current_trip_id: None,
        }
    }

    pub fn with_trip(mut self, trip_id: impl Into<String>) -> Self {
        self.current_trip_id = Some(trip_id.into());
        self
    }

    pub fn require_user(&self) -> Result<&str> {
        self.user_id
            .as_deref()
            .ok_or_else(|| AppError::validation("Please log in first"))
    }

    pub fn require_trip(&self) -> Result<&str> {
        self.current_trip_id
            .as_deref()
            .ok_or_else(|| AppError::validation("No trip selected"))
    }
}

/// Parse a `YYYY-MM-DD` form value
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::validation(format!("{} must be a date like 2025-06-01, got '{}'", field, value))
    })
}

/// The session's current trip, if it belongs to the session's user
pub(crate) async fn current_trip(state: &AppState, session: &Session) -> Result<Trip> {
    let trip_id = session.require_trip()?;
    owned_trip(state, session, trip_id).await
}

/// A trip by id, if it belongs to the session's user
pub(crate) async fn owned_trip(state: &AppState, session: &Session, trip_id: &str) -> Result<Trip> {
    let user_id = session.require_user()?;
    state.trips_service.get_owned_trip(user_id, trip_id).await
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok = CommandResponse::from_result("op", Ok(3), |n| format!("got {}", n));
        assert!(ok.success);
        assert_eq!(ok.data, Some(3));
        assert_eq!(ok.message, "got 3");

        let failed: CommandResponse<i32> =
            CommandResponse::from_result("op", Err(AppError::not_found("Trip", "t1")), |_| {
                unreachable!()
            });
        assert!(!failed.success);
        assert!(failed.data.is_none());
        assert_eq!(failed.message, "Trip not found: t1");
    }

    #[test]
    fn test_response_serializes_as_triple() {
        let response = CommandResponse::ok(vec![1, 2], "done");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"success": true, "data": [1, 2], "message": "done"})
        );
    }

    #[test]
    fn test_session_requirements() {
        let session = Session::anonymous();
        assert!(session.require_user().is_err());
        assert!(session.require_trip().is_err());

        let session = Session::for_user("u1").with_trip("t1");
        assert_eq!(session.require_user().unwrap(), "u1");
        assert_eq!(session.require_trip().unwrap(), "t1");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("Start date", " 2025-06-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        assert!(parse_date("Start date", "01/06/2025").is_err());
        assert!(parse_date("Start date", "2025-02-30").is_err());
    }
}
