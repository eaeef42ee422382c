//! Trip commands

use super::{current_trip, parse_date, CommandResponse, Session};
use crate::app::AppState;
use crate::database::{BudgetStatus, CreateTripRequest, Trip, UpdateTripRequest};
use crate::error::Result;

pub async fn create_trip(
    state: &AppState,
    session: &Session,
    destination: &str,
    start_date: &str,
    end_date: &str,
    budget: f64,
) -> CommandResponse<Trip> {
    let result: Result<Trip> = async {
        let req = CreateTripRequest {
            user_id: session.require_user()?.to_string(),
            destination: destination.to_string(),
            start_date: parse_date("Start date", start_date)?,
            end_date: parse_date("End date", end_date)?,
            budget,
        };
        state.trips_service.create_trip(req).await
    }
    .await;

    CommandResponse::from_result("create_trip", result, |trip| {
        format!("Trip to {} created successfully!", trip.destination)
    })
}

pub async fn list_trips(state: &AppState, session: &Session) -> CommandResponse<Vec<Trip>> {
    let result = match session.require_user() {
        Ok(user_id) => state.trips_service.list_user_trips(user_id).await,
        Err(e) => Err(e),
    };
    CommandResponse::from_result("list_trips", result, |trips| {
        format!("{} trip(s)", trips.len())
    })
}

pub async fn get_trip(state: &AppState, session: &Session) -> CommandResponse<Trip> {
    let result = current_trip(state, session).await;
    CommandResponse::from_result("get_trip", result, |_| String::new())
}

pub async fn update_trip(
    state: &AppState,
    session: &Session,
    destination: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
    budget: Option<f64>,
) -> CommandResponse<Trip> {
    let result: Result<Trip> = async {
        let trip = current_trip(state, session).await?;
        let req = UpdateTripRequest {
            id: trip.id,
            destination: destination.map(str::to_string),
            start_date: start_date.map(|d| parse_date("Start date", d)).transpose()?,
            end_date: end_date.map(|d| parse_date("End date", d)).transpose()?,
            budget,
        };
        state.trips_service.update_trip(req).await
    }
    .await;

    CommandResponse::from_result("update_trip", result, |_| {
        "Trip updated successfully".to_string()
    })
}

pub async fn delete_trip(state: &AppState, session: &Session) -> CommandResponse<()> {
    let result: Result<()> = async {
        let trip = current_trip(state, session).await?;
        state.trips_service.delete_trip(&trip.id).await
    }
    .await;

    CommandResponse::from_result("delete_trip", result, |_| {
        "Trip deleted successfully".to_string()
    })
}

pub async fn budget_status(state: &AppState, session: &Session) -> CommandResponse<BudgetStatus> {
    let result: Result<BudgetStatus> = async {
        let trip = current_trip(state, session).await?;
        state.trips_service.budget_status(&trip.id).await
    }
    .await;

    CommandResponse::from_result("budget_status", result, |status| {
        if status.remaining < 0.0 {
            format!("Over budget by {:.2}", -status.remaining)
        } else {
            format!("{:.2} remaining", status.remaining)
        }
    })
}
