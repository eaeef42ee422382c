//! Itinerary commands

use super::{current_trip, CommandResponse, Session};
use crate::app::AppState;
use crate::database::ItineraryEntry;
use crate::error::Result;

pub async fn generate_itinerary(
    state: &AppState,
    session: &Session,
) -> CommandResponse<Vec<ItineraryEntry>> {
    let result: Result<Vec<ItineraryEntry>> = async {
        let trip = current_trip(state, session).await?;
        state.itinerary_service.generate_itinerary(&trip.id).await
    }
    .await;

    CommandResponse::from_result("generate_itinerary", result, |_| {
        "Itinerary generated successfully".to_string()
    })
}

pub async fn get_itinerary(
    state: &AppState,
    session: &Session,
) -> CommandResponse<Vec<ItineraryEntry>> {
    let result: Result<Vec<ItineraryEntry>> = async {
        let trip = current_trip(state, session).await?;
        state.itinerary_service.get_itinerary(&trip.id).await
    }
    .await;

    CommandResponse::from_result("get_itinerary", result, |entries| {
        if entries.is_empty() {
            "No itinerary generated yet".to_string()
        } else {
            format!("{} day(s) planned", entries.len())
        }
    })
}
