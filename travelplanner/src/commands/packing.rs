//! Packing list commands

use super::{current_trip, owned_trip, CommandResponse, Session};
use crate::app::AppState;
use crate::database::{PackingCategory, PackingItem, PackingProgress};
use crate::error::{AppError, Result};

pub async fn generate_packing_list(
    state: &AppState,
    session: &Session,
) -> CommandResponse<Vec<PackingItem>> {
    let result: Result<(String, Vec<PackingItem>)> = async {
        let trip = current_trip(state, session).await?;
        let items = state.packing_service.generate_packing_list(&trip.id).await?;
        Ok((trip.destination, items))
    }
    .await;

    match result {
        Ok((destination, items)) => {
            let generated = items.iter().filter(|i| !i.custom).count();
            CommandResponse::ok(
                items,
                format!(
                    "Generated {} packing items for your trip to {}.",
                    generated, destination
                ),
            )
        }
        Err(e) => CommandResponse::from_result("generate_packing_list", Err(e), |_| String::new()),
    }
}

pub async fn list_packing_items(
    state: &AppState,
    session: &Session,
) -> CommandResponse<Vec<PackingItem>> {
    let result: Result<Vec<PackingItem>> = async {
        let trip = current_trip(state, session).await?;
        state.packing_service.list_items(&trip.id).await
    }
    .await;

    CommandResponse::from_result("list_packing_items", result, |items| {
        format!("{} item(s)", items.len())
    })
}

pub async fn add_packing_item(
    state: &AppState,
    session: &Session,
    item_name: &str,
    category: &str,
) -> CommandResponse<PackingItem> {
    let result: Result<PackingItem> = async {
        let category: PackingCategory = category
            .parse()
            .map_err(|e| AppError::validation(format!("{}", e)))?;
        let trip = current_trip(state, session).await?;
        state
            .packing_service
            .add_custom_item(&trip.id, item_name, category)
            .await
    }
    .await;

    CommandResponse::from_result("add_packing_item", result, |item| {
        format!("Added '{}' to your packing list.", item.item_name)
    })
}

pub async fn set_item_packed(
    state: &AppState,
    session: &Session,
    item_id: &str,
    packed: bool,
) -> CommandResponse<PackingItem> {
    let result: Result<PackingItem> = async {
        let item = state.packing_service.get_item(item_id).await?;
        owned_trip(state, session, &item.trip_id).await?;
        state.packing_service.set_packed(item_id, packed).await
    }
    .await;

    CommandResponse::from_result("set_item_packed", result, |item| {
        if item.packed {
            format!("Packed '{}'", item.item_name)
        } else {
            format!("Unpacked '{}'", item.item_name)
        }
    })
}

pub async fn delete_packing_item(
    state: &AppState,
    session: &Session,
    item_id: &str,
) -> CommandResponse<()> {
    let result: Result<()> = async {
        let item = state.packing_service.get_item(item_id).await?;
        owned_trip(state, session, &item.trip_id).await?;
        state.packing_service.delete_item(item_id).await
    }
    .await;

    CommandResponse::from_result("delete_packing_item", result, |_| {
        "Item removed from your packing list.".to_string()
    })
}

pub async fn packing_progress(
    state: &AppState,
    session: &Session,
) -> CommandResponse<PackingProgress> {
    let result: Result<PackingProgress> = async {
        let trip = current_trip(state, session).await?;
        state.packing_service.progress(&trip.id).await
    }
    .await;

    CommandResponse::from_result("packing_progress", result, |progress| {
        format!(
            "{} of {} items packed ({:.0}%)",
            progress.packed, progress.total, progress.percentage
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    #[tokio::test]
    async fn test_packing_flow() {
        let state = create_test_state().await;
        let session = create_session_with_trip(&state).await;

        let empty = packing_progress(&state, &session).await;
        assert_eq!(empty.message, "0 of 0 items packed (0%)");

        let generated = generate_packing_list(&state, &session).await;
        assert!(generated.success, "{}", generated.message);
        assert!(generated.message.starts_with("Generated 22 packing items"));

        let added = add_packing_item(&state, &session, "Travel Pillow", "accessories").await;
        assert_eq!(added.message, "Added 'Travel Pillow' to your packing list.");

        let item_id = added.data.unwrap().id;
        assert!(set_item_packed(&state, &session, &item_id, true).await.success);

        let progress = packing_progress(&state, &session).await.data.unwrap();
        assert_eq!(progress.total, 23);
        assert_eq!(progress.packed, 1);

        assert!(delete_packing_item(&state, &session, &item_id).await.success);
    }

    #[tokio::test]
    async fn test_missing_item_is_a_failure_result() {
        let state = create_test_state().await;
        let session = create_session_with_trip(&state).await;

        let response = delete_packing_item(&state, &session, "does-not-exist").await;
        assert!(!response.success);
        assert!(response.message.contains("not found"));
    }

    #[tokio::test]
    async fn test_unknown_category() {
        let state = create_test_state().await;
        let session = create_session_with_trip(&state).await;

        let response = add_packing_item(&state, &session, "Kite", "Toys").await;
        assert!(!response.success);
    }
}
