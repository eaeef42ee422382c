//! Expense commands

use super::{current_trip, owned_trip, parse_date, CommandResponse, Session};
use crate::app::AppState;
use crate::database::{CategoryTotal, Expense, ExpenseCategory};
use crate::error::{AppError, Result};

fn parse_category(value: &str) -> Result<ExpenseCategory> {
    value.parse().map_err(|_| {
        AppError::validation(format!(
            "Unknown expense category '{}'; expected one of: {}",
            value,
            ExpenseCategory::ALL
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })
}

pub async fn add_expense(
    state: &AppState,
    session: &Session,
    category: &str,
    amount: f64,
    date: &str,
) -> CommandResponse<Expense> {
    let result: Result<Expense> = async {
        let category = parse_category(category)?;
        let date = parse_date("Date", date)?;
        let trip = current_trip(state, session).await?;
        state
            .trips_service
            .add_expense(&trip.id, category, amount, date)
            .await
    }
    .await;

    CommandResponse::from_result("add_expense", result, |_| {
        "Expense added successfully".to_string()
    })
}

pub async fn list_expenses(state: &AppState, session: &Session) -> CommandResponse<Vec<Expense>> {
    let result: Result<Vec<Expense>> = async {
        let trip = current_trip(state, session).await?;
        state.trips_service.list_expenses(&trip.id).await
    }
    .await;

    CommandResponse::from_result("list_expenses", result, |expenses| {
        format!("{} expense(s)", expenses.len())
    })
}

pub async fn expense_summary(
    state: &AppState,
    session: &Session,
) -> CommandResponse<Vec<CategoryTotal>> {
    let result: Result<Vec<CategoryTotal>> = async {
        let trip = current_trip(state, session).await?;
        state.trips_service.expense_summary(&trip.id).await
    }
    .await;

    CommandResponse::from_result("expense_summary", result, |summary| {
        let total: f64 = summary.iter().map(|row| row.total).sum();
        format!("Total spent: {:.2}", total)
    })
}

pub async fn update_expense(
    state: &AppState,
    session: &Session,
    expense_id: &str,
    category: &str,
    amount: f64,
    date: &str,
) -> CommandResponse<Expense> {
    let result: Result<Expense> = async {
        let category = parse_category(category)?;
        let date = parse_date("Date", date)?;
        let expense = state.trips_service.get_expense(expense_id).await?;
        owned_trip(state, session, &expense.trip_id).await?;
        state
            .trips_service
            .update_expense(expense_id, category, amount, date)
            .await
    }
    .await;

    CommandResponse::from_result("update_expense", result, |_| {
        "Expense updated successfully".to_string()
    })
}

pub async fn delete_expense(
    state: &AppState,
    session: &Session,
    expense_id: &str,
) -> CommandResponse<()> {
    let result: Result<()> = async {
        let expense = state.trips_service.get_expense(expense_id).await?;
        owned_trip(state, session, &expense.trip_id).await?;
        state.trips_service.delete_expense(expense_id).await
    }
    .await;

    CommandResponse::from_result("delete_expense", result, |_| {
        "Expense deleted successfully".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    #[tokio::test]
    async fn test_expense_flow() {
        let state = create_test_state().await;
        let session = create_session_with_trip(&state).await;

        let added = add_expense(&state, &session, "food", 200.0, "2025-06-01").await;
        assert!(added.success, "{}", added.message);

        let summary = expense_summary(&state, &session).await;
        let rows = summary.data.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, ExpenseCategory::Food);
        assert_eq!(rows[0].total, 200.0);

        let expense_id = added.data.unwrap().id;
        let updated = update_expense(&state, &session, &expense_id, "Shopping", 50.0, "2025-06-02").await;
        assert_eq!(updated.data.unwrap().amount, 50.0);

        assert!(delete_expense(&state, &session, &expense_id).await.success);
        assert!(!delete_expense(&state, &session, &expense_id).await.success);
    }

    #[tokio::test]
    async fn test_unknown_category_and_bad_amount() {
        let state = create_test_state().await;
        let session = create_session_with_trip(&state).await;

        let response = add_expense(&state, &session, "Gambling", 10.0, "2025-06-01").await;
        assert!(!response.success);
        assert!(response.message.contains("Accommodation"));

        let response = add_expense(&state, &session, "Food", 0.0, "2025-06-01").await;
        assert!(!response.success);
    }
}
