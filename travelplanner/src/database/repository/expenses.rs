use super::Repository;
use crate::database::models::{CategoryTotal, Expense, ExpenseCategory};
use crate::error::{AppError, Result};
use crate::validation;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

impl Repository {
    /// Record an expense against a trip
    pub async fn create_expense(
        &self,
        trip_id: &str,
        category: ExpenseCategory,
        amount: f64,
        date: NaiveDate,
    ) -> Result<Expense> {
        validation::require_amount(amount)?;

        let id = Uuid::new_v4().to_string();

        let expense = self
            .executor
            .execute_returning::<Expense>(
                r#"
                INSERT INTO expenses (id, trip_id, category, amount, date, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                RETURNING *
                "#,
                &[
                    id.as_str().into(),
                    trip_id.into(),
                    category.into(),
                    amount.into(),
                    date.into(),
                    Utc::now().into(),
                ],
            )
            .await?;

        tracing::debug!("Created expense: {} for trip: {}", expense.id, trip_id);
        Ok(expense)
    }

    pub async fn get_expense(&self, id: &str) -> Result<Expense> {
        self.executor
            .fetch_optional::<Expense>("SELECT * FROM expenses WHERE id = ?", &[id.into()])
            .await?
            .ok_or_else(|| AppError::not_found("Expense", id))
    }

    /// Expenses for a trip, oldest first
    pub async fn list_trip_expenses(&self, trip_id: &str) -> Result<Vec<Expense>> {
        self.executor
            .fetch_all::<Expense>(
                r#"
                SELECT * FROM expenses
                WHERE trip_id = ?
                ORDER BY date ASC, created_at ASC
                "#,
                &[trip_id.into()],
            )
            .await
    }

    /// Replace an expense's category, amount and date
    pub async fn update_expense(
        &self,
        id: &str,
        category: ExpenseCategory,
        amount: f64,
        date: NaiveDate,
    ) -> Result<Expense> {
        validation::require_amount(amount)?;

        let rows = self
            .executor
            .execute(
                "UPDATE expenses SET category = ?, amount = ?, date = ? WHERE id = ?",
                &[category.into(), amount.into(), date.into(), id.into()],
            )
            .await?;

        if rows == 0 {
            return Err(AppError::not_found("Expense", id));
        }

        tracing::debug!("Updated expense: {}", id);
        self.get_expense(id).await
    }

    pub async fn delete_expense(&self, id: &str) -> Result<()> {
        let rows = self
            .executor
            .execute("DELETE FROM expenses WHERE id = ?", &[id.into()])
            .await?;

        if rows == 0 {
            return Err(AppError::not_found("Expense", id));
        }

        tracing::debug!("Deleted expense: {}", id);
        Ok(())
    }

    /// Spend per category, largest first
    pub async fn expense_summary(&self, trip_id: &str) -> Result<Vec<CategoryTotal>> {
        self.executor
            .fetch_all::<CategoryTotal>(
                r#"
                SELECT category, SUM(amount) AS total
                FROM expenses
                WHERE trip_id = ?
                GROUP BY category
                ORDER BY total DESC, category ASC
                "#,
                &[trip_id.into()],
            )
            .await
    }

    pub async fn total_spent(&self, trip_id: &str) -> Result<f64> {
        let (total,): (f64,) = self
            .executor
            .fetch_one(
                "SELECT CAST(COALESCE(SUM(amount), 0) AS REAL) FROM expenses WHERE trip_id = ?",
                &[trip_id.into()],
            )
            .await?;

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::database::ExpenseCategory;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_summary_groups_by_category() {
        let repo = create_test_repo().await;
        let user = create_test_user(&repo, "e@example.com").await;
        let trip = create_test_trip(&repo, &user.id, "London").await;

        let entries = [
            (ExpenseCategory::Accommodation, 500.0),
            (ExpenseCategory::Food, 200.0),
            (ExpenseCategory::Transportation, 150.0),
            (ExpenseCategory::Food, 25.5),
        ];
        for (category, amount) in entries {
            repo.create_expense(&trip.id, category, amount, date(2025, 6, 1))
                .await
                .unwrap();
        }

        let summary = repo.expense_summary(&trip.id).await.unwrap();
        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].category, ExpenseCategory::Accommodation);

        let food = summary
            .iter()
            .find(|row| row.category == ExpenseCategory::Food)
            .unwrap();
        assert_eq!(food.total, 225.5);

        assert_eq!(repo.total_spent(&trip.id).await.unwrap(), 875.5);
    }

    #[tokio::test]
    async fn test_total_spent_without_expenses() {
        let repo = create_test_repo().await;
        let user = create_test_user(&repo, "e@example.com").await;
        let trip = create_test_trip(&repo, &user.id, "London").await;

        assert_eq!(repo.total_spent(&trip.id).await.unwrap(), 0.0);
        assert!(repo.expense_summary(&trip.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_ordered_by_date() {
        let repo = create_test_repo().await;
        let user = create_test_user(&repo, "e@example.com").await;
        let trip = create_test_trip(&repo, &user.id, "London").await;

        repo.create_expense(&trip.id, ExpenseCategory::Food, 10.0, date(2025, 6, 3))
            .await
            .unwrap();
        repo.create_expense(&trip.id, ExpenseCategory::Food, 20.0, date(2025, 6, 1))
            .await
            .unwrap();

        let expenses = repo.list_trip_expenses(&trip.id).await.unwrap();
        assert_eq!(expenses[0].date, date(2025, 6, 1));
        assert_eq!(expenses[1].date, date(2025, 6, 3));
    }

    #[tokio::test]
    async fn test_update_and_delete_expense() {
        let repo = create_test_repo().await;
        let user = create_test_user(&repo, "e@example.com").await;
        let trip = create_test_trip(&repo, &user.id, "London").await;

        let expense = repo
            .create_expense(&trip.id, ExpenseCategory::Other, 5.0, date(2025, 6, 2))
            .await
            .unwrap();

        let updated = repo
            .update_expense(&expense.id, ExpenseCategory::Shopping, 7.5, date(2025, 6, 2))
            .await
            .unwrap();
        assert_eq!(updated.category, ExpenseCategory::Shopping);
        assert_eq!(updated.amount, 7.5);

        repo.delete_expense(&expense.id).await.unwrap();
        assert_eq!(
            repo.delete_expense(&expense.id).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let repo = create_test_repo().await;
        let user = create_test_user(&repo, "e@example.com").await;
        let trip = create_test_trip(&repo, &user.id, "London").await;

        let err = repo
            .create_expense(&trip.id, ExpenseCategory::Food, -3.0, date(2025, 6, 1))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    }
}
