use super::Repository;
use crate::database::executor::Statement;
use crate::database::models::{PackingCategory, PackingItem, PackingProgress, PackingSuggestion};
use crate::error::{AppError, Result};
use crate::validation;
use uuid::Uuid;

impl Repository {
    /// Swap the rule-generated part of a trip's packing list.
    ///
    /// Deletes every non-custom item and inserts `items` as fresh,
    /// unpacked, non-custom rows in one transaction. Custom items are
    /// untouched.
    pub async fn replace_generated_items(
        &self,
        trip_id: &str,
        items: &[PackingSuggestion],
    ) -> Result<Vec<PackingItem>> {
        let mut statements = Vec::with_capacity(items.len() + 1);
        statements.push(Statement::new(
            "DELETE FROM packing_items WHERE trip_id = ? AND custom = 0",
            vec![trip_id.into()],
        ));

        for item in items {
            statements.push(Statement::new(
                r#"
                INSERT INTO packing_items (id, trip_id, item_name, category, packed, custom)
                VALUES (?, ?, ?, ?, 0, 0)
                "#,
                vec![
                    Uuid::new_v4().to_string().into(),
                    trip_id.into(),
                    item.item_name.as_str().into(),
                    item.category.into(),
                ],
            ));
        }

        self.executor.execute_batch(&statements).await?;

        tracing::debug!(
            "Replaced generated packing items for trip: {} ({} items)",
            trip_id,
            items.len()
        );
        self.list_packing_items(trip_id).await
    }

    /// Add a single packing item
    pub async fn create_packing_item(
        &self,
        trip_id: &str,
        item_name: &str,
        category: PackingCategory,
        custom: bool,
    ) -> Result<PackingItem> {
        let item_name = validation::require_text("Item name", item_name)?;
        let id = Uuid::new_v4().to_string();

        let item = self
            .executor
            .execute_returning::<PackingItem>(
                r#"
                INSERT INTO packing_items (id, trip_id, item_name, category, packed, custom)
                VALUES (?, ?, ?, ?, 0, ?)
                RETURNING *
                "#,
                &[
                    id.as_str().into(),
                    trip_id.into(),
                    item_name.into(),
                    category.into(),
                    custom.into(),
                ],
            )
            .await?;

        tracing::debug!("Created packing item: {} for trip: {}", item.id, trip_id);
        Ok(item)
    }

    pub async fn get_packing_item(&self, id: &str) -> Result<PackingItem> {
        self.executor
            .fetch_optional::<PackingItem>("SELECT * FROM packing_items WHERE id = ?", &[id.into()])
            .await?
            .ok_or_else(|| AppError::not_found("Packing item", id))
    }

    /// Packing list for a trip, by category then name
    pub async fn list_packing_items(&self, trip_id: &str) -> Result<Vec<PackingItem>> {
        self.executor
            .fetch_all::<PackingItem>(
                r#"
                SELECT * FROM packing_items
                WHERE trip_id = ?
                ORDER BY category ASC, item_name ASC
                "#,
                &[trip_id.into()],
            )
            .await
    }

    pub async fn set_item_packed(&self, id: &str, packed: bool) -> Result<PackingItem> {
        let rows = self
            .executor
            .execute(
                "UPDATE packing_items SET packed = ? WHERE id = ?",
                &[packed.into(), id.into()],
            )
            .await?;

        if rows == 0 {
            return Err(AppError::not_found("Packing item", id));
        }

        self.get_packing_item(id).await
    }

    pub async fn delete_packing_item(&self, id: &str) -> Result<()> {
        let rows = self
            .executor
            .execute("DELETE FROM packing_items WHERE id = ?", &[id.into()])
            .await?;

        if rows == 0 {
            return Err(AppError::not_found("Packing item", id));
        }

        tracing::debug!("Deleted packing item: {}", id);
        Ok(())
    }

    pub async fn packing_progress(&self, trip_id: &str) -> Result<PackingProgress> {
        let (total, packed): (i64, i64) = self
            .executor
            .fetch_one(
                r#"
                SELECT COUNT(*), COALESCE(SUM(CASE WHEN packed THEN 1 ELSE 0 END), 0)
                FROM packing_items
                WHERE trip_id = ?
                "#,
                &[trip_id.into()],
            )
            .await?;

        Ok(PackingProgress::new(total, packed))
    }
}
