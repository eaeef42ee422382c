//! Query executor
//!
//! Runs SQL statements with bound parameters against the pool.
//! Writes always run inside a transaction that commits only when the
//! statement succeeds; an uncommitted transaction rolls back when it is
//! dropped, so every early return releases the connection cleanly.
//!
//! Two layers are exposed:
//! - `execute_write` / `execute_read`: untyped, never fail (failures are
//!   logged and reported as `false` / an empty row set)
//! - `execute`, `execute_returning`, `execute_batch`, `fetch_*`: typed,
//!   return `Result` so repositories can report why something failed

use crate::database::models::{ExpenseCategory, PackingCategory};
use crate::error::{AppError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{Column, FromRow, Row, SqlitePool, Transaction, TypeInfo, ValueRef};

/// A result row keyed by column name
pub type RowMap = serde_json::Map<String, Value>;

/// A bindable statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Bool(bool),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Integer(v as i64)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<&String> for SqlValue {
    fn from(v: &String) -> Self {
        SqlValue::Text(v.clone())
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Blob(v)
    }
}

impl From<&[u8]> for SqlValue {
    fn from(v: &[u8]) -> Self {
        SqlValue::Blob(v.to_vec())
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(v)
    }
}

impl From<ExpenseCategory> for SqlValue {
    fn from(v: ExpenseCategory) -> Self {
        SqlValue::Text(v.as_str().to_string())
    }
}

impl From<PackingCategory> for SqlValue {
    fn from(v: PackingCategory) -> Self {
        SqlValue::Text(v.as_str().to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// One statement of a multi-statement transaction
#[derive(Debug, Clone)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

macro_rules! bind_params {
    ($query:expr, $params:expr) => {{
        let mut query = $query;
        for param in $params {
            query = match param {
                SqlValue::Null => query.bind(None::<String>),
                SqlValue::Integer(v) => query.bind(*v),
                SqlValue::Real(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.as_str()),
                SqlValue::Blob(v) => query.bind(v.as_slice()),
                SqlValue::Bool(v) => query.bind(*v),
                SqlValue::Date(v) => query.bind(*v),
                SqlValue::Timestamp(v) => query.bind(*v),
            };
        }
        query
    }};
}

/// Executes bound statements against a SQLite pool
#[derive(Clone)]
pub struct Executor {
    pool: SqlitePool,
}

impl Executor {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::Connection(e.to_string()))
    }

    /// Run a write statement; `true` only if it committed
    pub async fn execute_write(&self, sql: &str, params: &[SqlValue]) -> bool {
        match self.execute(sql, params).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Write statement failed and was rolled back: {}", e);
                false
            }
        }
    }

    /// Run a read statement and return rows keyed by column name.
    ///
    /// Returns an empty vector when nothing matches or the query fails.
    pub async fn execute_read(&self, sql: &str, params: &[SqlValue]) -> Vec<RowMap> {
        let rows = bind_params!(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await;

        match rows {
            Ok(rows) => rows.iter().map(row_to_map).collect(),
            Err(e) => {
                tracing::warn!("Read statement failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Run a write statement in its own transaction, returning rows affected
    pub async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        let mut tx = self.begin().await?;

        let result = bind_params!(sqlx::query(sql), params)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected())
    }

    /// Run an `INSERT ... RETURNING` (or `UPDATE ... RETURNING`) statement
    pub async fn execute_returning<T>(&self, sql: &str, params: &[SqlValue]) -> Result<T>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let mut tx = self.begin().await?;

        let row = bind_params!(sqlx::query_as::<_, T>(sql), params)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row)
    }

    /// Run several statements atomically, returning total rows affected
    pub async fn execute_batch(&self, statements: &[Statement]) -> Result<u64> {
        let mut tx = self.begin().await?;
        let mut affected = 0;

        for statement in statements {
            affected += bind_params!(sqlx::query(&statement.sql), &statement.params)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;

        Ok(affected)
    }

    pub async fn fetch_all<T>(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let rows = bind_params!(sqlx::query_as::<_, T>(sql), params)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn fetch_optional<T>(&self, sql: &str, params: &[SqlValue]) -> Result<Option<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let row = bind_params!(sqlx::query_as::<_, T>(sql), params)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn fetch_one<T>(&self, sql: &str, params: &[SqlValue]) -> Result<T>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let row = bind_params!(sqlx::query_as::<_, T>(sql), params)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }
}

fn row_to_map(row: &SqliteRow) -> RowMap {
    row.columns()
        .iter()
        .map(|column| {
            (
                column.name().to_string(),
                decode_column(row, column.ordinal()),
            )
        })
        .collect()
}

fn decode_column(row: &SqliteRow, index: usize) -> Value {
    let type_name = match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_string(),
        Err(_) => return Value::Null,
    };

    let decoded = match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => row.try_get_unchecked::<i64, _>(index).map(Value::from),
        "REAL" | "NUMERIC" => row.try_get_unchecked::<f64, _>(index).map(Value::from),
        "BLOB" => row.try_get_unchecked::<Vec<u8>, _>(index).map(Value::from),
        _ => row.try_get_unchecked::<String, _>(index).map(Value::from),
    };

    decoded.unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_memory_pool;

    async fn create_test_executor() -> Executor {
        Executor::new(create_memory_pool().await.unwrap())
    }

    async fn insert_user(executor: &Executor, id: &str, name: &str, email: &str) -> bool {
        executor
            .execute_write(
                "INSERT INTO users (id, name, email, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
                &[
                    id.into(),
                    name.into(),
                    email.into(),
                    "hash".into(),
                    Utc::now().into(),
                ],
            )
            .await
    }

    #[tokio::test]
    async fn test_write_then_read_rows() {
        let executor = create_test_executor().await;

        assert!(insert_user(&executor, "u1", "Alice", "alice@example.com").await);

        let rows = executor
            .execute_read(
                "SELECT id, name, email FROM users WHERE email = ?",
                &["alice@example.com".into()],
            )
            .await;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "u1");
        assert_eq!(rows[0]["name"], "Alice");
    }

    #[tokio::test]
    async fn test_read_without_matches_is_empty() {
        let executor = create_test_executor().await;

        let rows = executor
            .execute_read("SELECT * FROM users WHERE id = ?", &["missing".into()])
            .await;

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_failed_read_is_empty() {
        let executor = create_test_executor().await;

        let rows = executor.execute_read("SELECT * FROM no_such_table", &[]).await;

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_reports_false() {
        let executor = create_test_executor().await;

        assert!(insert_user(&executor, "u1", "Alice", "same@example.com").await);
        assert!(!insert_user(&executor, "u2", "Bob", "same@example.com").await);

        let rows = executor.execute_read("SELECT id FROM users", &[]).await;
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_parameters_are_never_interpolated() {
        let executor = create_test_executor().await;
        let hostile = "Robert'); DROP TABLE users;--";

        assert!(insert_user(&executor, "u1", hostile, "bobby@example.com").await);

        let rows = executor
            .execute_read("SELECT name FROM users WHERE id = ?", &["u1".into()])
            .await;
        assert_eq!(rows[0]["name"], hostile);
    }

    #[tokio::test]
    async fn test_value_types_in_row_map() {
        let executor = create_test_executor().await;

        let rows = executor
            .execute_read(
                "SELECT ? AS i, ? AS r, ? AS t, ? AS b, ? AS n",
                &[
                    SqlValue::Integer(7),
                    SqlValue::Real(2.5),
                    "text".into(),
                    SqlValue::Blob(vec![1, 2]),
                    SqlValue::Null,
                ],
            )
            .await;

        let row = &rows[0];
        assert_eq!(row["i"], 7);
        assert_eq!(row["r"], 2.5);
        assert_eq!(row["t"], "text");
        assert_eq!(row["b"], serde_json::json!([1, 2]));
        assert!(row["n"].is_null());
    }

    #[tokio::test]
    async fn test_batch_rolls_back_on_failure() {
        let executor = create_test_executor().await;

        let statements = vec![
            Statement::new(
                "INSERT INTO users (id, name, email, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
                vec![
                    "u1".into(),
                    "Alice".into(),
                    "alice@example.com".into(),
                    "hash".into(),
                    Utc::now().into(),
                ],
            ),
            Statement::new("INSERT INTO no_such_table (x) VALUES (?)", vec![1i64.into()]),
        ];

        assert!(executor.execute_batch(&statements).await.is_err());

        let count: (i64,) = executor
            .fetch_one("SELECT COUNT(*) FROM users", &[])
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_execute_reports_rows_affected() {
        let executor = create_test_executor().await;

        insert_user(&executor, "u1", "Alice", "alice@example.com").await;

        let updated = executor
            .execute(
                "UPDATE users SET name = ? WHERE id = ?",
                &["Alicia".into(), "u1".into()],
            )
            .await
            .unwrap();
        assert_eq!(updated, 1);

        let missing = executor
            .execute("DELETE FROM users WHERE id = ?", &["nope".into()])
            .await
            .unwrap();
        assert_eq!(missing, 0);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(SqlValue::from(None::<String>), SqlValue::Null);
        assert_eq!(
            SqlValue::from(Some("Paris")),
            SqlValue::Text("Paris".to_string())
        );
        assert_eq!(
            SqlValue::from(ExpenseCategory::Food),
            SqlValue::Text("Food".to_string())
        );
    }
}
