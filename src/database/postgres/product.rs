use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::rows::{convert_all, ProductRow, PRODUCT_COLUMNS};
use crate::database::query_builder::query_as;
use crate::database::{ProductRepository, RepositoryError};
use crate::models::{Product, ProductType, ReceptionStatus, Vocabulary};
use crate::query::{Delete, Filterable, Insert, QueryError, RowLock, Select, SortDirection, SqlQuery};

const TABLE: &str = "products";

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Locks the reception row while it is open. Closing updates the same row,
/// so it waits until the product insert commits.
fn lock_open_reception(reception_id: Uuid) -> Result<SqlQuery, QueryError> {
    Select::from("reception")
        .columns(&["id"])
        .where_eq("id", reception_id)
        .where_eq("status", ReceptionStatus::InProgress.as_str())
        .lock(RowLock::ForUpdate)
        .to_sql()
}

/// Concurrent pops skip a newest row that is already being deleted and take
/// the next one instead of matching nothing.
fn delete_newest(reception_id: Uuid) -> Result<SqlQuery, QueryError> {
    let newest = Select::from(TABLE)
        .columns(&["id"])
        .where_eq("reception_id", reception_id)
        .order_by("date_time", SortDirection::Desc)
        .limit(1)
        .lock(RowLock::ForUpdateSkipLocked);
    Delete::from(TABLE)
        .where_in_select("id", newest)
        .returning(PRODUCT_COLUMNS)
        .to_sql()
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn add(
        &self,
        reception_id: Uuid,
        product_type: ProductType,
        added_at: DateTime<Utc>,
    ) -> Result<Option<Product>, RepositoryError> {
        let lock = lock_open_reception(reception_id)?;
        let statement = Insert::into(TABLE)
            .value("date_time", added_at)
            .value("type", product_type.as_str())
            .value("reception_id", reception_id)
            .returning(PRODUCT_COLUMNS)
            .to_sql()?;
        debug!(sql = %statement.sql, %reception_id, "insert product");

        let mut tx = self.pool.begin().await?;
        let open: Option<(Uuid,)> = query_as(&lock).fetch_optional(&mut *tx).await?;
        if open.is_none() {
            return Ok(None);
        }
        let row: ProductRow = query_as(&statement).fetch_one(&mut *tx).await?;
        tx.commit().await?;

        row.try_into().map(Some)
    }

    async fn delete_last(&self, reception_id: Uuid) -> Result<Option<Product>, RepositoryError> {
        let statement = delete_newest(reception_id)?;
        debug!(sql = %statement.sql, %reception_id, "delete last product");

        let mut tx = self.pool.begin().await?;
        let row: Option<ProductRow> = query_as(&statement).fetch_optional(&mut *tx).await?;
        tx.commit().await?;

        row.map(Product::try_from).transpose()
    }

    async fn list_for_reception(&self, reception_id: Uuid) -> Result<Vec<Product>, RepositoryError> {
        let statement = Select::from(TABLE)
            .columns(PRODUCT_COLUMNS)
            .where_eq("reception_id", reception_id)
            .order_by("date_time", SortDirection::Asc)
            .to_sql()?;

        let rows: Vec<ProductRow> = query_as(&statement).fetch_all(&self.pool).await?;
        convert_all(rows)
    }
}
