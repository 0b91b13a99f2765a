use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::rows::{convert_all, ReceptionRow, RECEPTION_COLUMNS};
use crate::database::query_builder::query_as;
use crate::database::{DateRange, ReceptionRepository, RepositoryError};
use crate::models::{Reception, ReceptionStatus, Vocabulary};
use crate::query::{Filterable, Insert, Select, SortDirection, Update};

const TABLE: &str = "reception";

pub struct PgReceptionRepository {
    pool: PgPool,
}

impl PgReceptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReceptionRepository for PgReceptionRepository {
    async fn create(&self, pvz_id: Uuid, opened_at: DateTime<Utc>) -> Result<Reception, RepositoryError> {
        let statement = Insert::into(TABLE)
            .value("pvz_id", pvz_id)
            .value("status", ReceptionStatus::InProgress.as_str())
            .value("date_time", opened_at)
            .returning(RECEPTION_COLUMNS)
            .to_sql()?;
        debug!(sql = %statement.sql, %pvz_id, "insert reception");

        let mut tx = self.pool.begin().await?;
        let row: ReceptionRow = query_as(&statement).fetch_one(&mut *tx).await?;
        tx.commit().await?;

        row.try_into()
    }

    async fn find_active(&self, pvz_id: Uuid) -> Result<Option<Reception>, RepositoryError> {
        let statement = Select::from(TABLE)
            .columns(RECEPTION_COLUMNS)
            .where_eq("pvz_id", pvz_id)
            .where_eq("status", ReceptionStatus::InProgress.as_str())
            .to_sql()?;

        let row: Option<ReceptionRow> = query_as(&statement).fetch_optional(&self.pool).await?;
        row.map(Reception::try_from).transpose()
    }

    async fn close(&self, reception_id: Uuid) -> Result<Option<Reception>, RepositoryError> {
        // The status guard makes a concurrent double close affect zero rows
        let statement = Update::table(TABLE)
            .set("status", ReceptionStatus::Closed.as_str())
            .where_eq("id", reception_id)
            .where_eq("status", ReceptionStatus::InProgress.as_str())
            .returning(RECEPTION_COLUMNS)
            .to_sql()?;
        debug!(sql = %statement.sql, %reception_id, "close reception");

        let mut tx = self.pool.begin().await?;
        let row: Option<ReceptionRow> = query_as(&statement).fetch_optional(&mut *tx).await?;
        tx.commit().await?;

        row.map(Reception::try_from).transpose()
    }

    async fn list_for_pvz(&self, pvz_id: Uuid, range: DateRange) -> Result<Vec<Reception>, RepositoryError> {
        let mut select = Select::from(TABLE)
            .columns(RECEPTION_COLUMNS)
            .where_eq("pvz_id", pvz_id)
            .order_by("date_time", SortDirection::Asc);
        if let Some(from) = range.from {
            select = select.where_gte("date_time", from);
        }
        if let Some(to) = range.to {
            select = select.where_lte("date_time", to);
        }

        let statement = select.to_sql()?;
        let rows: Vec<ReceptionRow> = query_as(&statement).fetch_all(&self.pool).await?;
        convert_all(rows)
    }
}
