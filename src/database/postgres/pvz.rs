use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::rows::{convert_all, PvzRow, PVZ_COLUMNS};
use crate::database::query_builder::query_as;
use crate::database::{PageRequest, PvzRepository, RepositoryError};
use crate::models::{City, PickupPoint, Vocabulary};
use crate::query::{Filterable, Insert, Select, SortDirection};

const TABLE: &str = "pvz";

pub struct PgPvzRepository {
    pool: PgPool,
}

impl PgPvzRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PvzRepository for PgPvzRepository {
    async fn create(&self, city: City, registration_date: DateTime<Utc>) -> Result<PickupPoint, RepositoryError> {
        let statement = Insert::into(TABLE)
            .value("city", city.as_str())
            .value("registration_date", registration_date)
            .returning(PVZ_COLUMNS)
            .to_sql()?;
        debug!(sql = %statement.sql, "insert pvz");

        let mut tx = self.pool.begin().await?;
        let row: PvzRow = query_as(&statement).fetch_one(&mut *tx).await?;
        tx.commit().await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PickupPoint>, RepositoryError> {
        let statement = Select::from(TABLE).columns(PVZ_COLUMNS).where_eq("id", id).to_sql()?;
        debug!(sql = %statement.sql, "select pvz");

        let row: Option<PvzRow> = query_as(&statement).fetch_optional(&self.pool).await?;
        row.map(PickupPoint::try_from).transpose()
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<PickupPoint>, RepositoryError> {
        let mut select = Select::from(TABLE)
            .columns(PVZ_COLUMNS)
            .order_by("registration_date", SortDirection::Desc)
            .limit(page.limit)
            .offset(page.offset);

        if !page.range.is_unbounded() {
            let mut with_receptions = Select::from("reception").columns(&["pvz_id"]).distinct();
            if let Some(from) = page.range.from {
                with_receptions = with_receptions.where_gte("date_time", from);
            }
            if let Some(to) = page.range.to {
                with_receptions = with_receptions.where_lte("date_time", to);
            }
            select = select.where_in_select("id", with_receptions);
        }

        let statement = select.to_sql()?;
        debug!(sql = %statement.sql, "list pvz");

        let rows: Vec<PvzRow> = query_as(&statement).fetch_all(&self.pool).await?;
        convert_all(rows)
    }
}
