use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::rows::{UserRow, USER_COLUMNS};
use crate::database::query_builder::query_as;
use crate::database::{RepositoryError, UserRepository};
use crate::models::{NewUser, User, Vocabulary};
use crate::query::{Filterable, Insert, Select};

const TABLE: &str = "users";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let statement = Insert::into(TABLE)
            .value("email", user.email)
            .value("password", user.password_hash)
            .value("role", user.role.as_str())
            .returning(USER_COLUMNS)
            .to_sql()?;
        debug!(sql = %statement.sql, "insert user");

        let mut tx = self.pool.begin().await?;
        let row: UserRow = query_as(&statement).fetch_one(&mut *tx).await?;
        tx.commit().await?;

        row.try_into()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let statement = Select::from(TABLE).columns(USER_COLUMNS).where_eq("email", email).to_sql()?;

        let row: Option<UserRow> = query_as(&statement).fetch_optional(&self.pool).await?;
        row.map(User::try_from).transpose()
    }
}
