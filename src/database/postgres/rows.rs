use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::RepositoryError;
use crate::models::{City, PickupPoint, Product, ProductType, Reception, ReceptionStatus, Role, User, Vocabulary};

pub(super) const PVZ_COLUMNS: &[&str] = &["id", "registration_date", "city"];
pub(super) const RECEPTION_COLUMNS: &[&str] = &["id", "pvz_id", "status", "date_time"];
pub(super) const PRODUCT_COLUMNS: &[&str] = &["id", "date_time", "type", "reception_id"];
pub(super) const USER_COLUMNS: &[&str] = &["id", "email", "password", "role"];

fn decode<T: Vocabulary>(column: &str, raw: &str) -> Result<T, RepositoryError> {
    T::parse(raw).ok_or_else(|| RepositoryError::CorruptRow(format!("{} = {:?}", column, raw)))
}

#[derive(Debug, FromRow)]
pub(super) struct PvzRow {
    id: Uuid,
    registration_date: DateTime<Utc>,
    city: String,
}

impl TryFrom<PvzRow> for PickupPoint {
    type Error = RepositoryError;

    fn try_from(row: PvzRow) -> Result<Self, Self::Error> {
        Ok(PickupPoint {
            id: row.id,
            registration_date: row.registration_date,
            city: decode::<City>("pvz.city", &row.city)?,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ReceptionRow {
    id: Uuid,
    pvz_id: Uuid,
    status: String,
    date_time: DateTime<Utc>,
}

impl TryFrom<ReceptionRow> for Reception {
    type Error = RepositoryError;

    fn try_from(row: ReceptionRow) -> Result<Self, Self::Error> {
        Ok(Reception {
            id: row.id,
            pvz_id: row.pvz_id,
            status: decode::<ReceptionStatus>("reception.status", &row.status)?,
            date_time: row.date_time,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ProductRow {
    id: Uuid,
    date_time: DateTime<Utc>,
    #[sqlx(rename = "type")]
    product_type: String,
    reception_id: Uuid,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: row.id,
            date_time: row.date_time,
            product_type: decode::<ProductType>("products.type", &row.product_type)?,
            reception_id: row.reception_id,
        })
    }
}

#[derive(FromRow)]
pub(super) struct UserRow {
    id: Uuid,
    email: String,
    #[sqlx(rename = "password")]
    password_hash: String,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            role: decode::<Role>("users.role", &row.role)?,
        })
    }
}

/// Convert every row, failing on the first one that does not decode.
pub(super) fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, RepositoryError>
where
    T: TryFrom<R, Error = RepositoryError>,
{
    rows.into_iter().map(T::try_from).collect()
}
