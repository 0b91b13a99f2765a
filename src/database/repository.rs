use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::RepositoryError;
use crate::models::{City, NewUser, PickupPoint, Product, ProductType, Reception, User};

/// Optional inclusive bounds on reception timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| at >= from) && self.to.map_or(true, |to| at <= to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
    /// When bounded, only pickup points with a reception inside the range are listed
    pub range: DateRange,
}

#[async_trait]
pub trait PvzRepository: Send + Sync {
    async fn create(&self, city: City, registration_date: DateTime<Utc>) -> Result<PickupPoint, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PickupPoint>, RepositoryError>;

    /// Newest registrations first.
    async fn list(&self, page: PageRequest) -> Result<Vec<PickupPoint>, RepositoryError>;
}

#[async_trait]
pub trait ReceptionRepository: Send + Sync {
    async fn create(&self, pvz_id: Uuid, opened_at: DateTime<Utc>) -> Result<Reception, RepositoryError>;

    /// The `in_progress` reception of a pickup point, if any.
    async fn find_active(&self, pvz_id: Uuid) -> Result<Option<Reception>, RepositoryError>;

    /// Moves an open reception to `closed`. `None` when it was no longer open.
    async fn close(&self, reception_id: Uuid) -> Result<Option<Reception>, RepositoryError>;

    /// Oldest first.
    async fn list_for_pvz(&self, pvz_id: Uuid, range: DateRange) -> Result<Vec<Reception>, RepositoryError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts into a reception that is still `in_progress`. `None` when it
    /// has been closed in the meantime.
    async fn add(
        &self,
        reception_id: Uuid,
        product_type: ProductType,
        added_at: DateTime<Utc>,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Removes the newest product of a reception. `None` when it has none.
    async fn delete_last(&self, reception_id: Uuid) -> Result<Option<Product>, RepositoryError>;

    /// Oldest first.
    async fn list_for_reception(&self, reception_id: Uuid) -> Result<Vec<Product>, RepositoryError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
}

/// One adapter per entity, shared by the services.
#[derive(Clone)]
pub struct Repositories {
    pub pvz: Arc<dyn PvzRepository>,
    pub receptions: Arc<dyn ReceptionRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub users: Arc<dyn UserRepository>,
}
