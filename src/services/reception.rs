use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use crate::database::{PvzRepository, ReceptionRepository, RepositoryError};
use crate::models::Reception;

/// Owns the open/closed lifecycle of receptions.
///
/// A pickup point has at most one `in_progress` reception. The check here
/// gives the friendly error; the partial unique index catches the race.
#[derive(Clone)]
pub struct ReceptionService {
    pvz: Arc<dyn PvzRepository>,
    receptions: Arc<dyn ReceptionRepository>,
}

impl ReceptionService {
    pub fn new(pvz: Arc<dyn PvzRepository>, receptions: Arc<dyn ReceptionRepository>) -> Self {
        Self { pvz, receptions }
    }

    pub async fn create(&self, pvz_id: Uuid) -> ServiceResult<Reception> {
        if self.receptions.find_active(pvz_id).await?.is_some() {
            warn!(%pvz_id, "reception already open");
            return Err(ServiceError::ActiveReceptionExists);
        }

        let reception = match self.receptions.create(pvz_id, Utc::now()).await {
            Ok(reception) => reception,
            Err(RepositoryError::UniqueViolation(_)) => return Err(ServiceError::ActiveReceptionExists),
            Err(RepositoryError::ForeignKeyViolation(_)) => return Err(ServiceError::UnknownPickupPoint),
            Err(e) => return Err(e.into()),
        };

        info!(%pvz_id, reception_id = %reception.id, "reception opened");
        Ok(reception)
    }

    pub async fn get_active(&self, pvz_id: Uuid) -> ServiceResult<Option<Reception>> {
        Ok(self.receptions.find_active(pvz_id).await?)
    }

    /// The open reception of a pickup point, or `NoOpenReception`.
    pub async fn require_open(&self, pvz_id: Uuid) -> ServiceResult<Reception> {
        self.get_active(pvz_id).await?.ok_or(ServiceError::NoOpenReception)
    }

    /// Fails with `PickupPointNotFound` when the id is unknown.
    pub async fn require_pickup_point(&self, pvz_id: Uuid) -> ServiceResult<()> {
        match self.pvz.find_by_id(pvz_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::PickupPointNotFound),
        }
    }

    pub async fn close(&self, pvz_id: Uuid) -> ServiceResult<Reception> {
        self.require_pickup_point(pvz_id).await?;
        let open = self.require_open(pvz_id).await?;

        // Someone else closed it between the lookup and the update
        let closed = self.receptions.close(open.id).await?.ok_or(ServiceError::NoOpenReception)?;

        info!(%pvz_id, reception_id = %closed.id, "reception closed");
        Ok(closed)
    }
}
