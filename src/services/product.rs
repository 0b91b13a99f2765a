use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use super::reception::ReceptionService;
use crate::database::{ProductRepository, RepositoryError};
use crate::models::{Product, ProductType, Vocabulary};

#[derive(Clone)]
pub struct ProductService {
    receptions: ReceptionService,
    products: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(receptions: ReceptionService, products: Arc<dyn ProductRepository>) -> Self {
        Self { receptions, products }
    }

    /// Appends a product to the open reception of `pvz_id`.
    pub async fn add(&self, raw_type: &str, pvz_id: Uuid) -> ServiceResult<Product> {
        let reception = self.receptions.require_open(pvz_id).await?;

        let product_type = ProductType::parse(raw_type).ok_or_else(|| {
            warn!(%pvz_id, product_type = raw_type, "rejected product type");
            ServiceError::CategoryNotAllowed(raw_type.to_string())
        })?;

        // The reception can be closed between the lookup and the insert
        let product = match self.products.add(reception.id, product_type, Utc::now()).await {
            Ok(Some(product)) => product,
            Ok(None) | Err(RepositoryError::ForeignKeyViolation(_)) => {
                warn!(%pvz_id, reception_id = %reception.id, "reception closed before product insert");
                return Err(ServiceError::NoOpenReception);
            }
            Err(e) => return Err(e.into()),
        };

        info!(%pvz_id, reception_id = %reception.id, product_id = %product.id, "product added");
        Ok(product)
    }

    /// Pops the most recently added product of the open reception.
    pub async fn remove_last(&self, pvz_id: Uuid) -> ServiceResult<Product> {
        self.receptions.require_pickup_point(pvz_id).await?;
        let reception = self.receptions.require_open(pvz_id).await?;

        let removed = self
            .products
            .delete_last(reception.id)
            .await?
            .ok_or(ServiceError::EmptyReception)?;

        info!(%pvz_id, reception_id = %reception.id, product_id = %removed.id, "product removed");
        Ok(removed)
    }
}
