use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use crate::database::{DateRange, PageRequest, ProductRepository, PvzRepository, ReceptionRepository};
use crate::models::{City, PickupPoint, PickupPointDetails, ReceptionDetails, Vocabulary};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Raw listing parameters as they arrive in the query string.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PvzPage {
    pub page: i64,
    pub limit: i64,
    pub items: Vec<PickupPointDetails>,
}

#[derive(Clone)]
pub struct PvzService {
    pvz: Arc<dyn PvzRepository>,
    receptions: Arc<dyn ReceptionRepository>,
    products: Arc<dyn ProductRepository>,
    list_concurrency: usize,
}

impl PvzService {
    pub fn new(
        pvz: Arc<dyn PvzRepository>,
        receptions: Arc<dyn ReceptionRepository>,
        products: Arc<dyn ProductRepository>,
        list_concurrency: usize,
    ) -> Self {
        Self { pvz, receptions, products, list_concurrency: list_concurrency.max(1) }
    }

    pub async fn create(&self, raw_city: &str, registered_at: Option<DateTime<Utc>>) -> ServiceResult<PickupPoint> {
        let city = City::parse(raw_city).ok_or_else(|| {
            warn!(city = raw_city, "rejected city");
            ServiceError::CityNotAllowed(raw_city.to_string())
        })?;

        let pvz = self.pvz.create(city, registered_at.unwrap_or_else(Utc::now)).await?;
        info!(pvz_id = %pvz.id, %city, "pickup point created");
        Ok(pvz)
    }

    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<PickupPoint> {
        self.pvz.find_by_id(id).await?.ok_or(ServiceError::PickupPointNotFound)
    }

    /// One page of pickup points, each with its receptions and their products.
    ///
    /// Enrichment runs with at most `list_concurrency` pickup points in
    /// flight. Output order matches the page order and the first failure
    /// fails the whole page.
    pub async fn list(&self, query: ListQuery) -> ServiceResult<PvzPage> {
        let page = parse_positive(query.page.as_deref()).unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive(query.limit.as_deref()).unwrap_or(DEFAULT_LIMIT);
        let range = DateRange {
            from: parse_bound(query.start_date.as_deref(), "startDate", Bound::Start)?,
            to: parse_bound(query.end_date.as_deref(), "endDate", Bound::End)?,
        };
        if let (Some(from), Some(to)) = (range.from, range.to) {
            if from > to {
                return Err(ServiceError::InvalidInput("startDate is after endDate".to_string()));
            }
        }

        let request = PageRequest { limit, offset: (page - 1).saturating_mul(limit), range };
        let points = self.pvz.list(request).await?;
        debug!(page, limit, count = points.len(), "enriching pickup points");

        let items: Vec<PickupPointDetails> = stream::iter(points)
            .map(|pvz| self.details(pvz, range))
            .buffered(self.list_concurrency)
            .try_collect()
            .await?;

        Ok(PvzPage { page, limit, items })
    }

    async fn details(&self, pvz: PickupPoint, range: DateRange) -> ServiceResult<PickupPointDetails> {
        let receptions = self.receptions.list_for_pvz(pvz.id, range).await?;

        let mut enriched = Vec::with_capacity(receptions.len());
        for reception in receptions {
            let products = self.products.list_for_reception(reception.id).await?;
            enriched.push(ReceptionDetails { reception, products });
        }

        Ok(PickupPointDetails { pvz, receptions: enriched })
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok()).filter(|v| *v > 0)
}

#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

/// Accepts RFC 3339 or a bare `YYYY-MM-DD`. A bare end date covers the whole day.
fn parse_bound(raw: Option<&str>, name: &str, bound: Bound) -> ServiceResult<Option<DateTime<Utc>>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }

    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ServiceError::InvalidInput(format!("invalid {name}: {raw}")))?;
    let naive = match bound {
        Bound::Start => day.and_hms_opt(0, 0, 0),
        Bound::End => day.and_hms_nano_opt(23, 59, 59, 999_999_999),
    };
    let naive = naive.ok_or_else(|| ServiceError::InvalidInput(format!("invalid {name}: {raw}")))?;
    Ok(Some(Utc.from_utc_datetime(&naive)))
}
