#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use pvz_service::auth::TokenIssuer;
use pvz_service::database::{
    DateRange, PageRequest, ProductRepository, PvzRepository, ReceptionRepository, Repositories,
    RepositoryError, UserRepository,
};
use pvz_service::models::{
    City, NewUser, PickupPoint, Product, ProductType, Reception, ReceptionStatus, Role, User,
};
use pvz_service::{router, AppConfig, AppState};

/// In-memory stand-in for Postgres. Enforces the same constraints the
/// schema does: foreign keys, one open reception per pickup point and
/// unique emails.
#[derive(Default)]
pub struct MemoryStore {
    pvz: Mutex<Vec<PickupPoint>>,
    receptions: Mutex<Vec<Reception>>,
    products: Mutex<Vec<Product>>,
    users: Mutex<Vec<User>>,
    fail_product_reads: AtomicBool,
    close_after_lookup: AtomicBool,
}

fn is_open(reception: &Reception) -> bool {
    reception.status == ReceptionStatus::InProgress
}

impl MemoryStore {
    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            pvz: self.clone(),
            receptions: self.clone(),
            products: self.clone(),
            users: self.clone(),
        }
    }

    pub fn products_of(&self, reception_id: Uuid) -> Vec<Product> {
        let products = self.products.lock().unwrap();
        products.iter().filter(|p| p.reception_id == reception_id).cloned().collect()
    }

    pub fn receptions_of(&self, pvz_id: Uuid) -> Vec<Reception> {
        let receptions = self.receptions.lock().unwrap();
        receptions.iter().filter(|r| r.pvz_id == pvz_id).cloned().collect()
    }

    pub fn fail_product_reads(&self, fail: bool) {
        self.fail_product_reads.store(fail, Ordering::SeqCst);
    }

    /// The next `find_active` hands out the open reception and then closes it,
    /// as if a concurrent request closed it right after the lookup.
    pub fn close_after_next_lookup(&self) {
        self.close_after_lookup.store(true, Ordering::SeqCst);
    }

    /// Inserts rows directly, bypassing the services.
    pub fn seed_pvz(&self, city: City, registration_date: DateTime<Utc>) -> PickupPoint {
        let pvz = PickupPoint { id: Uuid::new_v4(), registration_date, city };
        self.pvz.lock().unwrap().push(pvz.clone());
        pvz
    }

    pub fn seed_reception(&self, pvz_id: Uuid, status: ReceptionStatus, date_time: DateTime<Utc>) -> Reception {
        let reception = Reception { id: Uuid::new_v4(), pvz_id, status, date_time };
        self.receptions.lock().unwrap().push(reception.clone());
        reception
    }

    pub fn seed_product(&self, reception_id: Uuid, product_type: ProductType, date_time: DateTime<Utc>) -> Product {
        let product = Product { id: Uuid::new_v4(), date_time, product_type, reception_id };
        self.products.lock().unwrap().push(product.clone());
        product
    }
}

#[async_trait]
impl PvzRepository for MemoryStore {
    async fn create(&self, city: City, registration_date: DateTime<Utc>) -> Result<PickupPoint, RepositoryError> {
        Ok(self.seed_pvz(city, registration_date))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PickupPoint>, RepositoryError> {
        Ok(self.pvz.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<PickupPoint>, RepositoryError> {
        let receptions = self.receptions.lock().unwrap().clone();
        let mut points: Vec<PickupPoint> = self
            .pvz
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                page.range.is_unbounded()
                    || receptions.iter().any(|r| r.pvz_id == p.id && page.range.contains(r.date_time))
            })
            .cloned()
            .collect();
        points.sort_by(|a, b| b.registration_date.cmp(&a.registration_date));

        Ok(points.into_iter().skip(page.offset as usize).take(page.limit as usize).collect())
    }
}

#[async_trait]
impl ReceptionRepository for MemoryStore {
    async fn create(&self, pvz_id: Uuid, opened_at: DateTime<Utc>) -> Result<Reception, RepositoryError> {
        if !self.pvz.lock().unwrap().iter().any(|p| p.id == pvz_id) {
            return Err(RepositoryError::ForeignKeyViolation("reception_pvz_id_fkey".to_string()));
        }

        let mut receptions = self.receptions.lock().unwrap();
        if receptions.iter().any(|r| r.pvz_id == pvz_id && is_open(r)) {
            return Err(RepositoryError::UniqueViolation("reception_one_open_per_pvz".to_string()));
        }
        let reception = Reception {
            id: Uuid::new_v4(),
            pvz_id,
            status: ReceptionStatus::InProgress,
            date_time: opened_at,
        };
        receptions.push(reception.clone());
        Ok(reception)
    }

    async fn find_active(&self, pvz_id: Uuid) -> Result<Option<Reception>, RepositoryError> {
        let mut receptions = self.receptions.lock().unwrap();
        let active = receptions.iter_mut().find(|r| r.pvz_id == pvz_id && is_open(r));
        let found = active.as_ref().map(|r| (*r).clone());
        if let Some(reception) = active {
            if self.close_after_lookup.swap(false, Ordering::SeqCst) {
                reception.status = ReceptionStatus::Closed;
            }
        }
        Ok(found)
    }

    async fn close(&self, reception_id: Uuid) -> Result<Option<Reception>, RepositoryError> {
        let mut receptions = self.receptions.lock().unwrap();
        Ok(receptions.iter_mut().find(|r| r.id == reception_id && is_open(r)).map(|r| {
            r.status = ReceptionStatus::Closed;
            r.clone()
        }))
    }

    async fn list_for_pvz(&self, pvz_id: Uuid, range: DateRange) -> Result<Vec<Reception>, RepositoryError> {
        let mut found: Vec<Reception> = self
            .receptions_of(pvz_id)
            .into_iter()
            .filter(|r| range.contains(r.date_time))
            .collect();
        found.sort_by_key(|r| r.date_time);
        Ok(found)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn add(
        &self,
        reception_id: Uuid,
        product_type: ProductType,
        added_at: DateTime<Utc>,
    ) -> Result<Option<Product>, RepositoryError> {
        let open = match self.receptions.lock().unwrap().iter().find(|r| r.id == reception_id) {
            Some(reception) => is_open(reception),
            None => return Err(RepositoryError::ForeignKeyViolation("products_reception_id_fkey".to_string())),
        };
        Ok(open.then(|| self.seed_product(reception_id, product_type, added_at)))
    }

    async fn delete_last(&self, reception_id: Uuid) -> Result<Option<Product>, RepositoryError> {
        let mut products = self.products.lock().unwrap();
        let newest = products
            .iter()
            .enumerate()
            .filter(|(_, p)| p.reception_id == reception_id)
            .max_by_key(|(_, p)| p.date_time)
            .map(|(index, _)| index);
        Ok(newest.map(|index| products.remove(index)))
    }

    async fn list_for_reception(&self, reception_id: Uuid) -> Result<Vec<Product>, RepositoryError> {
        if self.fail_product_reads.load(Ordering::SeqCst) {
            return Err(RepositoryError::CorruptRow("products unavailable".to_string()));
        }
        let mut found = self.products_of(reception_id);
        found.sort_by_key(|p| p.date_time);
        Ok(found)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::UniqueViolation("users_email_key".to_string()));
        }
        let created = User { id: Uuid::new_v4(), email: user.email, password_hash: user.password_hash, role: user.role };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(AppConfig::development())
}

pub fn spawn_app_with(config: AppConfig) -> TestApp {
    init_tracing();
    let store = Arc::new(MemoryStore::default());
    let tokens = TokenIssuer::new(&config.security).expect("development secret is valid");
    let state = AppState::new(config, store.repositories(), tokens, None);
    TestApp { router: router(state.clone()), store, state }
}

impl TestApp {
    pub fn token(&self, role: Role) -> String {
        self.state.tokens.issue(role, None).expect("token issues")
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok((status, json))
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.send(Method::GET, uri, Some(token), None).await
    }

    /// Creates a pickup point through the API as a moderator.
    pub async fn create_pvz(&self, city: &str) -> Result<Uuid> {
        let moderator = self.token(Role::Moderator);
        let (status, body) = self.post("/pvz", &moderator, serde_json::json!({ "city": city })).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create pvz failed: {} {}", status, body);
        Ok(body["id"].as_str().unwrap_or_default().parse()?)
    }
}
