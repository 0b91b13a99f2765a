use std::sync::Arc;
use std::time::Duration;

use axum::{
    handler::Handler,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::TokenIssuer;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, Repositories};
use crate::handlers::{protected, public};
use crate::middleware::{jwt_auth_middleware, require_client, require_moderator};
use crate::services::Services;

/// Everything a handler can reach, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Services,
    pub tokens: TokenIssuer,
    /// Absent when the repositories are not Postgres backed
    pub database: Option<DatabaseManager>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        repositories: Repositories,
        tokens: TokenIssuer,
        database: Option<DatabaseManager>,
    ) -> Self {
        let services = Services::new(repositories, tokens.clone(), config.server.list_concurrency);
        Self { config: Arc::new(config), services, tokens, database }
    }
}

pub fn router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        .merge(public_routes(&state))
        .merge(protected_routes(&state))
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes(state: &AppState) -> Router<AppState> {
    let mut routes = Router::new()
        .route("/register", post(public::register))
        .route("/login", post(public::login))
        .route("/health", get(public::health));

    if state.config.security.enable_dummy_login {
        routes = routes.route("/dummyLogin", post(public::dummy_login));
    }
    routes
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    use protected::{product, pvz, reception};

    Router::new()
        .route(
            "/pvz",
            get(pvz::list_pvz).post(pvz::create_pvz.layer(from_fn(require_moderator))),
        )
        .route("/pvz/:id", get(pvz::get_pvz))
        .route(
            "/pvz/:id/delete_last_product",
            post(pvz::delete_last_product.layer(from_fn(require_client))),
        )
        .route(
            "/pvz/:id/close_last_reception",
            post(pvz::close_last_reception.layer(from_fn(require_client))),
        )
        .route("/receptions", post(reception::create_reception.layer(from_fn(require_client))))
        .route("/product", post(product::add_product.layer(from_fn(require_client))))
        .route_layer(from_fn_with_state(state.tokens.clone(), jwt_auth_middleware))
}
