pub mod app;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod query;
pub mod services;

pub use app::{router, AppState};
pub use config::AppConfig;
