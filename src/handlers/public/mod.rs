// handlers/public/mod.rs - endpoints reachable without a token

pub mod auth;
pub mod health;

pub use auth::{dummy_login, login, register};
pub use health::health;
