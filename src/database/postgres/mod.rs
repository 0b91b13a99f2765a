//! Postgres adapters for the repository ports. Every write runs in its own
//! transaction; dropping an uncommitted transaction rolls it back.

mod product;
mod pvz;
mod reception;
mod rows;
mod user;

pub use product::PgProductRepository;
pub use pvz::PgPvzRepository;
pub use reception::PgReceptionRepository;
pub use user::PgUserRepository;
