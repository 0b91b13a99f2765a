pub mod error;
pub mod manager;
pub mod postgres;
pub mod query_builder;
pub mod repository;

pub use error::RepositoryError;
pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{
    DateRange, PageRequest, ProductRepository, PvzRepository, ReceptionRepository, Repositories,
    UserRepository,
};
