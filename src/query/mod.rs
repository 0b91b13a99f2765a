pub mod error;
pub mod mutate;
pub mod predicate;
pub mod select;
pub mod types;

pub use error::QueryError;
pub use mutate::{Delete, Insert, Update};
pub use predicate::Filterable;
pub use select::Select;
pub use types::*;
