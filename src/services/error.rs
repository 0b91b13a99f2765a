use thiserror::Error;

use crate::auth::{JwtError, PasswordError};
use crate::database::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("city is not allowed: {0}")]
    CityNotAllowed(String),

    #[error("product type is not allowed: {0}")]
    CategoryNotAllowed(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("there is an active reception for this PVZ")]
    ActiveReceptionExists,

    #[error("no open reception for this PVZ")]
    NoOpenReception,

    #[error("PVZ does not exist")]
    UnknownPickupPoint,

    #[error("PVZ not found")]
    PickupPointNotFound,

    #[error("no products to delete in the open reception")]
    EmptyReception,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("user not found")]
    UserNotFound,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    PasswordHash(#[from] PasswordError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
