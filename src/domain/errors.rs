use thiserror::Error;

use super::geo::GeocodeError;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found")]
    NotFound,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Still referenced: {0}")]
    ProtectedReference(String),
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
    #[error("Internal error: {0}")]
    Internal(String),
}
