use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotAcceptable(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => AppError::NotFound,
            DomainError::InvalidInput(msg) => AppError::BadRequest(msg),
            DomainError::ProtectedReference(msg) => AppError::Conflict(msg),
            // Geocoding failures are contained at the ranking layer; one
            // escaping to the API boundary is a bug worth a 500.
            DomainError::Geocode(e) => AppError::Internal(e.to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = |msg: &str| serde_json::json!({ "error": msg });
        match self {
            AppError::NotFound => HttpResponse::NotFound().json(body(&self.to_string())),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(body(msg)),
            AppError::NotAcceptable(msg) => HttpResponse::NotAcceptable().json(body(msg)),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(body(msg)),
            AppError::Internal(_) => {
                HttpResponse::InternalServerError().json(body("Internal server error"))
            }
        }
    }
}
