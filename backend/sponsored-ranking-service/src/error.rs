use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RankingServiceError>;

/// Errors surfaced by the HTTP layer and configuration.
///
/// Ranking itself never fails; malformed tiers degrade to `basic`.
#[derive(Debug, Error)]
pub enum RankingServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown ranking strategy: {0}")]
    UnknownStrategy(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for RankingServiceError {
    fn error_response(&self) -> HttpResponse {
        let code = self.status_code();
        HttpResponse::build(code).json(ErrorResponse {
            error: self.to_string(),
            code: code.as_u16(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            RankingServiceError::Validation(_) | RankingServiceError::UnknownStrategy(_) => {
                StatusCode::BAD_REQUEST
            }
            RankingServiceError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<envy::Error> for RankingServiceError {
    fn from(err: envy::Error) -> Self {
        RankingServiceError::Config(err.to_string())
    }
}
