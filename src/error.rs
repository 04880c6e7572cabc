//! Domain failures mapped onto HTTP responses.
//!
//! Every failure is answered with `{status: "failed", message}`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::repo::DbError;
use crate::response::Envelope;
use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::NotFound(sentence(&err.to_string())),
            DbError::Conflict { message } => ApiError::Conflict(message),
            DbError::Invalid(err) => ApiError::Validation(err),
            DbError::Sqlx(err) => ApiError::Database(err),
        }
    }
}

/// Capitalize and terminate a lower-case error message.
fn sentence(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::NOT_ACCEPTABLE,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Database(err) => {
                tracing::error!(error = %err, "database error");
                "An internal error occurred.".to_string()
            }
            ApiError::Validation(err) => err.to_string(),
            ApiError::NotFound(message) | ApiError::Conflict(message) => message.clone(),
        };
        HttpResponse::build(self.status_code()).json(Envelope::failed(message))
    }
}
