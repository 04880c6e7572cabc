//! Per-entity SQL. Every statement is parameterized; list queries are
//! ordered by id so results are stable between calls.

pub mod comments;
pub mod contacts;
pub mod expenses;
pub mod transactions;
pub mod users;

pub use comments::CommentRepo;
pub use contacts::ContactRepo;
pub use expenses::ExpenseRepo;
pub use transactions::TransactionRepo;
pub use users::UserRepo;

use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("no {resource} with {key} '{value}' exists")]
    NotFound {
        resource: &'static str,
        key: &'static str,
        value: String,
    },

    #[error("{message}")]
    Conflict { message: String },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl DbError {
    pub fn not_found(resource: &'static str, key: &'static str, value: impl ToString) -> Self {
        DbError::NotFound {
            resource,
            key,
            value: value.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DbError::Conflict {
            message: message.into(),
        }
    }
}
