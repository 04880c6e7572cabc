use sqlx::PgPool;

use super::DbError;
use crate::db::is_unique_violation;
use crate::schemas::{NewUser, User, UserId};

pub const DUPLICATE_EMAIL: &str = "A user with the email address provided already exists.";

pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(users)
    }

    pub async fn get(&self, id: UserId) -> Result<User, DbError> {
        sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("user", "id", id))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Insert a user unless the email is already registered.
    ///
    /// The email is looked up first; a concurrent insert that slips past the
    /// lookup still hits the unique constraint and is reported the same way.
    pub async fn create(&self, new_user: &NewUser) -> Result<User, DbError> {
        let email = new_user.email.trim();
        if self.find_by_email(email).await?.is_some() {
            return Err(DbError::conflict(DUPLICATE_EMAIL));
        }

        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id, name, email",
        )
        .bind(new_user.name.trim())
        .bind(email)
        .fetch_one(self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                DbError::conflict(DUPLICATE_EMAIL)
            } else {
                DbError::from(err)
            }
        })
    }
}
