//! Postgres connection pool and schema bootstrap.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

use crate::settings::Settings;

const MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);
const IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS contact_list (
    list_owner_id INTEGER NOT NULL REFERENCES users (id),
    contact_id INTEGER NOT NULL REFERENCES users (id),
    PRIMARY KEY (list_owner_id, contact_id)
);

CREATE TABLE IF NOT EXISTS expenses (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users (id),
    description TEXT NOT NULL,
    transaction_date DATE NOT NULL,
    total_balance DOUBLE PRECISION NOT NULL,
    notes TEXT
);

CREATE TABLE IF NOT EXISTS transactions (
    id SERIAL PRIMARY KEY,
    expense_id INTEGER NOT NULL REFERENCES expenses (id) ON DELETE CASCADE,
    lender_id INTEGER NOT NULL REFERENCES users (id),
    borrower_id INTEGER NOT NULL REFERENCES users (id),
    balance DOUBLE PRECISION NOT NULL
);

CREATE TABLE IF NOT EXISTS comments (
    id SERIAL PRIMARY KEY,
    expense_id INTEGER NOT NULL REFERENCES expenses (id) ON DELETE CASCADE,
    user_id INTEGER NOT NULL REFERENCES users (id),
    comment TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS transactions_expense_id_idx ON transactions (expense_id);
CREATE INDEX IF NOT EXISTS transactions_lender_id_idx ON transactions (lender_id);
CREATE INDEX IF NOT EXISTS transactions_borrower_id_idx ON transactions (borrower_id);
CREATE INDEX IF NOT EXISTS comments_expense_id_idx ON comments (expense_id);
"#;

/// Connection options for the configured database. Remote databases get
/// TLS without certificate verification; `LOCAL` turns TLS off.
pub fn connect_options(settings: &Settings) -> Result<PgConnectOptions, sqlx::Error> {
    let ssl_mode = if settings.local {
        PgSslMode::Disable
    } else {
        PgSslMode::Require
    };
    Ok(PgConnectOptions::from_str(&settings.database_url)?.ssl_mode(ssl_mode))
}

fn pool_options(settings: &Settings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .max_lifetime(MAX_LIFETIME)
        .idle_timeout(IDLE_TIMEOUT)
}

pub async fn create_pool(settings: &Settings) -> Result<PgPool, sqlx::Error> {
    pool_options(settings)
        .connect_with(connect_options(settings)?)
        .await
}

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    tracing::info!("database schema ready");
    Ok(())
}

/// True when the error is a Postgres unique violation (SQLSTATE 23505).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
