use sqlx::PgPool;

use super::DbError;
use crate::schemas::{Counterparty, PairTransaction, UserId};

/// Read-side queries over transaction lines across all expenses.
pub struct TransactionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TransactionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One row per transaction where `user_id` borrowed: the lender and the amount.
    pub async fn borrowed_by(&self, user_id: UserId) -> Result<Vec<Counterparty>, DbError> {
        let rows = sqlx::query_as::<_, Counterparty>(
            r#"
            SELECT u.id, u.name, t.balance
            FROM transactions t
            JOIN users u ON u.id = t.lender_id
            WHERE t.borrower_id = $1
            ORDER BY t.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// One row per transaction where `user_id` lent: the borrower and the amount.
    pub async fn lent_by(&self, user_id: UserId) -> Result<Vec<Counterparty>, DbError> {
        let rows = sqlx::query_as::<_, Counterparty>(
            r#"
            SELECT u.id, u.name, t.balance
            FROM transactions t
            JOIN users u ON u.id = t.borrower_id
            WHERE t.lender_id = $1
            ORDER BY t.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Transactions where `lender_id` lent to `borrower_id`, with the
    /// description and date of the expense each belongs to.
    pub async fn between(
        &self,
        lender_id: UserId,
        borrower_id: UserId,
    ) -> Result<Vec<PairTransaction>, DbError> {
        let rows = sqlx::query_as::<_, PairTransaction>(
            r#"
            SELECT t.id, t.expense_id, t.lender_id, t.borrower_id, t.balance,
                   e.description, e.transaction_date
            FROM transactions t
            JOIN expenses e ON e.id = t.expense_id
            WHERE t.lender_id = $1 AND t.borrower_id = $2
            ORDER BY t.id
            "#,
        )
        .bind(lender_id)
        .bind(borrower_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }
}
