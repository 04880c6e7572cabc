use sqlx::PgPool;

use super::DbError;
use crate::schemas::{
    Expense, ExpenseDetail, ExpenseId, ExpenseWithOwner, NewExpense, Transaction,
    TransactionWithNames, UserId,
};

pub struct ExpenseRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ExpenseRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an expense and its transactions as one unit.
    ///
    /// The owner and every lender/borrower must exist. Transactions are
    /// inserted, and returned, in request order. Any failure drops the
    /// open transaction, which rolls back everything written so far.
    pub async fn create(
        &self,
        new_expense: &NewExpense,
    ) -> Result<ExpenseDetail<Expense, Transaction>, DbError> {
        let mut tx = self.pool.begin().await?;

        let participants: Vec<UserId> = std::iter::once(new_expense.user_id)
            .chain(
                new_expense
                    .transactions
                    .iter()
                    .flat_map(|item| [item.lender_id, item.borrower_id]),
            )
            .collect();
        let known: Vec<UserId> = sqlx::query_scalar("SELECT id FROM users WHERE id = ANY($1)")
            .bind(&participants)
            .fetch_all(&mut *tx)
            .await?;
        if let Some(missing) = participants.iter().find(|&&id| !known.contains(&id)) {
            return Err(DbError::not_found("user", "id", missing));
        }

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (user_id, description, transaction_date, total_balance, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, description, transaction_date, total_balance, notes
            "#,
        )
        .bind(new_expense.user_id)
        .bind(new_expense.description.trim())
        .bind(new_expense.transaction_date)
        .bind(new_expense.total_balance)
        .bind(new_expense.notes.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        let mut transactions = Vec::with_capacity(new_expense.transactions.len());
        for item in &new_expense.transactions {
            let transaction = sqlx::query_as::<_, Transaction>(
                r#"
                INSERT INTO transactions (expense_id, lender_id, borrower_id, balance)
                VALUES ($1, $2, $3, $4)
                RETURNING id, expense_id, lender_id, borrower_id, balance
                "#,
            )
            .bind(expense.id)
            .bind(item.lender_id)
            .bind(item.borrower_id)
            .bind(item.balance)
            .fetch_one(&mut *tx)
            .await?;
            transactions.push(transaction);
        }

        tx.commit().await?;

        Ok(ExpenseDetail {
            expense,
            transactions,
        })
    }

    pub async fn exists(&self, id: ExpenseId) -> Result<bool, DbError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM expenses WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;
        Ok(exists)
    }

    /// Fails with `NotFound` unless the expense exists.
    pub async fn ensure_exists(&self, id: ExpenseId) -> Result<(), DbError> {
        if self.exists(id).await? {
            Ok(())
        } else {
            Err(DbError::not_found("expense", "id", id))
        }
    }

    /// The expense joined with its owner's name.
    pub async fn get_with_owner(&self, id: ExpenseId) -> Result<ExpenseWithOwner, DbError> {
        sqlx::query_as::<_, ExpenseWithOwner>(
            r#"
            SELECT e.id, e.user_id, u.name, e.description, e.transaction_date,
                   e.total_balance, e.notes
            FROM expenses e
            JOIN users u ON u.id = e.user_id
            WHERE e.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("expense", "id", id))
    }

    pub async fn transactions_with_names(
        &self,
        id: ExpenseId,
    ) -> Result<Vec<TransactionWithNames>, DbError> {
        let transactions = sqlx::query_as::<_, TransactionWithNames>(
            r#"
            SELECT t.id, t.expense_id,
                   t.lender_id, lender.name AS lender_name,
                   t.borrower_id, borrower.name AS borrower_name,
                   t.balance
            FROM transactions t
            JOIN users lender ON lender.id = t.lender_id
            JOIN users borrower ON borrower.id = t.borrower_id
            WHERE t.expense_id = $1
            ORDER BY t.id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;
        Ok(transactions)
    }
}
