use sqlx::PgPool;

use crate::repo::{DbError, ExpenseRepo};
use crate::schemas::{
    Expense, ExpenseDetail, ExpenseId, ExpenseWithOwner, NewExpense, Transaction,
    TransactionWithNames,
};

pub async fn create_expense(
    pool: &PgPool,
    new_expense: &NewExpense,
) -> Result<ExpenseDetail<Expense, Transaction>, DbError> {
    let created = ExpenseRepo::new(pool).create(new_expense).await?;
    tracing::info!(
        expense_id = created.expense.id,
        user_id = created.expense.user_id,
        transactions = created.transactions.len(),
        "expense created"
    );
    Ok(created)
}

/// The expense with its owner's name and every line with lender and borrower names.
pub async fn expense_detail(
    pool: &PgPool,
    expense_id: ExpenseId,
) -> Result<ExpenseDetail<ExpenseWithOwner, TransactionWithNames>, DbError> {
    let expenses = ExpenseRepo::new(pool);
    let expense = expenses.get_with_owner(expense_id).await?;
    let transactions = expenses.transactions_with_names(expense_id).await?;
    Ok(ExpenseDetail {
        expense,
        transactions,
    })
}
