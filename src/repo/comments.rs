use sqlx::PgPool;

use super::{DbError, ExpenseRepo, UserRepo};
use crate::schemas::{Comment, CommentWithAuthor, ExpenseId, NewComment};

pub struct CommentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CommentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_expense(
        &self,
        expense_id: ExpenseId,
    ) -> Result<Vec<CommentWithAuthor>, DbError> {
        ExpenseRepo::new(self.pool).ensure_exists(expense_id).await?;

        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.expense_id, c.user_id, u.name, c.comment
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.expense_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(expense_id)
        .fetch_all(self.pool)
        .await?;
        Ok(comments)
    }

    pub async fn create(
        &self,
        expense_id: ExpenseId,
        new_comment: &NewComment,
    ) -> Result<Comment, DbError> {
        ExpenseRepo::new(self.pool).ensure_exists(expense_id).await?;
        UserRepo::new(self.pool).get(new_comment.user_id).await?;

        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (expense_id, user_id, comment)
            VALUES ($1, $2, $3)
            RETURNING id, expense_id, user_id, comment
            "#,
        )
        .bind(expense_id)
        .bind(new_comment.user_id)
        .bind(new_comment.comment.trim())
        .fetch_one(self.pool)
        .await?;
        Ok(comment)
    }
}
