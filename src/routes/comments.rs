use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::repo::CommentRepo;
use crate::response::{created, ok};
use crate::schemas::NewComment;
use crate::validation::{parse_id, Validate};

#[get("/comments/{expense_id}")]
async fn list_comments(
    pool: web::Data<PgPool>,
    expense_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let expense_id = parse_id("expenseId", &expense_id)?;
    let comments = CommentRepo::new(&pool).list_for_expense(expense_id).await?;
    Ok(ok(
        format!("All the comments on expense {expense_id}."),
        comments,
    ))
}

#[post("/comments/{expense_id}")]
async fn add_comment(
    pool: web::Data<PgPool>,
    expense_id: web::Path<String>,
    json: web::Json<NewComment>,
) -> Result<HttpResponse, ApiError> {
    let expense_id = parse_id("expenseId", &expense_id)?;
    let new_comment = json.into_inner();
    new_comment.validate()?;
    let comment = CommentRepo::new(&pool).create(expense_id, &new_comment).await?;
    tracing::info!(comment_id = comment.id, expense_id, "comment added");
    Ok(created("A new comment has been added.", comment))
}
