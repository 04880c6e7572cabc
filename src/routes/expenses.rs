use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::expense::{create_expense, expense_detail};
use crate::response::{created, ok};
use crate::schemas::NewExpense;
use crate::validation::{parse_id, Validate};

#[post("/expenses")]
async fn add_expense(
    pool: web::Data<PgPool>,
    json: web::Json<NewExpense>,
) -> Result<HttpResponse, ApiError> {
    let new_expense = json.into_inner();
    new_expense.validate()?;
    let expense = create_expense(&pool, &new_expense).await?;
    Ok(created("A new expense has been added.", expense))
}

#[get("/expenses/{expense_id}")]
async fn get_expense(
    pool: web::Data<PgPool>,
    expense_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let expense_id = parse_id("expenseId", &expense_id)?;
    let detail = expense_detail(&pool, expense_id).await?;
    Ok(ok(format!("Details of expense {expense_id}."), detail))
}
