use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::balance::user_summary;
use crate::error::ApiError;
use crate::repo::UserRepo;
use crate::response::{created, ok};
use crate::schemas::NewUser;
use crate::validation::{parse_id, Validate};

#[get("/users")]
async fn list_users(pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let users = UserRepo::new(&pool).list().await?;
    Ok(ok("All the users in the database.", users))
}

#[post("/users")]
async fn add_user(
    pool: web::Data<PgPool>,
    json: web::Json<NewUser>,
) -> Result<HttpResponse, ApiError> {
    let new_user = json.into_inner();
    new_user.validate()?;
    let user = UserRepo::new(&pool).create(&new_user).await?;
    tracing::info!(user_id = user.id, "user created");
    Ok(created("A new user has been added.", user))
}

#[get("/users/{user_id}")]
async fn get_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id("userId", &user_id)?;
    let summary = user_summary(&pool, user_id).await?;
    Ok(ok(
        format!("Friends and balances of user {user_id}."),
        summary,
    ))
}
