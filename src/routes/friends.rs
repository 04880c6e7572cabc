use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::balance::pair_balances;
use crate::error::ApiError;
use crate::repo::ContactRepo;
use crate::response::{created, ok};
use crate::schemas::NewFriend;
use crate::validation::{parse_id, Validate};

#[post("/friends/{user_id}")]
async fn add_friend(
    pool: web::Data<PgPool>,
    user_id: web::Path<String>,
    json: web::Json<NewFriend>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id("userId", &user_id)?;
    let new_friend = json.into_inner();
    new_friend.validate()?;
    let contact = ContactRepo::new(&pool).add(user_id, &new_friend.email).await?;
    tracing::info!(
        owner_id = contact.list_owner_id,
        contact_id = contact.contact_id,
        "friend added"
    );
    Ok(created("A new friend has been added.", contact))
}

#[get("/friends/{user_id}/{friend_id}")]
async fn get_pair_balances(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, friend_id) = path.into_inner();
    let user_id = parse_id("userId", &user_id)?;
    let friend_id = parse_id("friendId", &friend_id)?;
    let balances = pair_balances(&pool, user_id, friend_id).await?;
    Ok(ok(
        format!("Balances between user {user_id} and user {friend_id}."),
        balances,
    ))
}
