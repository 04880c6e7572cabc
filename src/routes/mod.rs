//! HTTP surface. `configure` registers every route together with the JSON
//! body rules, so the server and the tests build the same app.

use actix_web::web;

use crate::error::ApiError;
use crate::validation::ValidationError;

mod comments;
mod expenses;
mod friends;
mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
    let json = web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::from(ValidationError::Malformed(err.to_string())).into()
    });

    cfg.app_data(json)
        .service(users::list_users)
        .service(users::add_user)
        .service(users::get_user)
        .service(friends::add_friend)
        .service(friends::get_pair_balances)
        .service(expenses::add_expense)
        .service(expenses::get_expense)
        .service(comments::list_comments)
        .service(comments::add_comment);
}
