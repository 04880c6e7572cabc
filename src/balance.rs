use futures::try_join;
use sqlx::PgPool;

use crate::repo::{ContactRepo, DbError, TransactionRepo, UserRepo};
use crate::schemas::{PairBalances, UserId, UserSummary};

/// Friends plus every borrow and lend line for `user_id`. Lines are not
/// netted: the same pair shows up once per transaction.
pub async fn user_summary(pool: &PgPool, user_id: UserId) -> Result<UserSummary, DbError> {
    UserRepo::new(pool).get(user_id).await?;

    let contacts = ContactRepo::new(pool);
    let transactions = TransactionRepo::new(pool);
    let (friends, money_borrowed, money_lent) = try_join!(
        contacts.friends_of(user_id),
        transactions.borrowed_by(user_id),
        transactions.lent_by(user_id),
    )?;

    Ok(UserSummary {
        friends,
        money_borrowed,
        money_lent,
    })
}

/// Both directions of lending between two users. `user_id` is resolved
/// before `friend_id`, so the first missing one is reported.
pub async fn pair_balances(
    pool: &PgPool,
    user_id: UserId,
    friend_id: UserId,
) -> Result<PairBalances, DbError> {
    let users = UserRepo::new(pool);
    users.get(user_id).await?;
    users.get(friend_id).await?;

    let transactions = TransactionRepo::new(pool);
    let (money_borrowed, money_lent) = try_join!(
        transactions.between(friend_id, user_id),
        transactions.between(user_id, friend_id),
    )?;

    Ok(PairBalances {
        money_borrowed,
        money_lent,
    })
}
