use sqlx::PgPool;

use super::{DbError, UserRepo};
use crate::db::is_unique_violation;
use crate::schemas::{Contact, User, UserId};
use crate::validation::ValidationError;

pub const ALREADY_FRIENDS: &str = "This user is already in your friends list.";

/// Directed friendships stored in `contact_list`.
pub struct ContactRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add the user registered under `friend_email` to `owner_id`'s list.
    /// Only the owner -> contact direction is written.
    pub async fn add(&self, owner_id: UserId, friend_email: &str) -> Result<Contact, DbError> {
        let users = UserRepo::new(self.pool);
        users.get(owner_id).await?;
        let friend = users
            .find_by_email(friend_email.trim())
            .await?
            .ok_or_else(|| DbError::not_found("user", "email", friend_email.trim()))?;

        if friend.id == owner_id {
            return Err(ValidationError::SelfFriendship.into());
        }
        if self.exists(owner_id, friend.id).await? {
            return Err(DbError::conflict(ALREADY_FRIENDS));
        }

        sqlx::query_as::<_, Contact>(
            "INSERT INTO contact_list (list_owner_id, contact_id) VALUES ($1, $2) \
             RETURNING list_owner_id, contact_id",
        )
        .bind(owner_id)
        .bind(friend.id)
        .fetch_one(self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                DbError::conflict(ALREADY_FRIENDS)
            } else {
                DbError::from(err)
            }
        })
    }

    pub async fn exists(&self, owner_id: UserId, contact_id: UserId) -> Result<bool, DbError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM contact_list WHERE list_owner_id = $1 AND contact_id = $2)",
        )
        .bind(owner_id)
        .bind(contact_id)
        .fetch_one(self.pool)
        .await?;
        Ok(exists)
    }

    /// Users on `owner_id`'s contact list.
    pub async fn friends_of(&self, owner_id: UserId) -> Result<Vec<User>, DbError> {
        let friends = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.email
            FROM contact_list c
            JOIN users u ON u.id = c.contact_id
            WHERE c.list_owner_id = $1
            ORDER BY u.id
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;
        Ok(friends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::{seed_user, test_pool, unique_email};

    #[actix_web::test]
    #[ignore = "requires database"]
    async fn unknown_email_writes_nothing() {
        let pool = test_pool().await;
        let owner = seed_user(&pool, "Owner").await;

        let err = ContactRepo::new(&pool)
            .add(owner.id, &unique_email("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { key: "email", .. }));

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_list WHERE list_owner_id = $1")
            .bind(owner.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[actix_web::test]
    #[ignore = "requires database"]
    async fn second_add_is_a_conflict_and_direction_is_kept() {
        let pool = test_pool().await;
        let owner = seed_user(&pool, "Owner").await;
        let friend = seed_user(&pool, "Friend").await;
        let repo = ContactRepo::new(&pool);

        let contact = repo.add(owner.id, &friend.email).await.unwrap();
        assert_eq!(contact.list_owner_id, owner.id);
        assert_eq!(contact.contact_id, friend.id);

        let err = repo.add(owner.id, &friend.email).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));

        assert_eq!(repo.friends_of(owner.id).await.unwrap(), vec![friend.clone()]);
        assert!(repo.friends_of(friend.id).await.unwrap().is_empty());
    }

    #[actix_web::test]
    #[ignore = "requires database"]
    async fn unknown_owner_is_not_found() {
        let pool = test_pool().await;
        let friend = seed_user(&pool, "Friend").await;

        let err = ContactRepo::new(&pool)
            .add(i32::MAX, &friend.email)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::NotFound {
                resource: "user",
                key: "id",
                ..
            }
        ));
    }

    #[actix_web::test]
    #[ignore = "requires database"]
    async fn racing_adds_store_one_contact() {
        let pool = test_pool().await;
        let owner = seed_user(&pool, "Owner").await;
        let friend = seed_user(&pool, "Friend").await;

        let results = futures::future::join_all(
            (0..6).map(|_| async { ContactRepo::new(&pool).add(owner.id, &friend.email).await }),
        )
        .await;
        assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
        for err in results.into_iter().filter_map(Result::err) {
            assert!(matches!(err, DbError::Conflict { .. }), "{err:?}");
        }

        let friends = ContactRepo::new(&pool).friends_of(owner.id).await.unwrap();
        assert_eq!(friends, vec![friend]);
    }

    #[actix_web::test]
    #[ignore = "requires database"]
    async fn adding_yourself_is_rejected() {
        let pool = test_pool().await;
        let owner = seed_user(&pool, "Solo").await;

        let err = ContactRepo::new(&pool).add(owner.id, &owner.email).await.unwrap_err();
        assert!(matches!(err, DbError::Invalid(ValidationError::SelfFriendship)));
    }
}
