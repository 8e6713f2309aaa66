use sqlx::MySqlPool;

use super::repo_types::User;
use crate::error::StoreError;

/// Find a user by username; the first match wins.
pub async fn find_by_username(db: &MySqlPool, username: &str) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, username, display_name, bio, avatar_url, friends_count
        FROM users
        WHERE username = ?
        LIMIT 1
        "#,
    )
    .bind(username)
    .fetch_optional(db)
    .await?
    .ok_or(StoreError::NotFound)
}

/// Post contents of one user, in stored order.
pub async fn list_post_contents(db: &MySqlPool, user_id: i32) -> Result<Vec<String>, StoreError> {
    let rows = sqlx::query_scalar::<_, String>(
        r#"
        SELECT content
          FROM posts
         WHERE user_id = ?
         ORDER BY id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Exact-match username lookup.
pub async fn find_username(db: &MySqlPool, keyword: &str) -> Result<String, StoreError> {
    sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE username = ? LIMIT 1")
        .bind(keyword)
        .fetch_optional(db)
        .await?
        .ok_or(StoreError::NotFound)
}

pub async fn find_bio(db: &MySqlPool, username: &str) -> Result<Option<String>, StoreError> {
    sqlx::query_scalar::<_, Option<String>>("SELECT bio FROM users WHERE username = ? LIMIT 1")
        .bind(username)
        .fetch_optional(db)
        .await?
        .ok_or(StoreError::NotFound)
}

pub async fn update_bio(
    db: &MySqlPool,
    username: Option<&str>,
    bio: Option<&str>,
) -> Result<u64, StoreError> {
    let result = sqlx::query("UPDATE users SET bio = ? WHERE username = ?")
        .bind(bio)
        .bind(username)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
