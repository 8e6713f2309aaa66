use sqlx::MySqlPool;

use super::repo_types::Message;
use crate::error::StoreError;

pub async fn list_newest_first(db: &MySqlPool) -> Result<Vec<Message>, StoreError> {
    let rows = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, username, content, created_at
        FROM messages
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// `created_at` is filled in by the column default.
pub async fn insert(
    db: &MySqlPool,
    username: Option<&str>,
    content: Option<&str>,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        INSERT INTO messages (username, content)
        VALUES (?, ?)
        "#,
    )
    .bind(username)
    .bind(content)
    .execute(db)
    .await?;
    Ok(())
}
