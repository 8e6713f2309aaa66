use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record. Rows are created out-of-band; only `bio` is written here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i32,
    pub username: String,                // unique lookup key
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub friends_count: i32,
}
