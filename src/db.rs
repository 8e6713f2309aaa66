use anyhow::Context;
use async_trait::async_trait;
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};

use crate::config::AppConfig;
use crate::error::StoreError;
use crate::messages::{repo as message_repo, Message};
use crate::profiles::{repo as profile_repo, User};

/// Parameterized query surface the handlers depend on.
///
/// Lookups that need a row report [`StoreError::NotFound`] when nothing
/// matches; everything else surfaces as [`StoreError::Datastore`].
#[async_trait]
pub trait Datastore: Send + Sync {
    async fn list_messages(&self) -> Result<Vec<Message>, StoreError>;
    async fn insert_message(
        &self,
        username: Option<&str>,
        content: Option<&str>,
    ) -> Result<(), StoreError>;

    async fn find_user(&self, username: &str) -> Result<User, StoreError>;
    async fn list_post_contents(&self, user_id: i32) -> Result<Vec<String>, StoreError>;
    async fn find_username(&self, keyword: &str) -> Result<String, StoreError>;
    async fn find_bio(&self, username: &str) -> Result<Option<String>, StoreError>;
    /// Returns the number of affected rows; zero is not an error.
    async fn update_bio(
        &self,
        username: Option<&str>,
        bio: Option<&str>,
    ) -> Result<u64, StoreError>;
}

pub async fn connect(config: &AppConfig) -> anyhow::Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")
}

/// Applies the bootstrap schema. The database is normally provisioned
/// elsewhere, so a failure only warns.
pub async fn migrate(pool: &MySqlPool) {
    if let Err(e) = sqlx::migrate!("./migrations").run(pool).await {
        tracing::warn!(error = %e, "migrations failed; continuing with existing schema");
    }
}

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Datastore for MySqlStore {
    async fn list_messages(&self) -> Result<Vec<Message>, StoreError> {
        message_repo::list_newest_first(&self.pool).await
    }

    async fn insert_message(
        &self,
        username: Option<&str>,
        content: Option<&str>,
    ) -> Result<(), StoreError> {
        message_repo::insert(&self.pool, username, content).await
    }

    async fn find_user(&self, username: &str) -> Result<User, StoreError> {
        profile_repo::find_by_username(&self.pool, username).await
    }

    async fn list_post_contents(&self, user_id: i32) -> Result<Vec<String>, StoreError> {
        profile_repo::list_post_contents(&self.pool, user_id).await
    }

    async fn find_username(&self, keyword: &str) -> Result<String, StoreError> {
        profile_repo::find_username(&self.pool, keyword).await
    }

    async fn find_bio(&self, username: &str) -> Result<Option<String>, StoreError> {
        profile_repo::find_bio(&self.pool, username).await
    }

    async fn update_bio(
        &self,
        username: Option<&str>,
        bio: Option<&str>,
    ) -> Result<u64, StoreError> {
        profile_repo::update_bio(&self.pool, username, bio).await
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use time::OffsetDateTime;

    use super::Datastore;
    use crate::error::StoreError;
    use crate::messages::Message;
    use crate::profiles::User;

    #[derive(Default)]
    struct Tables {
        messages: Vec<Message>,
        users: Vec<User>,
        posts: Vec<(i32, String)>,
    }

    /// In-memory tables with a switch that makes every call fail before
    /// touching any row.
    #[derive(Default)]
    pub struct MemoryStore {
        tables: Mutex<Tables>,
        failing: AtomicBool,
        failing_posts: AtomicBool,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_user(&self, username: &str, display_name: &str, bio: Option<&str>) -> i32 {
            let mut t = self.tables.lock().unwrap();
            let user_id = t.users.len() as i32 + 1;
            t.users.push(User {
                user_id,
                username: username.into(),
                display_name: Some(display_name.into()),
                bio: bio.map(Into::into),
                avatar_url: Some(format!("/avatars/{username}.png")),
                friends_count: 3,
            });
            user_id
        }

        pub fn add_post(&self, user_id: i32, content: &str) {
            self.tables
                .lock()
                .unwrap()
                .posts
                .push((user_id, content.into()));
        }

        pub fn message_count(&self) -> usize {
            self.tables.lock().unwrap().messages.len()
        }

        pub fn bio_of(&self, username: &str) -> Option<String> {
            let t = self.tables.lock().unwrap();
            t.users
                .iter()
                .find(|u| u.username == username)
                .and_then(|u| u.bio.clone())
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        /// Fails only the post lookup, so the user lookup before it still succeeds.
        pub fn set_failing_posts(&self, failing: bool) {
            self.failing_posts.store(failing, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Datastore(sqlx::Error::PoolClosed));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Datastore for MemoryStore {
        async fn list_messages(&self) -> Result<Vec<Message>, StoreError> {
            self.check()?;
            let mut rows = self.tables.lock().unwrap().messages.clone();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(rows)
        }

        async fn insert_message(
            &self,
            username: Option<&str>,
            content: Option<&str>,
        ) -> Result<(), StoreError> {
            self.check()?;
            // NOT NULL columns
            let (Some(username), Some(content)) = (username, content) else {
                return Err(StoreError::Datastore(sqlx::Error::Protocol(
                    "column cannot be null".into(),
                )));
            };
            let mut t = self.tables.lock().unwrap();
            let id = t.messages.len() as i32 + 1;
            t.messages.push(Message {
                id,
                username: username.into(),
                content: content.into(),
                created_at: OffsetDateTime::now_utc(),
            });
            Ok(())
        }

        async fn find_user(&self, username: &str) -> Result<User, StoreError> {
            self.check()?;
            let t = self.tables.lock().unwrap();
            t.users
                .iter()
                .find(|u| u.username == username)
                .cloned()
                .ok_or(StoreError::NotFound)
        }

        async fn list_post_contents(&self, user_id: i32) -> Result<Vec<String>, StoreError> {
            self.check()?;
            if self.failing_posts.load(Ordering::SeqCst) {
                return Err(StoreError::Datastore(sqlx::Error::PoolClosed));
            }
            let t = self.tables.lock().unwrap();
            Ok(t.posts
                .iter()
                .filter(|(owner, _)| *owner == user_id)
                .map(|(_, content)| content.clone())
                .collect())
        }

        async fn find_username(&self, keyword: &str) -> Result<String, StoreError> {
            self.find_user(keyword).await.map(|u| u.username)
        }

        async fn find_bio(&self, username: &str) -> Result<Option<String>, StoreError> {
            self.find_user(username).await.map(|u| u.bio)
        }

        async fn update_bio(
            &self,
            username: Option<&str>,
            bio: Option<&str>,
        ) -> Result<u64, StoreError> {
            self.check()?;
            let Some(username) = username else {
                return Ok(0);
            };
            let mut t = self.tables.lock().unwrap();
            let mut affected = 0;
            for user in t.users.iter_mut().filter(|u| u.username == username) {
                user.bio = bio.map(Into::into);
                affected += 1;
            }
            Ok(affected)
        }
    }

    #[tokio::test]
    async fn messages_list_newest_first() {
        let store = MemoryStore::new();
        store.insert_message(Some("a"), Some("first")).await.unwrap();
        store.insert_message(Some("b"), Some("second")).await.unwrap();
        let rows = store.list_messages().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].content, "second");
        assert_eq!(rows[1].content, "first");
    }

    #[tokio::test]
    async fn failing_store_leaves_rows_untouched() {
        let store = MemoryStore::new();
        store.add_user("alice", "Alice", Some("old"));
        store.set_failing(true);
        assert!(store.insert_message(Some("a"), Some("x")).await.is_err());
        assert!(store.update_bio(Some("alice"), Some("new")).await.is_err());
        assert_eq!(store.message_count(), 0);
        assert_eq!(store.bio_of("alice").as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn update_bio_for_unknown_user_affects_nothing() {
        let store = MemoryStore::new();
        let affected = store.update_bio(Some("ghost"), Some("boo")).await.unwrap();
        assert_eq!(affected, 0);
    }
}
