use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub views_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let views_dir = std::env::var("VIEWS_DIR").unwrap_or_else(|_| "views".into());
        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "public".into());
        Ok(Self {
            database_url,
            max_connections,
            views_dir: views_dir.into(),
            static_dir: static_dir.into(),
        })
    }
}
