#![cfg(test)]
use std::path::PathBuf;

use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_in_memory, connect_with_config};

/// Fresh migrated in-memory database; each test gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Migrated SQLite file under a unique temp dir, pooled with the default
/// bounds so several connections compete for the write lock.
pub struct FileDb {
    pub db: DatabaseConnection,
    dir: PathBuf,
}

impl FileDb {
    pub async fn new() -> Result<Self, anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("recipe-catalog-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir)?;
        let cfg = configs::DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", dir.join("recipes.db").display()),
            ..Default::default()
        };
        let db = connect_with_config(&cfg).await?;
        migration::Migrator::up(&db, None).await?;
        Ok(Self { db, dir })
    }
}

impl Drop for FileDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}
