use std::sync::Arc;

use sea_orm::{DatabaseConnection, TransactionTrait};
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::ServiceError;
use crate::recipe::domain::{comment, rating, recipe, RecipeInput, SearchFilter};
use crate::recipe::repository::RecipeRepository;

/// SeaORM-backed repository implementation.
///
/// Each call borrows a pooled connection (or a transaction holding one) and
/// hands it back to the pool when the call returns, on success or error.
///
/// Writes are serialized through `write_lock`. A SQLite transaction that
/// reads before it writes cannot upgrade its lock while another pooled
/// connection is writing and fails with `database is locked` instead of
/// waiting, so only one writer may be in flight. Reads stay concurrent.
#[derive(Clone)]
pub struct SeaOrmRecipeRepository {
    pub db: DatabaseConnection,
    write_lock: Arc<Mutex<()>>,
}

impl SeaOrmRecipeRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db, write_lock: Arc::new(Mutex::new(())) } }
}

#[async_trait::async_trait]
impl RecipeRepository for SeaOrmRecipeRepository {
    async fn insert(&self, input: &RecipeInput) -> Result<recipe::Model, ServiceError> {
        let _write = self.write_lock.lock().await;
        Ok(recipe::create(&self.db, input).await?)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<recipe::Model>, ServiceError> {
        Ok(recipe::find(&self.db, id).await?)
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<recipe::Model>, ServiceError> {
        Ok(recipe::list(&self.db, offset, limit).await?)
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<recipe::Model>, ServiceError> {
        Ok(recipe::search(&self.db, filter).await?)
    }

    async fn update(&self, id: i32, input: &RecipeInput) -> Result<Option<recipe::Model>, ServiceError> {
        let _write = self.write_lock.lock().await;
        Ok(recipe::update(&self.db, id, input).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let _write = self.write_lock.lock().await;
        let txn = self.db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        let deleted = recipe::delete_with_dependents(&txn, id).await?;
        txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(deleted)
    }

    // Insert, re-read and average in one transaction under the write lock;
    // the stored mean always covers every committed rating.
    async fn add_rating(&self, recipe_id: i32, value: f64) -> Result<Option<recipe::Model>, ServiceError> {
        let _write = self.write_lock.lock().await;
        let txn = self.db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        if recipe::find(&txn, recipe_id).await?.is_none() {
            debug!(recipe_id, "rating for unknown recipe");
            txn.rollback().await.map_err(|e| ServiceError::Db(e.to_string()))?;
            return Ok(None);
        }
        rating::create(&txn, recipe_id, value).await?;
        let updated = rating::refresh_average(&txn, recipe_id).await?;
        txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(Some(updated))
    }

    async fn add_comment(&self, recipe_id: i32, content: &str) -> Result<Option<comment::Model>, ServiceError> {
        let _write = self.write_lock.lock().await;
        let txn = self.db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        if recipe::find(&txn, recipe_id).await?.is_none() {
            debug!(recipe_id, "comment for unknown recipe");
            txn.rollback().await.map_err(|e| ServiceError::Db(e.to_string()))?;
            return Ok(None);
        }
        let created = comment::create(&txn, recipe_id, content).await?;
        txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(Some(created))
    }

    async fn list_ratings(&self, recipe_id: i32) -> Result<Vec<rating::Model>, ServiceError> {
        Ok(rating::list_for_recipe(&self.db, recipe_id).await?)
    }

    async fn list_comments(&self, recipe_id: i32) -> Result<Vec<comment::Model>, ServiceError> {
        Ok(comment::list_for_recipe(&self.db, recipe_id).await?)
    }
}
