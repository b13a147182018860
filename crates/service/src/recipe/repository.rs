use async_trait::async_trait;

use super::domain::{comment, rating, recipe, RecipeInput, SearchFilter};
use crate::errors::ServiceError;

/// Repository abstraction for recipe persistence.
///
/// Inputs reaching the repository are already validated by the service.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn insert(&self, input: &RecipeInput) -> Result<recipe::Model, ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<recipe::Model>, ServiceError>;
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<recipe::Model>, ServiceError>;
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<recipe::Model>, ServiceError>;
    /// Overwrite the writable fields; `None` when the id is unknown.
    async fn update(&self, id: i32, input: &RecipeInput) -> Result<Option<recipe::Model>, ServiceError>;
    /// Remove the recipe with its ratings and comments; `false` when the id is unknown.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;

    /// Append a rating and store the recomputed mean on the recipe, as one unit.
    /// `None` when the recipe is unknown.
    async fn add_rating(&self, recipe_id: i32, value: f64) -> Result<Option<recipe::Model>, ServiceError>;
    /// `None` when the recipe is unknown.
    async fn add_comment(&self, recipe_id: i32, content: &str) -> Result<Option<comment::Model>, ServiceError>;
    async fn list_ratings(&self, recipe_id: i32) -> Result<Vec<rating::Model>, ServiceError>;
    async fn list_comments(&self, recipe_id: i32) -> Result<Vec<comment::Model>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct State {
        recipes: BTreeMap<i32, recipe::Model>,
        ratings: Vec<rating::Model>,
        comments: Vec<comment::Model>,
        last_id: i32,
    }

    impl State {
        fn next_id(&mut self) -> i32 {
            self.last_id += 1;
            self.last_id
        }
    }

    #[derive(Default)]
    pub struct MockRecipeRepository {
        state: Mutex<State>,
    }

    impl MockRecipeRepository {
        fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>, ServiceError> {
            self.state.lock().map_err(|_| ServiceError::Db("mock state poisoned".into()))
        }

        /// Row counts `(recipes, ratings, comments)`.
        pub fn counts(&self) -> (usize, usize, usize) {
            self.lock()
                .map(|s| (s.recipes.len(), s.ratings.len(), s.comments.len()))
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl RecipeRepository for MockRecipeRepository {
        async fn insert(&self, input: &RecipeInput) -> Result<recipe::Model, ServiceError> {
            let mut s = self.lock()?;
            let id = s.next_id();
            let m = recipe::Model {
                id,
                title: input.title.clone(),
                ingredients: input.ingredients.clone(),
                instructions: input.instructions.clone(),
                cuisine: input.cuisine.clone(),
                dietary_preferences: input.dietary_preferences.clone(),
                average_rating: 0.0,
            };
            s.recipes.insert(id, m.clone());
            Ok(m)
        }

        async fn get_by_id(&self, id: i32) -> Result<Option<recipe::Model>, ServiceError> {
            Ok(self.lock()?.recipes.get(&id).cloned())
        }

        async fn list(&self, offset: u64, limit: u64) -> Result<Vec<recipe::Model>, ServiceError> {
            let s = self.lock()?;
            Ok(s.recipes.values().skip(offset as usize).take(limit as usize).cloned().collect())
        }

        async fn search(&self, filter: &SearchFilter) -> Result<Vec<recipe::Model>, ServiceError> {
            let s = self.lock()?;
            Ok(s.recipes.values().filter(|r| filter.matches(r)).cloned().collect())
        }

        async fn update(&self, id: i32, input: &RecipeInput) -> Result<Option<recipe::Model>, ServiceError> {
            let mut s = self.lock()?;
            let Some(r) = s.recipes.get_mut(&id) else { return Ok(None) };
            r.title = input.title.clone();
            r.ingredients = input.ingredients.clone();
            r.instructions = input.instructions.clone();
            r.cuisine = input.cuisine.clone();
            r.dietary_preferences = input.dietary_preferences.clone();
            Ok(Some(r.clone()))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut s = self.lock()?;
            if s.recipes.remove(&id).is_none() {
                return Ok(false);
            }
            s.ratings.retain(|r| r.recipe_id != id);
            s.comments.retain(|c| c.recipe_id != id);
            Ok(true)
        }

        async fn add_rating(&self, recipe_id: i32, value: f64) -> Result<Option<recipe::Model>, ServiceError> {
            let mut s = self.lock()?;
            if !s.recipes.contains_key(&recipe_id) {
                return Ok(None);
            }
            let id = s.next_id();
            s.ratings.push(rating::Model { id, rating: value, recipe_id });
            let values: Vec<f64> = s.ratings.iter().filter(|r| r.recipe_id == recipe_id).map(|r| r.rating).collect();
            let avg = rating::mean(&values);
            let r = s.recipes.get_mut(&recipe_id).ok_or_else(|| ServiceError::not_found("Recipe"))?;
            r.average_rating = avg;
            Ok(Some(r.clone()))
        }

        async fn add_comment(&self, recipe_id: i32, content: &str) -> Result<Option<comment::Model>, ServiceError> {
            let mut s = self.lock()?;
            if !s.recipes.contains_key(&recipe_id) {
                return Ok(None);
            }
            let id = s.next_id();
            let c = comment::Model {
                id,
                content: content.to_string(),
                created_at: chrono::Utc::now().into(),
                recipe_id,
            };
            s.comments.push(c.clone());
            Ok(Some(c))
        }

        async fn list_ratings(&self, recipe_id: i32) -> Result<Vec<rating::Model>, ServiceError> {
            Ok(self.lock()?.ratings.iter().filter(|r| r.recipe_id == recipe_id).cloned().collect())
        }

        async fn list_comments(&self, recipe_id: i32) -> Result<Vec<comment::Model>, ServiceError> {
            Ok(self.lock()?.comments.iter().filter(|c| c.recipe_id == recipe_id).cloned().collect())
        }
    }
}
