use std::sync::Arc;

use common::types::Message;
use tracing::{info, instrument};

use super::domain::{comment, rating, recipe, RecipeDetail, RecipeInput, SearchFilter};
use super::repository::RecipeRepository;
use crate::errors::ServiceError;
use crate::pagination::ListWindow;

const RECIPE: &str = "Recipe";

/// Recipe catalog business service independent of web framework.
///
/// Every operation validates its input before the repository is called.
pub struct RecipeService<R: RecipeRepository> {
    repo: Arc<R>,
}

impl<R: RecipeRepository> Clone for RecipeService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: RecipeRepository> RecipeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a recipe with `average_rating = 0.0` and no relations.
    ///
    /// # Examples
    /// ```
    /// use service::recipe::{RecipeService, repository::mock::MockRecipeRepository, domain::RecipeInput};
    /// use std::sync::Arc;
    /// let svc = RecipeService::new(Arc::new(MockRecipeRepository::default()));
    /// let input = RecipeInput {
    ///     title: "Shakshuka".into(),
    ///     ingredients: "eggs, tomatoes".into(),
    ///     instructions: "Poach the eggs in the sauce.".into(),
    ///     cuisine: "Tunisian".into(),
    ///     dietary_preferences: "vegetarian".into(),
    /// };
    /// let rt = tokio::runtime::Runtime::new().unwrap();
    /// let created = rt.block_on(svc.create(input)).unwrap();
    /// assert_eq!(created.average_rating, 0.0);
    /// ```
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: RecipeInput) -> Result<recipe::Model, ServiceError> {
        input.validate()?;
        let created = self.repo.insert(&input).await?;
        info!(recipe_id = created.id, "recipe_created");
        Ok(created)
    }

    pub async fn list(&self, window: ListWindow) -> Result<Vec<recipe::Model>, ServiceError> {
        let (offset, limit) = window.validate()?;
        self.repo.list(offset, limit).await
    }

    /// The recipe with its ratings and comments.
    pub async fn get(&self, id: i32) -> Result<RecipeDetail, ServiceError> {
        let recipe = self.repo.get_by_id(id).await?.ok_or_else(|| ServiceError::not_found(RECIPE))?;
        self.detail(recipe).await
    }

    /// Full overwrite of the writable fields.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: RecipeInput) -> Result<recipe::Model, ServiceError> {
        input.validate()?;
        let updated = self.repo.update(id, &input).await?.ok_or_else(|| ServiceError::not_found(RECIPE))?;
        info!(recipe_id = id, "recipe_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<Message, ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(RECIPE));
        }
        info!(recipe_id = id, "recipe_deleted");
        Ok(Message::new("Recipe deleted successfully"))
    }

    pub async fn search(&self, filter: SearchFilter) -> Result<Vec<recipe::Model>, ServiceError> {
        self.repo.search(&filter).await
    }

    /// Append a rating, recompute the average from all ratings, and return the recipe.
    #[instrument(skip(self))]
    pub async fn rate(&self, id: i32, value: f64) -> Result<RecipeDetail, ServiceError> {
        let value = rating::validate_rating(value)?;
        let recipe = self.repo.add_rating(id, value).await?.ok_or_else(|| ServiceError::not_found(RECIPE))?;
        info!(recipe_id = id, rating = value, average = recipe.average_rating, "recipe_rated");
        self.detail(recipe).await
    }

    #[instrument(skip(self, content))]
    pub async fn comment(&self, id: i32, content: String) -> Result<RecipeDetail, ServiceError> {
        comment::validate_content(&content)?;
        let created = self.repo.add_comment(id, &content).await?.ok_or_else(|| ServiceError::not_found(RECIPE))?;
        info!(recipe_id = id, comment_id = created.id, "recipe_commented");
        self.get(id).await
    }

    /// Comments of a recipe; an unknown id yields an empty list rather than NotFound.
    pub async fn list_comments(&self, id: i32) -> Result<Vec<comment::Model>, ServiceError> {
        self.repo.list_comments(id).await
    }

    /// Sharing is a stub: nothing is looked up or stored.
    pub fn share(&self, id: i32, share_method: &str) -> Message {
        info!(recipe_id = id, share_method, "recipe_share_requested");
        Message::new(format!("Recipe shared via {share_method}"))
    }

    async fn detail(&self, recipe: recipe::Model) -> Result<RecipeDetail, ServiceError> {
        let ratings = self.repo.list_ratings(recipe.id).await?;
        let comments = self.repo.list_comments(recipe.id).await?;
        Ok(RecipeDetail { recipe, ratings, comments })
    }
}
