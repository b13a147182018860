use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::recipe;

pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 5.0;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rating")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub rating: f64,
    pub recipe_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Recipe }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Recipe => Entity::belongs_to(recipe::Entity)
                .from(Column::RecipeId)
                .to(recipe::Column::Id)
                .into(),
        }
    }
}

impl Related<recipe::Entity> for Entity {
    fn to() -> RelationDef { Relation::Recipe.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingInput {
    pub rating: f64,
}

pub fn validate_rating(value: f64) -> Result<f64, ModelError> {
    if !value.is_finite() || !(RATING_MIN..=RATING_MAX).contains(&value) {
        return Err(ModelError::Validation(format!(
            "rating must be between {RATING_MIN} and {RATING_MAX}"
        )));
    }
    Ok(value)
}

/// Arithmetic mean of every value; 0.0 for none.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub async fn create<C: ConnectionTrait>(db: &C, recipe_id: i32, value: f64) -> Result<Model, ModelError> {
    let value = validate_rating(value)?;
    let am = ActiveModel {
        rating: Set(value),
        recipe_id: Set(recipe_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn list_for_recipe<C: ConnectionTrait>(db: &C, recipe_id: i32) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find()
        .filter(Column::RecipeId.eq(recipe_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Re-read every rating of the recipe and store their mean on it.
pub async fn refresh_average<C: ConnectionTrait>(db: &C, recipe_id: i32) -> Result<recipe::Model, ModelError> {
    let values: Vec<f64> = list_for_recipe(db, recipe_id)
        .await?
        .into_iter()
        .map(|r| r.rating)
        .collect();
    recipe::set_average_rating(db, recipe_id, mean(&values)).await
}
