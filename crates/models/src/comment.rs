use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::recipe;
use crate::validation::validate_len;

pub const CONTENT_MAX: usize = 500;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentInput {
    pub content: String,
}

pub fn validate_content(content: &str) -> Result<(), ModelError> {
    validate_len("content", content, CONTENT_MAX)
}

pub async fn create<C: ConnectionTrait>(db: &C, recipe_id: i32, content: &str) -> Result<Model, ModelError> {
    validate_content(content)?;
    let am = ActiveModel {
        content: Set(content.to_string()),
        created_at: Set(Utc::now().into()),
        recipe_id: Set(recipe_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Comments of a recipe in insertion order. An unknown recipe yields an empty list.
pub async fn list_for_recipe<C: ConnectionTrait>(db: &C, recipe_id: i32) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find()
        .filter(Column::RecipeId.eq(recipe_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}
