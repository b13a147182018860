use sea_orm::{entity::prelude::*, Condition, ConnectionTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::validate_len;
use crate::{comment, rating};

pub const TITLE_MAX: usize = 100;
pub const INGREDIENTS_MAX: usize = 1000;
pub const INSTRUCTIONS_MAX: usize = 2000;
pub const CUISINE_MAX: usize = 50;
pub const DIETARY_PREFERENCES_MAX: usize = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub ingredients: String,
    #[sea_orm(column_type = "Text")]
    pub instructions: String,
    pub cuisine: String,
    pub dietary_preferences: String,
    pub average_rating: f64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Rating,
    Comment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Rating => Entity::has_many(rating::Entity).into(),
            Relation::Comment => Entity::has_many(comment::Entity).into(),
        }
    }
}

impl Related<rating::Entity> for Entity {
    fn to() -> RelationDef { Relation::Rating.def() }
}

impl Related<comment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Comment.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// The writable fields of a recipe, used for both create and full update.
///
/// Unknown keys such as `id` or `average_rating` are ignored on deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeInput {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub cuisine: String,
    pub dietary_preferences: String,
}

impl RecipeInput {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_len("title", &self.title, TITLE_MAX)?;
        validate_len("ingredients", &self.ingredients, INGREDIENTS_MAX)?;
        validate_len("instructions", &self.instructions, INSTRUCTIONS_MAX)?;
        validate_len("cuisine", &self.cuisine, CUISINE_MAX)?;
        validate_len("dietary_preferences", &self.dietary_preferences, DIETARY_PREFERENCES_MAX)?;
        Ok(())
    }
}

/// Optional search filters; all supplied filters must match.
///
/// Empty strings count as "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub keyword: Option<String>,
    pub cuisine: Option<String>,
    pub dietary_preference: Option<String>,
}

impl SearchFilter {
    pub fn keyword(&self) -> Option<&str> { non_empty(&self.keyword) }
    pub fn cuisine(&self) -> Option<&str> { non_empty(&self.cuisine) }
    pub fn dietary_preference(&self) -> Option<&str> { non_empty(&self.dietary_preference) }

    /// In-process equivalent of the SQL filter, used by non-database stores.
    pub fn matches(&self, r: &Model) -> bool {
        if let Some(k) = self.keyword() {
            if !(r.title.contains(k) || r.ingredients.contains(k)) { return false; }
        }
        if let Some(c) = self.cuisine() {
            if r.cuisine != c { return false; }
        }
        if let Some(d) = self.dietary_preference() {
            if !r.dietary_preferences.contains(d) { return false; }
        }
        true
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

pub async fn create<C: ConnectionTrait>(db: &C, input: &RecipeInput) -> Result<Model, ModelError> {
    input.validate()?;
    let am = ActiveModel {
        title: Set(input.title.clone()),
        ingredients: Set(input.ingredients.clone()),
        instructions: Set(input.instructions.clone()),
        cuisine: Set(input.cuisine.clone()),
        dietary_preferences: Set(input.dietary_preferences.clone()),
        average_rating: Set(0.0),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Recipes in primary-key order, sliced by `offset`/`limit`.
pub async fn list<C: ConnectionTrait>(db: &C, offset: u64, limit: u64) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find()
        .order_by_asc(Column::Id)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn search<C: ConnectionTrait>(db: &C, filter: &SearchFilter) -> Result<Vec<Model>, ModelError> {
    let mut finder = Entity::find();
    if let Some(k) = filter.keyword() {
        finder = finder.filter(
            Condition::any()
                .add(Column::Title.contains(k))
                .add(Column::Ingredients.contains(k)),
        );
    }
    if let Some(c) = filter.cuisine() {
        finder = finder.filter(Column::Cuisine.eq(c));
    }
    if let Some(d) = filter.dietary_preference() {
        finder = finder.filter(Column::DietaryPreferences.contains(d));
    }
    Ok(finder.order_by_asc(Column::Id).all(db).await?)
}

/// Overwrite every writable field; `average_rating` is left alone.
/// Returns `None` when the recipe does not exist.
pub async fn update<C: ConnectionTrait>(db: &C, id: i32, input: &RecipeInput) -> Result<Option<Model>, ModelError> {
    input.validate()?;
    let Some(existing) = find(db, id).await? else { return Ok(None) };
    let mut am: ActiveModel = existing.into();
    am.title = Set(input.title.clone());
    am.ingredients = Set(input.ingredients.clone());
    am.instructions = Set(input.instructions.clone());
    am.cuisine = Set(input.cuisine.clone());
    am.dietary_preferences = Set(input.dietary_preferences.clone());
    Ok(Some(am.update(db).await?))
}

pub async fn set_average_rating<C: ConnectionTrait>(db: &C, id: i32, average: f64) -> Result<Model, ModelError> {
    let existing = find(db, id)
        .await?
        .ok_or_else(|| ModelError::Db(format!("recipe {id} vanished while rating")))?;
    let mut am: ActiveModel = existing.into();
    am.average_rating = Set(average);
    Ok(am.update(db).await?)
}

/// Delete a recipe and its ratings and comments. Returns false if it did not exist.
///
/// Dependents are removed explicitly so the result does not rely on the
/// store enforcing `ON DELETE CASCADE`. Run inside a transaction.
pub async fn delete_with_dependents<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    if find(db, id).await?.is_none() {
        return Ok(false);
    }
    rating::Entity::delete_many()
        .filter(rating::Column::RecipeId.eq(id))
        .exec(db)
        .await?;
    comment::Entity::delete_many()
        .filter(comment::Column::RecipeId.eq(id))
        .exec(db)
        .await?;
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> RecipeInput {
        RecipeInput {
            title: "Chicken curry".into(),
            ingredients: "chicken, curry paste, coconut milk".into(),
            instructions: "Simmer everything.".into(),
            cuisine: "Thai".into(),
            dietary_preferences: "gluten-free, dairy-free".into(),
        }
    }

    fn model(title: &str, ingredients: &str, cuisine: &str, diet: &str) -> Model {
        Model {
            id: 1,
            title: title.into(),
            ingredients: ingredients.into(),
            instructions: "x".into(),
            cuisine: cuisine.into(),
            dietary_preferences: diet.into(),
            average_rating: 0.0,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn each_field_is_bounded() {
        let mut i = input();
        i.title = "t".repeat(TITLE_MAX + 1);
        assert!(i.validate().is_err());

        let mut i = input();
        i.ingredients = String::new();
        assert!(i.validate().is_err());

        let mut i = input();
        i.instructions = "s".repeat(INSTRUCTIONS_MAX + 1);
        assert!(i.validate().is_err());

        let mut i = input();
        i.cuisine = "c".repeat(CUISINE_MAX + 1);
        assert!(i.validate().is_err());

        let mut i = input();
        i.dietary_preferences = String::new();
        assert!(i.validate().is_err());
    }

    #[test]
    fn input_ignores_derived_fields() {
        let v = serde_json::json!({
            "id": 7,
            "title": "Soup",
            "ingredients": "water",
            "instructions": "boil",
            "cuisine": "French",
            "dietary_preferences": "vegan",
            "average_rating": 4.5
        });
        let parsed: RecipeInput = serde_json::from_value(v).unwrap();
        assert_eq!(parsed.title, "Soup");
    }

    #[test]
    fn filter_keyword_matches_title_or_ingredients() {
        let f = SearchFilter { keyword: Some("chicken".into()), ..Default::default() };
        assert!(f.matches(&model("chicken soup", "water", "French", "none")));
        assert!(f.matches(&model("soup", "chicken stock", "French", "none")));
        assert!(!f.matches(&model("soup", "water", "French", "none")));
    }

    #[test]
    fn filter_combines_with_and() {
        let f = SearchFilter {
            keyword: Some("chicken".into()),
            cuisine: Some("Thai".into()),
            dietary_preference: Some("gluten".into()),
        };
        assert!(f.matches(&model("chicken curry", "x", "Thai", "gluten-free")));
        assert!(!f.matches(&model("chicken curry", "x", "Thaiish", "gluten-free")));
        assert!(!f.matches(&model("chicken curry", "x", "Thai", "vegan")));
    }

    #[test]
    fn empty_filters_are_ignored() {
        let f = SearchFilter {
            keyword: Some(String::new()),
            cuisine: Some(String::new()),
            dietary_preference: None,
        };
        assert_eq!(f.keyword(), None);
        assert!(f.matches(&model("anything", "x", "any", "any")));
    }
}
