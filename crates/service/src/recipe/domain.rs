use serde::{Deserialize, Serialize};

pub use models::comment::{self, CommentInput};
pub use models::rating::{self, RatingInput};
pub use models::recipe::{self, RecipeInput, SearchFilter};

/// A recipe together with every rating and comment attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: recipe::Model,
    pub ratings: Vec<rating::Model>,
    pub comments: Vec<comment::Model>,
}
