use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct RecipeInputDoc {
    /// 1..=100 characters
    pub title: String,
    /// 1..=1000 characters
    pub ingredients: String,
    /// 1..=2000 characters
    pub instructions: String,
    /// 1..=50 characters
    pub cuisine: String,
    /// 1..=100 characters
    pub dietary_preferences: String,
}

#[derive(ToSchema)]
pub struct RecipeDoc {
    pub id: i32,
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub cuisine: String,
    pub dietary_preferences: String,
    pub average_rating: f64,
}

#[derive(ToSchema)]
pub struct RatingDoc { pub id: i32, pub rating: f64, pub recipe_id: i32 }

#[derive(ToSchema)]
pub struct CommentDoc {
    pub id: i32,
    pub content: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    pub recipe_id: i32,
}

#[derive(ToSchema)]
pub struct RecipeDetailDoc {
    pub id: i32,
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub cuisine: String,
    pub dietary_preferences: String,
    pub average_rating: f64,
    pub ratings: Vec<RatingDoc>,
    pub comments: Vec<CommentDoc>,
}

#[derive(ToSchema)]
pub struct RatingInputDoc {
    /// 0.0..=5.0
    pub rating: f64,
}

#[derive(ToSchema)]
pub struct CommentInputDoc {
    /// 1..=500 characters
    pub content: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::recipes::create,
        crate::routes::recipes::list,
        crate::routes::recipes::get,
        crate::routes::recipes::update,
        crate::routes::recipes::delete,
        crate::routes::recipes::search,
        crate::routes::recipes::rate,
        crate::routes::recipes::comment,
        crate::routes::recipes::comments,
        crate::routes::recipes::share,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            RecipeInputDoc,
            RecipeDoc,
            RatingDoc,
            CommentDoc,
            RecipeDetailDoc,
            RatingInputDoc,
            CommentInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "recipes")
    )
)]
pub struct ApiDoc;
