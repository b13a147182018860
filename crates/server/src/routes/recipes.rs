use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use common::types::Message;
use serde::Deserialize;
use service::pagination::{ListWindow, DEFAULT_LIMIT};
use service::recipe::domain::{comment, recipe, CommentInput, RatingInput, RecipeDetail, RecipeInput, SearchFilter};
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// rows to skip (default 0)
    pub skip: Option<i64>,
    /// rows to return (default 100)
    pub limit: Option<i64>,
}

impl From<ListQuery> for ListWindow {
    fn from(q: ListQuery) -> Self {
        ListWindow { skip: q.skip.unwrap_or(0), limit: q.limit.unwrap_or(DEFAULT_LIMIT) }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// substring of title or ingredients
    pub keyword: Option<String>,
    /// exact cuisine
    pub cuisine: Option<String>,
    /// substring of dietary preferences
    pub dietary_preference: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShareQuery {
    pub share_method: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShareInput {
    pub share_method: Option<String>,
}

#[utoipa::path(
    post, path = "/recipes/", tag = "recipes",
    request_body = crate::openapi::RecipeInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::RecipeDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(State(state): State<AppState>, Json(input): Json<RecipeInput>) -> Result<Json<recipe::Model>, JsonApiError> {
    Ok(Json(state.service.create(input).await?))
}

#[utoipa::path(
    get, path = "/recipes/", tag = "recipes",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::RecipeDoc]),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<recipe::Model>>, JsonApiError> {
    let rows = state.service.list(q.into()).await?;
    info!(count = rows.len(), "list recipes");
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/recipes/{id}", tag = "recipes",
    params(("id" = i32, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe with ratings and comments", body = crate::openapi::RecipeDetailDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<RecipeDetail>, JsonApiError> {
    Ok(Json(state.service.get(id).await?))
}

#[utoipa::path(
    put, path = "/recipes/{id}", tag = "recipes",
    params(("id" = i32, Path, description = "Recipe id")),
    request_body = crate::openapi::RecipeInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::RecipeDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<RecipeInput>,
) -> Result<Json<recipe::Model>, JsonApiError> {
    Ok(Json(state.service.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/recipes/{id}", tag = "recipes",
    params(("id" = i32, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Message>, JsonApiError> {
    Ok(Json(state.service.delete(id).await?))
}

#[utoipa::path(
    get, path = "/recipes/search/", tag = "recipes",
    params(SearchQuery),
    responses((status = 200, description = "Matching recipes", body = [crate::openapi::RecipeDoc]))
)]
pub async fn search(State(state): State<AppState>, Query(q): Query<SearchQuery>) -> Result<Json<Vec<recipe::Model>>, JsonApiError> {
    let filter = SearchFilter { keyword: q.keyword, cuisine: q.cuisine, dietary_preference: q.dietary_preference };
    let rows = state.service.search(filter).await?;
    info!(count = rows.len(), "search recipes");
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/recipes/{id}/rate", tag = "recipes",
    params(("id" = i32, Path, description = "Recipe id")),
    request_body = crate::openapi::RatingInputDoc,
    responses(
        (status = 200, description = "Rated", body = crate::openapi::RecipeDetailDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn rate(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<RatingInput>,
) -> Result<Json<RecipeDetail>, JsonApiError> {
    Ok(Json(state.service.rate(id, input.rating).await?))
}

#[utoipa::path(
    post, path = "/recipes/{id}/comment", tag = "recipes",
    params(("id" = i32, Path, description = "Recipe id")),
    request_body = crate::openapi::CommentInputDoc,
    responses(
        (status = 200, description = "Commented", body = crate::openapi::RecipeDetailDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn comment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<CommentInput>,
) -> Result<Json<RecipeDetail>, JsonApiError> {
    Ok(Json(state.service.comment(id, input.content).await?))
}

#[utoipa::path(
    get, path = "/recipes/{id}/comments", tag = "recipes",
    params(("id" = i32, Path, description = "Recipe id")),
    responses((status = 200, description = "Comments in insertion order", body = [crate::openapi::CommentDoc]))
)]
pub async fn comments(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Vec<comment::Model>>, JsonApiError> {
    Ok(Json(state.service.list_comments(id).await?))
}

#[utoipa::path(
    post, path = "/recipes/{id}/share", tag = "recipes",
    params(("id" = i32, Path, description = "Recipe id"), ShareQuery),
    responses(
        (status = 200, description = "Share acknowledged", body = crate::openapi::MessageDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn share(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(q): Query<ShareQuery>,
    body: Option<Json<ShareInput>>,
) -> Result<Json<Message>, JsonApiError> {
    let method = q
        .share_method
        .or_else(|| body.and_then(|Json(b)| b.share_method))
        .filter(|m| !m.is_empty())
        .ok_or_else(|| JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some("share_method is required".into())))?;
    Ok(Json(state.service.share(id, &method)))
}
