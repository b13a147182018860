use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::recipe::{repo::seaorm::SeaOrmRecipeRepository, RecipeService};

use crate::openapi::ApiDoc;

pub mod recipes;

pub type SharedRecipeService = Arc<RecipeService<SeaOrmRecipeRepository>>;

#[derive(Clone)]
pub struct AppState {
    pub service: SharedRecipeService,
}

impl AppState {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmRecipeRepository::new(db));
        Self { service: Arc::new(RecipeService::new(repo)) }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: recipe routes, health and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let recipes = Router::new()
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route("/recipes/", get(recipes::list).post(recipes::create))
        .route("/recipes/search", get(recipes::search))
        .route("/recipes/search/", get(recipes::search))
        .route("/recipes/:id", get(recipes::get).put(recipes::update).delete(recipes::delete))
        .route("/recipes/:id/rate", post(recipes::rate))
        .route("/recipes/:id/comment", post(recipes::comment))
        .route("/recipes/:id/comments", get(recipes::comments))
        .route("/recipes/:id/share", post(recipes::share));

    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    public
        .merge(recipes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
