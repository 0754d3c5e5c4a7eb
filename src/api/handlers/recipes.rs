use crate::{
    api::{
        AppState,
        error::{ApiJson, ApiPath},
    },
    core::recipe,
    entities::recipe::Model,
    errors::{Error, Result},
    models::RecipePayload,
};
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

/// GET /api/recipes
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Model>>> {
    recipe::get_all_recipes(&state.db).await.map(Json)
}

/// GET /api/recipes/:id
pub async fn get_recipe(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Model>> {
    recipe::get_recipe_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or(Error::RecipeNotFound { id })
}

/// POST /api/recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RecipePayload>,
) -> Result<(StatusCode, Json<Model>)> {
    let created = recipe::create_recipe(&state.db, payload).await?;
    info!(recipe_id = created.recipe_id, "Recipe created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/recipes/:id
pub async fn update_recipe(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<RecipePayload>,
) -> Result<Json<Model>> {
    recipe::update_recipe(&state.db, id, payload).await.map(Json)
}

/// DELETE /api/recipes/:id
pub async fn delete_recipe(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Model>> {
    let deleted = recipe::delete_recipe(&state.db, id).await?;
    info!(recipe_id = id, "Recipe deleted");
    Ok(Json(deleted))
}
