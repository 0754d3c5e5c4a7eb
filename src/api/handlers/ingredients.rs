use crate::{
    api::{
        AppState,
        error::{ApiJson, ApiPath},
    },
    core::ingredient,
    entities::ingredient::Model,
    errors::{Error, Result},
    models::IngredientPayload,
};
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

/// GET /api/ingredients
pub async fn list_ingredients(State(state): State<AppState>) -> Result<Json<Vec<Model>>> {
    ingredient::get_all_ingredients(&state.db).await.map(Json)
}

/// GET /api/ingredients/:id
pub async fn get_ingredient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Model>> {
    ingredient::get_ingredient_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or(Error::IngredientNotFound { id })
}

/// POST /api/ingredients
pub async fn create_ingredient(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<IngredientPayload>,
) -> Result<(StatusCode, Json<Model>)> {
    let created = ingredient::create_ingredient(&state.db, payload).await?;
    info!(ingredient_id = created.ingredient_id, "Ingredient created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/ingredients/:id
pub async fn update_ingredient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<IngredientPayload>,
) -> Result<Json<Model>> {
    ingredient::update_ingredient(&state.db, id, payload)
        .await
        .map(Json)
}

/// DELETE /api/ingredients/:id
///
/// Fails with a 500 while a recipe still uses the ingredient.
pub async fn delete_ingredient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Model>> {
    let deleted = ingredient::delete_ingredient(&state.db, id).await?;
    info!(ingredient_id = id, "Ingredient deleted");
    Ok(Json(deleted))
}
