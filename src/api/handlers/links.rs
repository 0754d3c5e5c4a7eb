use crate::{
    api::{
        AppState,
        error::{ApiJson, ApiPath},
    },
    core::{reconcile::LinkOp, recipe_ingredient},
    entities::recipe_ingredient::Model,
    errors::{Error, Result},
    models::{LinkPayload, LinkUpdatePayload, RecipeIngredientDetail},
};
use axum::{Json, extract::State, http::StatusCode};

/// GET /api/recipes/:id/ingredients
///
/// An empty list is reported as a 404.
pub async fn list_recipe_ingredients(
    State(state): State<AppState>,
    ApiPath(recipe_id): ApiPath<i64>,
) -> Result<Json<Vec<RecipeIngredientDetail>>> {
    let rows = recipe_ingredient::get_recipe_ingredients(&state.db, recipe_id).await?;
    if rows.is_empty() {
        return Err(Error::RecipeIngredientsNotFound { recipe_id });
    }
    Ok(Json(rows))
}

/// POST /api/recipes/:id/ingredients
pub async fn add_recipe_ingredient(
    State(state): State<AppState>,
    ApiPath(recipe_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<LinkPayload>,
) -> Result<(StatusCode, Json<Model>)> {
    let created = recipe_ingredient::add_link(&state.db, recipe_id, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/recipes/:id/ingredients/:ingId
pub async fn update_recipe_ingredient(
    State(state): State<AppState>,
    ApiPath((recipe_id, ingredient_id)): ApiPath<(i64, i64)>,
    ApiJson(payload): ApiJson<LinkUpdatePayload>,
) -> Result<Json<Model>> {
    recipe_ingredient::update_link(&state.db, recipe_id, ingredient_id, payload)
        .await
        .map(Json)
}

/// DELETE /api/recipes/:id/ingredients/:ingId
pub async fn remove_recipe_ingredient(
    State(state): State<AppState>,
    ApiPath((recipe_id, ingredient_id)): ApiPath<(i64, i64)>,
) -> Result<Json<Model>> {
    recipe_ingredient::remove_link(&state.db, recipe_id, ingredient_id)
        .await
        .map(Json)
}

/// PUT /api/recipes/:id/ingredients
///
/// Replaces the whole ingredient list in one transaction and returns the
/// operations that were applied.
pub async fn sync_recipe_ingredients(
    State(state): State<AppState>,
    ApiPath(recipe_id): ApiPath<i64>,
    ApiJson(entries): ApiJson<Vec<LinkPayload>>,
) -> Result<Json<Vec<LinkOp>>> {
    recipe_ingredient::sync_links(&state.db, recipe_id, entries)
        .await
        .map(Json)
}
