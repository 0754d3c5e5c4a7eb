use crate::{
    api::{
        AppState,
        error::{ApiJson, ApiPath},
    },
    core::source,
    entities::ingredient_source::Model,
    errors::{Error, Result},
    models::{IngredientSourceDetail, SourcePayload},
};
use axum::{Json, extract::State, http::StatusCode};

/// GET /api/ingredients/:id/sources
///
/// An empty list is reported as a 404.
pub async fn list_sources(
    State(state): State<AppState>,
    ApiPath(ingredient_id): ApiPath<i64>,
) -> Result<Json<Vec<IngredientSourceDetail>>> {
    let rows = source::get_sources_for_ingredient(&state.db, ingredient_id).await?;
    if rows.is_empty() {
        return Err(Error::SourcesNotFound { ingredient_id });
    }
    Ok(Json(rows))
}

/// POST /api/ingredients/:id/sources
pub async fn add_source(
    State(state): State<AppState>,
    ApiPath(ingredient_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<SourcePayload>,
) -> Result<(StatusCode, Json<Model>)> {
    let created = source::add_source(&state.db, ingredient_id, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/ingredients/:id/sources/:srcId
pub async fn update_source(
    State(state): State<AppState>,
    ApiPath((ingredient_id, source_id)): ApiPath<(i64, i64)>,
    ApiJson(payload): ApiJson<SourcePayload>,
) -> Result<Json<Model>> {
    source::update_source(&state.db, ingredient_id, source_id, payload)
        .await
        .map(Json)
}

/// DELETE /api/ingredients/:id/sources/:srcId
pub async fn delete_source(
    State(state): State<AppState>,
    ApiPath((ingredient_id, source_id)): ApiPath<(i64, i64)>,
) -> Result<Json<Model>> {
    source::delete_source(&state.db, ingredient_id, source_id)
        .await
        .map(Json)
}
