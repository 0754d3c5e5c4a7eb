//! Recipe business logic - Handles all recipe-related operations.
//!
//! Provides functions for listing, creating, replacing and deleting recipes.
//! Every function issues a single statement; callers that need a recipe and
//! its ingredient links together sequence the calls themselves.

use crate::{
    entities::{Recipe, recipe},
    errors::{Error, Result},
    models::{RecipePayload, required},
};
use sea_orm::{
    ActiveValue::{Set, Unchanged},
    QueryOrder,
    prelude::*,
};
use tracing::{debug, instrument};

/// Retrieves every recipe, ordered by id.
pub async fn get_all_recipes(db: &DatabaseConnection) -> Result<Vec<recipe::Model>> {
    Recipe::find()
        .order_by_asc(recipe::Column::RecipeId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a recipe by its unique ID.
pub async fn get_recipe_by_id(
    db: &DatabaseConnection,
    recipe_id: i64,
) -> Result<Option<recipe::Model>> {
    Recipe::find_by_id(recipe_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new recipe.
///
/// # Errors
/// Returns an error if:
/// - `nom` is missing or blank
/// - The database insert operation fails
#[instrument(skip(db))]
pub async fn create_recipe(db: &DatabaseConnection, payload: RecipePayload) -> Result<recipe::Model> {
    let name = required(payload.name, "nom")?;

    let recipe = recipe::ActiveModel {
        name: Set(name),
        author: Set(payload.author),
        details: Set(payload.details),
        link: Set(payload.link),
        tag: Set(payload.tag),
        ..Default::default()
    };

    let created = recipe.insert(db).await?;
    debug!(recipe_id = created.recipe_id, "Recipe created");
    Ok(created)
}

/// Replaces every mutable field of a recipe.
///
/// Fields absent from the payload are written as null.
///
/// # Errors
/// Returns an error if:
/// - `nom` is missing or blank
/// - No recipe has this id
/// - The database update operation fails
#[instrument(skip(db))]
pub async fn update_recipe(
    db: &DatabaseConnection,
    recipe_id: i64,
    payload: RecipePayload,
) -> Result<recipe::Model> {
    let name = required(payload.name, "nom")?;

    let recipe = recipe::ActiveModel {
        recipe_id: Unchanged(recipe_id),
        name: Set(name),
        author: Set(payload.author),
        details: Set(payload.details),
        link: Set(payload.link),
        tag: Set(payload.tag),
    };

    match recipe.update(db).await {
        Ok(updated) => Ok(updated),
        Err(DbErr::RecordNotUpdated) => Err(Error::RecipeNotFound { id: recipe_id }),
        Err(e) => Err(e.into()),
    }
}

/// Deletes a recipe and, through the foreign key, its ingredient links.
///
/// Returns the deleted row.
///
/// # Errors
/// Returns an error if no recipe has this id or the delete fails.
#[instrument(skip(db))]
pub async fn delete_recipe(db: &DatabaseConnection, recipe_id: i64) -> Result<recipe::Model> {
    let recipe = Recipe::find_by_id(recipe_id)
        .one(db)
        .await?
        .ok_or(Error::RecipeNotFound { id: recipe_id })?;

    recipe.clone().delete(db).await?;
    debug!(recipe_id, "Recipe deleted");
    Ok(recipe)
}
