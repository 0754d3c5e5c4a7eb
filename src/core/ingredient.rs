//! Ingredient business logic - Handles all ingredient-related operations.
//!
//! Ingredients can only be deleted once no recipe uses them: the link table
//! references them with `ON DELETE RESTRICT`, so the database refuses the
//! delete and the caller sees a database error. Their purchase sources are
//! removed with them.

use crate::{
    entities::{Ingredient, ingredient},
    errors::{Error, Result},
    models::{IngredientPayload, required},
};
use sea_orm::{
    ActiveValue::{Set, Unchanged},
    QueryOrder,
    prelude::*,
};
use tracing::{debug, instrument};

/// Retrieves every ingredient, ordered by id.
pub async fn get_all_ingredients(db: &DatabaseConnection) -> Result<Vec<ingredient::Model>> {
    Ingredient::find()
        .order_by_asc(ingredient::Column::IngredientId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an ingredient by its unique ID.
pub async fn get_ingredient_by_id(
    db: &DatabaseConnection,
    ingredient_id: i64,
) -> Result<Option<ingredient::Model>> {
    Ingredient::find_by_id(ingredient_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new ingredient.
///
/// # Errors
/// Returns an error if `nom` is missing or blank, or the insert fails.
#[instrument(skip(db))]
pub async fn create_ingredient(
    db: &DatabaseConnection,
    payload: IngredientPayload,
) -> Result<ingredient::Model> {
    let name = required(payload.name, "nom")?;

    let ingredient = ingredient::ActiveModel {
        name: Set(name),
        standard_unit: Set(payload.standard_unit),
        gluten_free: Set(payload.gluten_free),
        fibre: Set(payload.fibre),
        ..Default::default()
    };

    let created = ingredient.insert(db).await?;
    debug!(ingredient_id = created.ingredient_id, "Ingredient created");
    Ok(created)
}

/// Replaces every mutable field of an ingredient; absent fields become null.
///
/// # Errors
/// Returns an error if:
/// - `nom` is missing or blank
/// - No ingredient has this id
/// - The database update operation fails
#[instrument(skip(db))]
pub async fn update_ingredient(
    db: &DatabaseConnection,
    ingredient_id: i64,
    payload: IngredientPayload,
) -> Result<ingredient::Model> {
    let name = required(payload.name, "nom")?;

    let ingredient = ingredient::ActiveModel {
        ingredient_id: Unchanged(ingredient_id),
        name: Set(name),
        standard_unit: Set(payload.standard_unit),
        gluten_free: Set(payload.gluten_free),
        fibre: Set(payload.fibre),
    };

    match ingredient.update(db).await {
        Ok(updated) => Ok(updated),
        Err(DbErr::RecordNotUpdated) => Err(Error::IngredientNotFound { id: ingredient_id }),
        Err(e) => Err(e.into()),
    }
}

/// Deletes an ingredient and returns the deleted row.
///
/// # Errors
/// Returns an error if no ingredient has this id, or if a recipe still uses
/// it (foreign-key violation reported by the database).
#[instrument(skip(db))]
pub async fn delete_ingredient(
    db: &DatabaseConnection,
    ingredient_id: i64,
) -> Result<ingredient::Model> {
    let ingredient = Ingredient::find_by_id(ingredient_id)
        .one(db)
        .await?
        .ok_or(Error::IngredientNotFound { id: ingredient_id })?;

    ingredient.clone().delete(db).await?;
    debug!(ingredient_id, "Ingredient deleted");
    Ok(ingredient)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{recipe_ingredient, source};
    use crate::models::{LinkPayload, SourcePayload};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_ingredient_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_ingredient(
            &db,
            IngredientPayload {
                fibre: Some(2.0),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::MissingField { field: "nom" }
        ));
        assert!(get_all_ingredients(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_get_ingredient() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_ingredient(
            &db,
            IngredientPayload {
                name: Some("Oats".to_string()),
                standard_unit: Some("g".to_string()),
                gluten_free: Some(false),
                fibre: Some(10.6),
            },
        )
        .await?;

        let found = get_ingredient_by_id(&db, created.ingredient_id)
            .await?
            .unwrap();
        assert_eq!(found.name, "Oats");
        assert_eq!(found.standard_unit.as_deref(), Some("g"));
        assert_eq!(found.gluten_free, Some(false));
        assert_eq!(found.fibre, Some(10.6));

        assert!(get_ingredient_by_id(&db, 999).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_ingredient_full_replace() -> Result<()> {
        let db = setup_test_db().await?;
        let ingredient = create_custom_ingredient(&db, "Rice", Some(1.3)).await?;

        let updated = update_ingredient(
            &db,
            ingredient.ingredient_id,
            IngredientPayload {
                name: Some("Brown rice".to_string()),
                gluten_free: Some(true),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.name, "Brown rice");
        assert_eq!(updated.gluten_free, Some(true));
        assert_eq!(updated.fibre, None);
        assert_eq!(updated.standard_unit, None);

        let missing = update_ingredient(
            &db,
            999,
            IngredientPayload {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(
            missing.unwrap_err(),
            Error::IngredientNotFound { id: 999 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_ingredient_cascades_sources() -> Result<()> {
        let db = setup_test_db().await?;
        let ingredient = create_test_ingredient(&db, "Flour").await?;
        source::add_source(
            &db,
            ingredient.ingredient_id,
            SourcePayload {
                place: Some("Market".to_string()),
                ..Default::default()
            },
        )
        .await?;

        let deleted = delete_ingredient(&db, ingredient.ingredient_id).await?;
        assert_eq!(deleted.ingredient_id, ingredient.ingredient_id);
        assert!(
            source::get_sources_for_ingredient(&db, ingredient.ingredient_id)
                .await?
                .is_empty()
        );

        let again = delete_ingredient(&db, ingredient.ingredient_id).await;
        assert!(matches!(
            again.unwrap_err(),
            Error::IngredientNotFound { .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_ingredient_used_by_recipe_is_refused() -> Result<()> {
        let (db, recipe, ingredient) = setup_with_recipe_and_ingredient().await?;
        recipe_ingredient::add_link(
            &db,
            recipe.recipe_id,
            LinkPayload {
                ingredient_id: Some(ingredient.ingredient_id),
                quantity: Some(200.0),
                ..Default::default()
            },
        )
        .await?;

        let result = delete_ingredient(&db, ingredient.ingredient_id).await;
        assert!(matches!(result.unwrap_err(), Error::Database(_)));

        // Still there
        assert!(
            get_ingredient_by_id(&db, ingredient.ingredient_id)
                .await?
                .is_some()
        );
        Ok(())
    }
}
