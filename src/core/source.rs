//! Ingredient source business logic - Where each ingredient can be bought.
//!
//! Sources are always addressed through their ingredient: modifying or
//! deleting `(ingredient_id, source_id)` only matches a source that belongs to
//! that ingredient, so a wrong ingredient id is a not-found and never touches
//! another ingredient's sources.

use crate::{
    entities::{IngredientSource, ingredient, ingredient_source},
    errors::{Error, Result},
    models::{IngredientSourceDetail, SourcePayload, required},
};
use sea_orm::{
    ActiveValue::Set,
    JoinType, QueryOrder, QuerySelect, RelationTrait,
    prelude::*,
};
use tracing::{debug, instrument};

/// Lists the sources of an ingredient together with the ingredient name.
pub async fn get_sources_for_ingredient(
    db: &DatabaseConnection,
    ingredient_id: i64,
) -> Result<Vec<IngredientSourceDetail>> {
    IngredientSource::find()
        .select_only()
        .column(ingredient_source::Column::SourceId)
        .column_as(ingredient::Column::IngredientId, "ingredient_id")
        .column_as(ingredient::Column::Name, "ingredient_name")
        .column_as(ingredient_source::Column::Place, "place")
        .column_as(ingredient_source::Column::Price, "price")
        .column_as(ingredient_source::Column::PurchaseQuantity, "purchase_quantity")
        .join(JoinType::InnerJoin, ingredient_source::Relation::Ingredient.def())
        .filter(ingredient_source::Column::IngredientId.eq(ingredient_id))
        .order_by_asc(ingredient_source::Column::SourceId)
        .into_model::<IngredientSourceDetail>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds a purchase source to an ingredient.
///
/// # Errors
/// Returns an error if `lieu` is missing or blank, or the ingredient does not
/// exist (foreign-key violation).
#[instrument(skip(db))]
pub async fn add_source(
    db: &DatabaseConnection,
    ingredient_id: i64,
    payload: SourcePayload,
) -> Result<ingredient_source::Model> {
    let place = required(payload.place, "lieu")?;

    let source = ingredient_source::ActiveModel {
        ingredient_id: Set(ingredient_id),
        place: Set(place),
        price: Set(payload.price),
        purchase_quantity: Set(payload.purchase_quantity),
        ..Default::default()
    };

    let created = source.insert(db).await?;
    debug!(source_id = created.source_id, ingredient_id, "Source added");
    Ok(created)
}

/// Replaces place, price and purchase quantity of a source; absent optional
/// fields become null.
///
/// # Errors
/// Returns an error if:
/// - `lieu` is missing or blank
/// - The source does not exist for this ingredient
/// - The database update operation fails
#[instrument(skip(db))]
pub async fn update_source(
    db: &DatabaseConnection,
    ingredient_id: i64,
    source_id: i64,
    payload: SourcePayload,
) -> Result<ingredient_source::Model> {
    let place = required(payload.place, "lieu")?;

    let mut source: ingredient_source::ActiveModel =
        find_source(db, ingredient_id, source_id).await?.into();

    source.place = Set(place);
    source.price = Set(payload.price);
    source.purchase_quantity = Set(payload.purchase_quantity);

    source.update(db).await.map_err(Into::into)
}

/// Deletes a source of an ingredient and returns the deleted row.
///
/// # Errors
/// Returns an error if the source does not exist for this ingredient or the delete fails.
#[instrument(skip(db))]
pub async fn delete_source(
    db: &DatabaseConnection,
    ingredient_id: i64,
    source_id: i64,
) -> Result<ingredient_source::Model> {
    let source = find_source(db, ingredient_id, source_id).await?;

    source.clone().delete(db).await?;
    debug!(source_id, ingredient_id, "Source deleted");
    Ok(source)
}

/// Looks a source up through the ingredient it must belong to.
async fn find_source(
    db: &DatabaseConnection,
    ingredient_id: i64,
    source_id: i64,
) -> Result<ingredient_source::Model> {
    IngredientSource::find_by_id(source_id)
        .filter(ingredient_source::Column::IngredientId.eq(ingredient_id))
        .one(db)
        .await?
        .ok_or(Error::SourceNotFound {
            ingredient_id,
            source_id,
        })
}
