//! Recipe ingredient business logic - Handles the links between recipes and ingredients.
//!
//! A link is addressed by its `(recipe_id, ingredient_id)` pair. The existence of
//! either side is not checked here: the foreign keys on the link table reject
//! dangling ids and the primary key rejects adding the same ingredient twice,
//! both surfacing as [`Error::Database`].
//!
//! The link functions are generic over [`ConnectionTrait`] so they run the same
//! way on a plain connection and inside a transaction ([`sync_links`]).

use crate::{
    core::reconcile::{LinkEntry, LinkOp, LinkStore, reconcile},
    entities::{Recipe, RecipeIngredient, ingredient, recipe_ingredient},
    errors::{Error, Result},
    models::{LinkPayload, LinkUpdatePayload, RecipeIngredientDetail},
};
use async_trait::async_trait;
use sea_orm::{
    ActiveValue::{Set, Unchanged},
    JoinType, QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
    prelude::*,
};
use tracing::{debug, info, instrument};

/// Lists the ingredients of a recipe, joined with their ingredient rows.
///
/// Returns an empty list both for a recipe without ingredients and for an
/// unknown recipe.
pub async fn get_recipe_ingredients<C>(db: &C, recipe_id: i64) -> Result<Vec<RecipeIngredientDetail>>
where
    C: ConnectionTrait,
{
    RecipeIngredient::find()
        .select_only()
        .column_as(recipe_ingredient::Column::Quantity, "quantity")
        .column(recipe_ingredient::Column::Unit)
        .column(recipe_ingredient::Column::Comment)
        .column_as(ingredient::Column::IngredientId, "ingredient_id")
        .column_as(ingredient::Column::Name, "name")
        .column_as(ingredient::Column::StandardUnit, "standard_unit")
        .column(ingredient::Column::GlutenFree)
        .column(ingredient::Column::Fibre)
        .join(JoinType::InnerJoin, recipe_ingredient::Relation::Ingredient.def())
        .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
        .order_by_asc(recipe_ingredient::Column::IngredientId)
        .into_model::<RecipeIngredientDetail>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Raw link rows of a recipe, without the ingredient columns.
pub async fn get_links_for_recipe<C>(db: &C, recipe_id: i64) -> Result<Vec<recipe_ingredient::Model>>
where
    C: ConnectionTrait,
{
    RecipeIngredient::find()
        .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
        .order_by_asc(recipe_ingredient::Column::IngredientId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds an ingredient to a recipe.
///
/// # Errors
/// Returns an error if:
/// - `ingredient_id` is missing
/// - The recipe or ingredient does not exist, or the ingredient is already
///   part of the recipe (database constraint errors)
#[instrument(skip(db))]
pub async fn add_link<C>(
    db: &C,
    recipe_id: i64,
    payload: LinkPayload,
) -> Result<recipe_ingredient::Model>
where
    C: ConnectionTrait,
{
    let ingredient_id = payload.ingredient_id.ok_or(Error::MissingField {
        field: "ingredient_id",
    })?;

    let link = recipe_ingredient::ActiveModel {
        recipe_id: Set(recipe_id),
        ingredient_id: Set(ingredient_id),
        quantity: Set(payload.quantity),
        unit: Set(payload.unit),
        comment: Set(payload.comment),
    };

    let created = link.insert(db).await?;
    debug!(recipe_id, ingredient_id, "Ingredient added to recipe");
    Ok(created)
}

/// Replaces quantity, unit and comment of a link; absent fields become null.
///
/// # Errors
/// Returns an error if the ingredient is not part of the recipe or the update fails.
#[instrument(skip(db))]
pub async fn update_link<C>(
    db: &C,
    recipe_id: i64,
    ingredient_id: i64,
    payload: LinkUpdatePayload,
) -> Result<recipe_ingredient::Model>
where
    C: ConnectionTrait,
{
    let link = recipe_ingredient::ActiveModel {
        recipe_id: Unchanged(recipe_id),
        ingredient_id: Unchanged(ingredient_id),
        quantity: Set(payload.quantity),
        unit: Set(payload.unit),
        comment: Set(payload.comment),
    };

    match link.update(db).await {
        Ok(updated) => Ok(updated),
        Err(DbErr::RecordNotUpdated) => Err(Error::LinkNotFound {
            recipe_id,
            ingredient_id,
        }),
        Err(e) => Err(e.into()),
    }
}

/// Removes an ingredient from a recipe and returns the deleted link.
///
/// # Errors
/// Returns an error if the ingredient is not part of the recipe or the delete fails.
#[instrument(skip(db))]
pub async fn remove_link<C>(
    db: &C,
    recipe_id: i64,
    ingredient_id: i64,
) -> Result<recipe_ingredient::Model>
where
    C: ConnectionTrait,
{
    let link = RecipeIngredient::find_by_id((recipe_id, ingredient_id))
        .one(db)
        .await?
        .ok_or(Error::LinkNotFound {
            recipe_id,
            ingredient_id,
        })?;

    link.clone().delete(db).await?;
    Ok(link)
}

/// [`LinkStore`] writing straight to the database through `conn`.
pub struct DbLinkStore<'a, C> {
    conn: &'a C,
}

impl<'a, C> DbLinkStore<'a, C> {
    /// Wraps a connection or transaction.
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'a, C> LinkStore for DbLinkStore<'a, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn persisted_links(&self, recipe_id: i64) -> Result<Vec<LinkEntry>> {
        let links = get_links_for_recipe(self.conn, recipe_id).await?;
        Ok(links.into_iter().map(LinkEntry::from).collect())
    }

    async fn create_link(&self, recipe_id: i64, entry: &LinkEntry) -> Result<()> {
        add_link(self.conn, recipe_id, entry.to_payload()).await?;
        Ok(())
    }

    async fn update_link(&self, recipe_id: i64, entry: &LinkEntry) -> Result<()> {
        update_link(
            self.conn,
            recipe_id,
            entry.ingredient_id,
            entry.to_update_payload(),
        )
        .await?;
        Ok(())
    }

    async fn delete_link(&self, recipe_id: i64, ingredient_id: i64) -> Result<()> {
        remove_link(self.conn, recipe_id, ingredient_id).await?;
        Ok(())
    }
}

/// Replaces the ingredient list of a recipe in a single database transaction.
///
/// Runs the same reconciliation as the client-side edit flow, but either every
/// operation is applied or none is.
///
/// # Errors
/// Returns an error if:
/// - An entry has no `ingredient_id`, or an ingredient appears twice
/// - The recipe does not exist
/// - Any link operation fails (the transaction is rolled back)
#[instrument(skip(db, entries), fields(entries = entries.len()))]
pub async fn sync_links(
    db: &DatabaseConnection,
    recipe_id: i64,
    entries: Vec<LinkPayload>,
) -> Result<Vec<LinkOp>> {
    let edited = entries
        .into_iter()
        .map(LinkEntry::try_from)
        .collect::<Result<Vec<_>>>()?;

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    if Recipe::find_by_id(recipe_id).one(&txn).await?.is_none() {
        txn.rollback().await?;
        return Err(Error::RecipeNotFound { id: recipe_id });
    }

    let ops = match reconcile(&DbLinkStore::new(&txn), recipe_id, &edited).await {
        Ok(ops) => ops,
        Err(e) => {
            txn.rollback().await?;
            return Err(e);
        }
    };

    txn.commit().await?;
    info!(recipe_id, operations = ops.len(), "Recipe ingredients synchronized");
    Ok(ops)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::recipe;
    use crate::test_utils::*;

    fn link(ingredient_id: i64, quantity: f64) -> LinkPayload {
        LinkPayload {
            ingredient_id: Some(ingredient_id),
            quantity: Some(quantity),
            unit: Some("g".to_string()),
            comment: None,
        }
    }

    #[tokio::test]
    async fn test_add_and_list_recipe_ingredients() -> Result<()> {
        let (db, recipe, flour) = setup_with_recipe_and_ingredient().await?;

        let created = add_link(&db, recipe.recipe_id, link(flour.ingredient_id, 250.0)).await?;
        assert_eq!(created.recipe_id, recipe.recipe_id);
        assert_eq!(created.ingredient_id, flour.ingredient_id);
        assert_eq!(created.quantity, Some(250.0));

        let details = get_recipe_ingredients(&db, recipe.recipe_id).await?;
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].ingredient_id, flour.ingredient_id);
        assert_eq!(details[0].name, flour.name);
        assert_eq!(details[0].quantity, Some(250.0));
        assert_eq!(details[0].unit.as_deref(), Some("g"));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_link_requires_ingredient_id() -> Result<()> {
        let (db, recipe, _) = setup_with_recipe_and_ingredient().await?;

        let result = add_link(&db, recipe.recipe_id, LinkPayload::default()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::MissingField {
                field: "ingredient_id"
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_same_ingredient_twice_conflicts() -> Result<()> {
        let (db, recipe, flour) = setup_with_recipe_and_ingredient().await?;

        add_link(&db, recipe.recipe_id, link(flour.ingredient_id, 1.0)).await?;
        let second = add_link(&db, recipe.recipe_id, link(flour.ingredient_id, 2.0)).await;
        assert!(matches!(second.unwrap_err(), Error::Database(_)));

        // The first link is untouched
        let links = get_links_for_recipe(&db, recipe.recipe_id).await?;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].quantity, Some(1.0));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_link_to_unknown_ingredient_fails() -> Result<()> {
        let (db, recipe, _) = setup_with_recipe_and_ingredient().await?;

        assert!(
            crate::core::ingredient::get_ingredient_by_id(&db, 404)
                .await?
                .is_none()
        );
        let result = add_link(&db, recipe.recipe_id, link(404, 1.0)).await;
        assert!(matches!(result.unwrap_err(), Error::Database(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_remove_link() -> Result<()> {
        let (db, recipe, flour) = setup_with_recipe_and_ingredient().await?;
        add_link(&db, recipe.recipe_id, link(flour.ingredient_id, 1.0)).await?;

        let updated = update_link(
            &db,
            recipe.recipe_id,
            flour.ingredient_id,
            LinkUpdatePayload {
                quantity: Some(3.0),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.quantity, Some(3.0));
        assert_eq!(updated.unit, None);

        let removed = remove_link(&db, recipe.recipe_id, flour.ingredient_id).await?;
        assert_eq!(removed, updated);
        assert!(get_recipe_ingredients(&db, recipe.recipe_id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_link_is_not_found() -> Result<()> {
        let (db, recipe, flour) = setup_with_recipe_and_ingredient().await?;

        let update = update_link(
            &db,
            recipe.recipe_id,
            flour.ingredient_id,
            LinkUpdatePayload::default(),
        )
        .await;
        assert!(matches!(update.unwrap_err(), Error::LinkNotFound { .. }));

        let remove = remove_link(&db, recipe.recipe_id, flour.ingredient_id).await;
        assert!(matches!(remove.unwrap_err(), Error::LinkNotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_deleting_recipe_cascades_links() -> Result<()> {
        let (db, recipe, flour) = setup_with_recipe_and_ingredient().await?;
        add_link(&db, recipe.recipe_id, link(flour.ingredient_id, 1.0)).await?;

        recipe::delete_recipe(&db, recipe.recipe_id).await?;

        assert!(get_links_for_recipe(&db, recipe.recipe_id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_sync_links_reconciles_in_one_transaction() -> Result<()> {
        let db = setup_test_db().await?;
        let recipe = create_test_recipe(&db, "Bread").await?;
        let one = create_test_ingredient(&db, "Flour").await?;
        let two = create_test_ingredient(&db, "Water").await?;
        let three = create_test_ingredient(&db, "Salt").await?;
        add_link(&db, recipe.recipe_id, link(one.ingredient_id, 100.0)).await?;
        add_link(&db, recipe.recipe_id, link(two.ingredient_id, 50.0)).await?;

        let ops = sync_links(
            &db,
            recipe.recipe_id,
            vec![link(two.ingredient_id, 75.0), link(three.ingredient_id, 10.0)],
        )
        .await?;

        assert_eq!(
            ops,
            vec![
                LinkOp::Delete {
                    ingredient_id: one.ingredient_id
                },
                LinkOp::Update(LinkEntry::try_from(link(two.ingredient_id, 75.0))?),
                LinkOp::Create(LinkEntry::try_from(link(three.ingredient_id, 10.0))?),
            ]
        );

        let links = get_links_for_recipe(&db, recipe.recipe_id).await?;
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].ingredient_id, two.ingredient_id);
        assert_eq!(links[0].quantity, Some(75.0));
        assert_eq!(links[1].ingredient_id, three.ingredient_id);
        Ok(())
    }

    #[tokio::test]
    async fn test_sync_links_rolls_back_on_failure() -> Result<()> {
        let (db, recipe, flour) = setup_with_recipe_and_ingredient().await?;
        add_link(&db, recipe.recipe_id, link(flour.ingredient_id, 100.0)).await?;

        // Deleting flour succeeds inside the transaction, linking 404 does not
        let result = sync_links(&db, recipe.recipe_id, vec![link(404, 1.0)]).await;
        assert!(matches!(result.unwrap_err(), Error::Database(_)));

        let links = get_links_for_recipe(&db, recipe.recipe_id).await?;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].ingredient_id, flour.ingredient_id);
        Ok(())
    }

    #[tokio::test]
    async fn test_sync_links_unknown_recipe() -> Result<()> {
        let db = setup_test_db().await?;

        let result = sync_links(&db, 999, vec![]).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::RecipeNotFound { id: 999 }
        ));
        Ok(())
    }
}
