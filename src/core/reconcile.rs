//! Ingredient list reconciliation for the recipe-edit flow.
//!
//! Saving an edited recipe compares the ingredient list held by the editor
//! with the list currently persisted and derives the link operations that turn
//! one into the other:
//!
//! 1. every persisted ingredient missing from the edited list is deleted,
//! 2. every edited ingredient already persisted is updated when its quantity,
//!    unit or comment differs,
//! 3. every other edited ingredient is created.
//!
//! Operations run one at a time against a [`LinkStore`], each awaited before
//! the next. A failure stops the sequence; operations already applied stay
//! applied unless the store itself is transactional (see
//! [`crate::core::recipe_ingredient::sync_links`]).

use crate::{
    entities::recipe_ingredient,
    errors::{Error, Result},
    models::{LinkPayload, LinkUpdatePayload, RecipeIngredientDetail},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// One ingredient line of a recipe, as edited or as persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Ingredient the line refers to
    pub ingredient_id: i64,
    /// Amount
    #[serde(rename = "quantite")]
    pub quantity: Option<f64>,
    /// Unit of the amount
    pub unit: Option<String>,
    /// Free-text remark
    pub comment: Option<String>,
}

impl LinkEntry {
    /// Whether quantity, unit and comment all match `other`.
    #[must_use]
    pub fn same_details(&self, other: &Self) -> bool {
        self.quantity == other.quantity && self.unit == other.unit && self.comment == other.comment
    }

    /// Body for adding this entry to a recipe.
    #[must_use]
    pub fn to_payload(&self) -> LinkPayload {
        LinkPayload {
            ingredient_id: Some(self.ingredient_id),
            quantity: self.quantity,
            unit: self.unit.clone(),
            comment: self.comment.clone(),
        }
    }

    /// Body for replacing the details of this entry.
    #[must_use]
    pub fn to_update_payload(&self) -> LinkUpdatePayload {
        LinkUpdatePayload {
            quantity: self.quantity,
            unit: self.unit.clone(),
            comment: self.comment.clone(),
        }
    }
}

impl TryFrom<LinkPayload> for LinkEntry {
    type Error = Error;

    fn try_from(payload: LinkPayload) -> Result<Self> {
        Ok(Self {
            ingredient_id: payload.ingredient_id.ok_or(Error::MissingField {
                field: "ingredient_id",
            })?,
            quantity: payload.quantity,
            unit: payload.unit,
            comment: payload.comment,
        })
    }
}

impl From<recipe_ingredient::Model> for LinkEntry {
    fn from(model: recipe_ingredient::Model) -> Self {
        Self {
            ingredient_id: model.ingredient_id,
            quantity: model.quantity,
            unit: model.unit,
            comment: model.comment,
        }
    }
}

impl From<RecipeIngredientDetail> for LinkEntry {
    fn from(detail: RecipeIngredientDetail) -> Self {
        Self {
            ingredient_id: detail.ingredient_id,
            quantity: detail.quantity,
            unit: detail.unit,
            comment: detail.comment,
        }
    }
}

/// A single link mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LinkOp {
    /// Remove the ingredient from the recipe
    Delete {
        /// Ingredient to remove
        ingredient_id: i64,
    },
    /// Replace quantity, unit and comment of an existing link
    Update(LinkEntry),
    /// Add the ingredient to the recipe
    Create(LinkEntry),
}

/// Where recipe links live. Implemented by the HTTP client and by the
/// database-backed store used inside a transaction.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Links currently persisted for the recipe; empty when it has none.
    async fn persisted_links(&self, recipe_id: i64) -> Result<Vec<LinkEntry>>;

    /// Adds an ingredient to the recipe.
    async fn create_link(&self, recipe_id: i64, entry: &LinkEntry) -> Result<()>;

    /// Replaces quantity, unit and comment of an existing link.
    async fn update_link(&self, recipe_id: i64, entry: &LinkEntry) -> Result<()>;

    /// Removes an ingredient from the recipe.
    async fn delete_link(&self, recipe_id: i64, ingredient_id: i64) -> Result<()>;
}

/// Computes the operations turning `persisted` into `edited`.
///
/// Deletes come first, in persisted order, followed by updates and creates in
/// edited order.
///
/// # Errors
/// Returns [`Error::DuplicateIngredient`] if `edited` names an ingredient twice.
pub fn plan(edited: &[LinkEntry], persisted: &[LinkEntry]) -> Result<Vec<LinkOp>> {
    let seen = distinct_ingredients(edited)?;

    let mut ops: Vec<LinkOp> = persisted
        .iter()
        .filter(|current| !seen.contains(&current.ingredient_id))
        .map(|current| LinkOp::Delete {
            ingredient_id: current.ingredient_id,
        })
        .collect();

    for entry in edited {
        match persisted
            .iter()
            .find(|current| current.ingredient_id == entry.ingredient_id)
        {
            Some(current) if current.same_details(entry) => {}
            Some(_) => ops.push(LinkOp::Update(entry.clone())),
            None => ops.push(LinkOp::Create(entry.clone())),
        }
    }

    Ok(ops)
}

fn distinct_ingredients(edited: &[LinkEntry]) -> Result<HashSet<i64>> {
    let mut seen = HashSet::with_capacity(edited.len());
    for entry in edited {
        if !seen.insert(entry.ingredient_id) {
            return Err(Error::DuplicateIngredient {
                ingredient_id: entry.ingredient_id,
            });
        }
    }
    Ok(seen)
}

/// Applies `ops` in order, stopping at the first failure.
pub async fn apply<S>(store: &S, recipe_id: i64, ops: &[LinkOp]) -> Result<()>
where
    S: LinkStore + ?Sized,
{
    for op in ops {
        debug!(recipe_id, ?op, "Applying link operation");
        match op {
            LinkOp::Delete { ingredient_id } => store.delete_link(recipe_id, *ingredient_id).await?,
            LinkOp::Update(entry) => store.update_link(recipe_id, entry).await?,
            LinkOp::Create(entry) => store.create_link(recipe_id, entry).await?,
        }
    }
    Ok(())
}

/// Re-reads the persisted links, plans and applies the difference.
///
/// Returns the operations that were applied. A duplicated ingredient is
/// rejected before the store is touched.
#[instrument(skip(store, edited), fields(edited = edited.len()))]
pub async fn reconcile<S>(store: &S, recipe_id: i64, edited: &[LinkEntry]) -> Result<Vec<LinkOp>>
where
    S: LinkStore + ?Sized,
{
    distinct_ingredients(edited)?;
    let persisted = store.persisted_links(recipe_id).await?;
    let ops = plan(edited, &persisted)?;
    apply(store, recipe_id, &ops).await?;
    Ok(ops)
}
