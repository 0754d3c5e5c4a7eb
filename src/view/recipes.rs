//! Recipe list page.
//!
//! Creating a recipe posts it and then adds its ingredients one by one.
//! Modifying replaces the recipe fields and then reconciles the edited
//! ingredient list with what the server holds, either request by request
//! ([`SaveMode::Sequential`]) or through the server-side transactional sync
//! ([`SaveMode::Atomic`]).

use crate::{
    client::ApiClient,
    core::reconcile::{self, LinkEntry, LinkOp},
    entities::recipe,
    errors::Result,
    models::{RecipeIngredientDetail, RecipePayload},
    view::{Collection, Confirm, DeleteOutcome},
};
use tracing::info;

/// How an edited ingredient list is written back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveMode {
    /// One request per link operation; a failure leaves earlier ones applied
    #[default]
    Sequential,
    /// A single transactional request; all operations or none
    Atomic,
}

/// State of the recipe list page.
pub struct RecipesPage<'a> {
    api: &'a ApiClient,
    recipes: Collection<recipe::Model>,
}

impl<'a> RecipesPage<'a> {
    /// A page that has not loaded anything yet.
    #[must_use]
    pub fn new(api: &'a ApiClient) -> Self {
        Self {
            api,
            recipes: Collection::new(),
        }
    }

    /// Loaded recipes and load state.
    #[must_use]
    pub const fn recipes(&self) -> &Collection<recipe::Model> {
        &self.recipes
    }

    /// (Re)loads the recipe list.
    ///
    /// # Errors
    /// Returns the load error, which is also kept in the collection state.
    pub async fn reload(&mut self) -> Result<()> {
        self.recipes.begin_load();
        let result = self.api.list_recipes().await;
        self.recipes.finish_load(result)
    }

    /// Reloads after a mutation; a failed reload stays visible in the collection state.
    async fn refresh(&mut self) {
        let _ = self.reload().await;
    }

    /// Ingredients of a recipe; a recipe without ingredients yields an empty list.
    pub async fn ingredients_of(&self, recipe_id: i64) -> Result<Vec<RecipeIngredientDetail>> {
        match self.api.list_recipe_ingredients(recipe_id).await {
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            other => other,
        }
    }

    /// Creates a recipe, then adds `ingredients` in order.
    ///
    /// The list is reloaded once the recipe exists, even if adding an
    /// ingredient failed; that failure is returned.
    ///
    /// # Errors
    /// Returns an error if the recipe is rejected, `ingredients` names an
    /// ingredient twice, or adding an ingredient fails.
    pub async fn create(
        &mut self,
        payload: &RecipePayload,
        ingredients: &[LinkEntry],
    ) -> Result<recipe::Model> {
        let ops = reconcile::plan(ingredients, &[])?;
        let created = self.api.create_recipe(payload).await?;
        info!(recipe_id = created.recipe_id, "Recipe created");

        let applied = reconcile::apply(self.api, created.recipe_id, &ops).await;
        self.refresh().await;
        applied.map(|()| created)
    }

    /// Replaces the recipe fields and, when `ingredients` is given, its
    /// ingredient list. Returns the link operations that were issued.
    ///
    /// # Errors
    /// Returns an error if the recipe update or any link operation fails. In
    /// [`SaveMode::Sequential`] operations issued before the failure stay applied.
    pub async fn modify(
        &mut self,
        recipe_id: i64,
        payload: &RecipePayload,
        ingredients: Option<&[LinkEntry]>,
        mode: SaveMode,
    ) -> Result<Vec<LinkOp>> {
        self.api.update_recipe(recipe_id, payload).await?;

        let synced = match (ingredients, mode) {
            (None, _) => Ok(Vec::new()),
            (Some(edited), SaveMode::Sequential) => {
                reconcile::reconcile(self.api, recipe_id, edited).await
            }
            (Some(edited), SaveMode::Atomic) => {
                let entries: Vec<_> = edited.iter().map(LinkEntry::to_payload).collect();
                self.api.sync_recipe_ingredients(recipe_id, &entries).await
            }
        };

        self.refresh().await;
        synced
    }

    /// Deletes a recipe after confirmation; its ingredient links go with it.
    ///
    /// # Errors
    /// Returns an error if the delete request fails.
    pub async fn delete(
        &mut self,
        recipe_id: i64,
        confirm: &impl Confirm,
    ) -> Result<DeleteOutcome<recipe::Model>> {
        if !confirm.confirm(&format!("Delete recipe {recipe_id}?")) {
            return Ok(DeleteOutcome::Cancelled);
        }

        let deleted = self.api.delete_recipe(recipe_id).await?;
        self.refresh().await;
        Ok(DeleteOutcome::Deleted(deleted))
    }
}
