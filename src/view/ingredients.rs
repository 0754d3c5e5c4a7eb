use crate::{
    client::ApiClient,
    entities::ingredient,
    errors::Result,
    models::IngredientPayload,
    view::{Collection, Confirm, DeleteOutcome},
};
use tracing::info;

/// State of the ingredient list page.
pub struct IngredientsPage<'a> {
    api: &'a ApiClient,
    ingredients: Collection<ingredient::Model>,
}

impl<'a> IngredientsPage<'a> {
    /// A page that has not loaded anything yet.
    #[must_use]
    pub fn new(api: &'a ApiClient) -> Self {
        Self {
            api,
            ingredients: Collection::new(),
        }
    }

    /// Loaded ingredients and load state.
    #[must_use]
    pub const fn ingredients(&self) -> &Collection<ingredient::Model> {
        &self.ingredients
    }

    /// Loaded ingredients whose name contains `query`, ignoring case. An empty
    /// query matches everything.
    #[must_use]
    pub fn matching(&self, query: &str) -> Vec<&ingredient::Model> {
        let query = query.to_lowercase();
        self.ingredients
            .items()
            .iter()
            .filter(|ingredient| ingredient.name.to_lowercase().contains(&query))
            .collect()
    }

    /// (Re)loads the ingredient list.
    ///
    /// # Errors
    /// Returns the load error, which is also kept in the collection state.
    pub async fn reload(&mut self) -> Result<()> {
        self.ingredients.begin_load();
        let result = self.api.list_ingredients().await;
        self.ingredients.finish_load(result)
    }

    /// Reloads after a mutation; a failed reload stays visible in the collection state.
    async fn refresh(&mut self) {
        let _ = self.reload().await;
    }

    /// Creates an ingredient and reloads.
    ///
    /// # Errors
    /// Returns an error if the API rejects the ingredient.
    pub async fn create(&mut self, payload: &IngredientPayload) -> Result<ingredient::Model> {
        let created = self.api.create_ingredient(payload).await?;
        info!(ingredient_id = created.ingredient_id, "Ingredient created");
        self.refresh().await;
        Ok(created)
    }

    /// Replaces an ingredient's fields and reloads.
    ///
    /// # Errors
    /// Returns an error if the ingredient does not exist or is rejected.
    pub async fn modify(
        &mut self,
        ingredient_id: i64,
        payload: &IngredientPayload,
    ) -> Result<ingredient::Model> {
        let updated = self.api.update_ingredient(ingredient_id, payload).await?;
        self.refresh().await;
        Ok(updated)
    }

    /// Deletes an ingredient after confirmation. Refused by the server while a
    /// recipe still uses it.
    ///
    /// # Errors
    /// Returns an error if the delete request fails.
    pub async fn delete(
        &mut self,
        ingredient_id: i64,
        confirm: &impl Confirm,
    ) -> Result<DeleteOutcome<ingredient::Model>> {
        if !confirm.confirm(&format!("Delete ingredient {ingredient_id}?")) {
            return Ok(DeleteOutcome::Cancelled);
        }

        let deleted = self.api.delete_ingredient(ingredient_id).await?;
        self.refresh().await;
        Ok(DeleteOutcome::Deleted(deleted))
    }
}
