//! Purchase sources page.
//!
//! Nothing is loaded or mutable until an ingredient is selected. Changing the
//! selection reloads the sources of the new ingredient.

use crate::{
    client::ApiClient,
    entities::ingredient_source,
    errors::{Error, Result},
    models::{IngredientSourceDetail, SourcePayload},
    view::{Collection, Confirm, DeleteOutcome},
};

/// State of the sources page.
pub struct SourcesPage<'a> {
    api: &'a ApiClient,
    selected: Option<i64>,
    sources: Collection<IngredientSourceDetail>,
}

impl<'a> SourcesPage<'a> {
    /// A page with no ingredient selected.
    #[must_use]
    pub fn new(api: &'a ApiClient) -> Self {
        Self {
            api,
            selected: None,
            sources: Collection::new(),
        }
    }

    /// The selected ingredient, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<i64> {
        self.selected
    }

    /// Sources of the selected ingredient and load state.
    #[must_use]
    pub const fn sources(&self) -> &Collection<IngredientSourceDetail> {
        &self.sources
    }

    /// Changes the selected ingredient. Selecting one loads its sources;
    /// clearing the selection empties the page.
    ///
    /// # Errors
    /// Returns the load error, which is also kept in the collection state.
    pub async fn select(&mut self, ingredient_id: Option<i64>) -> Result<()> {
        self.selected = ingredient_id;
        self.reload().await
    }

    /// (Re)loads the sources of the selected ingredient. An ingredient without
    /// sources shows an empty list.
    ///
    /// # Errors
    /// Returns the load error, which is also kept in the collection state.
    pub async fn reload(&mut self) -> Result<()> {
        let Some(ingredient_id) = self.selected else {
            self.sources.reset();
            return Ok(());
        };

        self.sources.begin_load();
        let result = match self.api.list_sources(ingredient_id).await {
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            other => other,
        };
        self.sources.finish_load(result)
    }

    /// Reloads after a mutation; a failed reload stays visible in the collection state.
    async fn refresh(&mut self) {
        let _ = self.reload().await;
    }

    fn require_selection(&self) -> Result<i64> {
        self.selected.ok_or(Error::NoIngredientSelected)
    }

    /// Adds a source to the selected ingredient and reloads.
    ///
    /// # Errors
    /// Returns [`Error::NoIngredientSelected`] without a selection, or the API error.
    pub async fn add(&mut self, payload: &SourcePayload) -> Result<ingredient_source::Model> {
        let ingredient_id = self.require_selection()?;
        let created = self.api.add_source(ingredient_id, payload).await?;
        self.refresh().await;
        Ok(created)
    }

    /// Replaces a source of the selected ingredient and reloads.
    ///
    /// # Errors
    /// Returns [`Error::NoIngredientSelected`] without a selection, or the API error.
    pub async fn modify(
        &mut self,
        source_id: i64,
        payload: &SourcePayload,
    ) -> Result<ingredient_source::Model> {
        let ingredient_id = self.require_selection()?;
        let updated = self
            .api
            .update_source(ingredient_id, source_id, payload)
            .await?;
        self.refresh().await;
        Ok(updated)
    }

    /// Deletes a source of the selected ingredient after confirmation.
    ///
    /// # Errors
    /// Returns [`Error::NoIngredientSelected`] without a selection, or the API error.
    pub async fn delete(
        &mut self,
        source_id: i64,
        confirm: &impl Confirm,
    ) -> Result<DeleteOutcome<ingredient_source::Model>> {
        let ingredient_id = self.require_selection()?;
        if !confirm.confirm(&format!("Delete source {source_id}?")) {
            return Ok(DeleteOutcome::Cancelled);
        }

        let deleted = self.api.delete_source(ingredient_id, source_id).await?;
        self.refresh().await;
        Ok(DeleteOutcome::Deleted(deleted))
    }
}
