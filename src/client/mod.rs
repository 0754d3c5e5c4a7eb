//! Typed HTTP client for the recipe box API.
//!
//! One method per endpoint. Non-success responses come back as
//! [`Error::Api`] carrying the status code and the `error` field of the body.
//! No call is retried.

use crate::{
    core::reconcile::{LinkEntry, LinkOp, LinkStore},
    entities::{ingredient, ingredient_source, recipe, recipe_ingredient},
    errors::{Error, Result},
    models::{
        ErrorBody, HealthStatus, IngredientPayload, IngredientSourceDetail, LinkPayload,
        LinkUpdatePayload, RecipeIngredientDetail, RecipePayload, SourcePayload,
    },
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// HTTP client bound to one API base URL (including the `/api` prefix).
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `base_url`; a trailing slash is ignored.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "API request");
        self.client.request(method, url)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text).map_or_else(
            |_| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            },
            |body| body.error,
        );
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        Self::send(self.request(Method::GET, path)).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        Self::send(self.request(Method::POST, path).json(body)).await
    }

    async fn put<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        Self::send(self.request(Method::PUT, path).json(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        Self::send(self.request(Method::DELETE, path)).await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get("/health").await
    }

    /// `GET /recipes`
    pub async fn list_recipes(&self) -> Result<Vec<recipe::Model>> {
        self.get("/recipes").await
    }

    /// `GET /recipes/:id`
    pub async fn get_recipe(&self, recipe_id: i64) -> Result<recipe::Model> {
        self.get(&format!("/recipes/{recipe_id}")).await
    }

    /// `POST /recipes`
    pub async fn create_recipe(&self, payload: &RecipePayload) -> Result<recipe::Model> {
        self.post("/recipes", payload).await
    }

    /// `PUT /recipes/:id`
    pub async fn update_recipe(
        &self,
        recipe_id: i64,
        payload: &RecipePayload,
    ) -> Result<recipe::Model> {
        self.put(&format!("/recipes/{recipe_id}"), payload).await
    }

    /// `DELETE /recipes/:id`
    pub async fn delete_recipe(&self, recipe_id: i64) -> Result<recipe::Model> {
        self.delete(&format!("/recipes/{recipe_id}")).await
    }

    /// `GET /recipes/:id/ingredients`; a recipe without ingredients is a 404.
    pub async fn list_recipe_ingredients(
        &self,
        recipe_id: i64,
    ) -> Result<Vec<RecipeIngredientDetail>> {
        self.get(&format!("/recipes/{recipe_id}/ingredients")).await
    }

    /// `POST /recipes/:id/ingredients`
    pub async fn add_recipe_ingredient(
        &self,
        recipe_id: i64,
        payload: &LinkPayload,
    ) -> Result<recipe_ingredient::Model> {
        self.post(&format!("/recipes/{recipe_id}/ingredients"), payload)
            .await
    }

    /// `PUT /recipes/:id/ingredients/:ingId`
    pub async fn update_recipe_ingredient(
        &self,
        recipe_id: i64,
        ingredient_id: i64,
        payload: &LinkUpdatePayload,
    ) -> Result<recipe_ingredient::Model> {
        self.put(
            &format!("/recipes/{recipe_id}/ingredients/{ingredient_id}"),
            payload,
        )
        .await
    }

    /// `DELETE /recipes/:id/ingredients/:ingId`
    pub async fn remove_recipe_ingredient(
        &self,
        recipe_id: i64,
        ingredient_id: i64,
    ) -> Result<recipe_ingredient::Model> {
        self.delete(&format!("/recipes/{recipe_id}/ingredients/{ingredient_id}"))
            .await
    }

    /// `PUT /recipes/:id/ingredients`: replaces the whole list server-side in
    /// one transaction.
    pub async fn sync_recipe_ingredients(
        &self,
        recipe_id: i64,
        entries: &[LinkPayload],
    ) -> Result<Vec<LinkOp>> {
        self.put(&format!("/recipes/{recipe_id}/ingredients"), &entries)
            .await
    }

    /// `GET /ingredients`
    pub async fn list_ingredients(&self) -> Result<Vec<ingredient::Model>> {
        self.get("/ingredients").await
    }

    /// `GET /ingredients/:id`
    pub async fn get_ingredient(&self, ingredient_id: i64) -> Result<ingredient::Model> {
        self.get(&format!("/ingredients/{ingredient_id}")).await
    }

    /// `POST /ingredients`
    pub async fn create_ingredient(
        &self,
        payload: &IngredientPayload,
    ) -> Result<ingredient::Model> {
        self.post("/ingredients", payload).await
    }

    /// `PUT /ingredients/:id`
    pub async fn update_ingredient(
        &self,
        ingredient_id: i64,
        payload: &IngredientPayload,
    ) -> Result<ingredient::Model> {
        self.put(&format!("/ingredients/{ingredient_id}"), payload)
            .await
    }

    /// `DELETE /ingredients/:id`
    pub async fn delete_ingredient(&self, ingredient_id: i64) -> Result<ingredient::Model> {
        self.delete(&format!("/ingredients/{ingredient_id}")).await
    }

    /// `GET /ingredients/:id/sources`; an ingredient without sources is a 404.
    pub async fn list_sources(&self, ingredient_id: i64) -> Result<Vec<IngredientSourceDetail>> {
        self.get(&format!("/ingredients/{ingredient_id}/sources"))
            .await
    }

    /// `POST /ingredients/:id/sources`
    pub async fn add_source(
        &self,
        ingredient_id: i64,
        payload: &SourcePayload,
    ) -> Result<ingredient_source::Model> {
        self.post(&format!("/ingredients/{ingredient_id}/sources"), payload)
            .await
    }

    /// `PUT /ingredients/:id/sources/:srcId`
    pub async fn update_source(
        &self,
        ingredient_id: i64,
        source_id: i64,
        payload: &SourcePayload,
    ) -> Result<ingredient_source::Model> {
        self.put(
            &format!("/ingredients/{ingredient_id}/sources/{source_id}"),
            payload,
        )
        .await
    }

    /// `DELETE /ingredients/:id/sources/:srcId`
    pub async fn delete_source(
        &self,
        ingredient_id: i64,
        source_id: i64,
    ) -> Result<ingredient_source::Model> {
        self.delete(&format!("/ingredients/{ingredient_id}/sources/{source_id}"))
            .await
    }
}

#[async_trait]
impl LinkStore for ApiClient {
    async fn persisted_links(&self, recipe_id: i64) -> Result<Vec<LinkEntry>> {
        match self.list_recipe_ingredients(recipe_id).await {
            Ok(rows) => Ok(rows.into_iter().map(LinkEntry::from).collect()),
            // The API reports a recipe without ingredients as a 404
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn create_link(&self, recipe_id: i64, entry: &LinkEntry) -> Result<()> {
        self.add_recipe_ingredient(recipe_id, &entry.to_payload())
            .await?;
        Ok(())
    }

    async fn update_link(&self, recipe_id: i64, entry: &LinkEntry) -> Result<()> {
        self.update_recipe_ingredient(recipe_id, entry.ingredient_id, &entry.to_update_payload())
            .await?;
        Ok(())
    }

    async fn delete_link(&self, recipe_id: i64, ingredient_id: i64) -> Result<()> {
        self.remove_recipe_ingredient(recipe_id, ingredient_id)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::reconcile::reconcile;
    use crate::test_utils::spawn_test_server;

    fn entry(ingredient_id: i64, quantity: f64) -> LinkEntry {
        LinkEntry {
            ingredient_id,
            quantity: Some(quantity),
            unit: None,
            comment: None,
        }
    }

    async fn ingredient(api: &ApiClient, name: &str) -> Result<i64> {
        let created = api
            .create_ingredient(&IngredientPayload {
                name: Some(name.to_string()),
                ..Default::default()
            })
            .await?;
        Ok(created.ingredient_id)
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let api = ApiClient::new("http://localhost:3000/api/").unwrap();
        assert_eq!(api.base_url(), DEFAULT_API_URL);
    }

    #[tokio::test]
    async fn test_health_over_http() -> Result<()> {
        let api = spawn_test_server().await?;
        assert_eq!(api.health().await?.status, "Server is running!");
        Ok(())
    }

    #[tokio::test]
    async fn test_errors_carry_status_and_message() -> Result<()> {
        let api = spawn_test_server().await?;

        let missing = api.get_recipe(77).await.unwrap_err();
        assert!(missing.is_not_found());
        assert!(matches!(missing, Error::Api { status: 404, .. }));

        let invalid = api.create_recipe(&RecipePayload::default()).await.unwrap_err();
        assert!(matches!(
            invalid,
            Error::Api { status: 400, ref message } if message == "Field \"nom\" is required"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_reconcile_over_http() -> Result<()> {
        let api = spawn_test_server().await?;
        let recipe = api
            .create_recipe(&RecipePayload {
                name: Some("Stew".to_string()),
                ..Default::default()
            })
            .await?;
        let one = ingredient(&api, "Beef").await?;
        let two = ingredient(&api, "Carrot").await?;
        let three = ingredient(&api, "Onion").await?;

        // Creating from an empty persisted list only creates
        let ops = reconcile(&api, recipe.recipe_id, &[entry(one, 100.0), entry(two, 50.0)]).await?;
        assert_eq!(
            ops,
            vec![
                LinkOp::Create(entry(one, 100.0)),
                LinkOp::Create(entry(two, 50.0))
            ]
        );

        let ops = reconcile(&api, recipe.recipe_id, &[entry(two, 75.0), entry(three, 10.0)]).await?;
        assert_eq!(
            ops,
            vec![
                LinkOp::Delete { ingredient_id: one },
                LinkOp::Update(entry(two, 75.0)),
                LinkOp::Create(entry(three, 10.0)),
            ]
        );

        let rows = api.list_recipe_ingredients(recipe.recipe_id).await?;
        let persisted: Vec<(i64, Option<f64>)> =
            rows.iter().map(|r| (r.ingredient_id, r.quantity)).collect();
        assert_eq!(persisted, vec![(two, Some(75.0)), (three, Some(10.0))]);

        // Clearing the list removes everything; the list endpoint then 404s
        reconcile(&api, recipe.recipe_id, &[]).await?;
        assert!(api.persisted_links(recipe.recipe_id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_sync_endpoint_is_atomic() -> Result<()> {
        let api = spawn_test_server().await?;
        let recipe = api
            .create_recipe(&RecipePayload {
                name: Some("Salad".to_string()),
                ..Default::default()
            })
            .await?;
        let lettuce = ingredient(&api, "Lettuce").await?;
        api.sync_recipe_ingredients(recipe.recipe_id, &[entry(lettuce, 1.0).to_payload()])
            .await?;

        // The second entry points at an unknown ingredient: nothing is applied
        let result = api
            .sync_recipe_ingredients(
                recipe.recipe_id,
                &[entry(lettuce, 2.0).to_payload(), entry(999, 1.0).to_payload()],
            )
            .await;
        assert!(matches!(result.unwrap_err(), Error::Api { status: 500, .. }));

        let rows = api.list_recipe_ingredients(recipe.recipe_id).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, Some(1.0));
        Ok(())
    }

    #[tokio::test]
    async fn test_source_round_trip() -> Result<()> {
        let api = spawn_test_server().await?;
        let rice = ingredient(&api, "Rice").await?;

        assert!(api.list_sources(rice).await.unwrap_err().is_not_found());

        let source = api
            .add_source(
                rice,
                &SourcePayload {
                    place: Some("Grocer".to_string()),
                    price: Some(3.5),
                    purchase_quantity: Some("2kg".to_string()),
                },
            )
            .await?;
        let listed = api.list_sources(rice).await?;
        assert_eq!(listed[0].source_id, source.source_id);
        assert_eq!(listed[0].ingredient_name, "Rice");

        api.delete_source(rice, source.source_id).await?;
        assert!(api.list_sources(rice).await.unwrap_err().is_not_found());
        Ok(())
    }
}
