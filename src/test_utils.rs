//! Shared test utilities for `RecipeBox`.
//!
//! This module provides common helper functions for setting up test databases,
//! creating test entities with sensible defaults and running a live API server
//! on a random local port.

use crate::{
    api::{self, AppState},
    client::ApiClient,
    core::{ingredient, recipe},
    entities,
    errors::Result,
    models::{IngredientPayload, RecipePayload},
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test recipe with only a name.
pub async fn create_test_recipe(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::recipe::Model> {
    recipe::create_recipe(
        db,
        RecipePayload {
            name: Some(name.to_string()),
            ..Default::default()
        },
    )
    .await
}

/// Creates a test recipe with custom author and tag.
pub async fn create_custom_recipe(
    db: &DatabaseConnection,
    name: &str,
    author: Option<&str>,
    tag: Option<&str>,
) -> Result<entities::recipe::Model> {
    recipe::create_recipe(
        db,
        RecipePayload {
            name: Some(name.to_string()),
            author: author.map(str::to_string),
            tag: tag.map(str::to_string),
            ..Default::default()
        },
    )
    .await
}

/// Creates a test ingredient with sensible defaults.
///
/// # Defaults
/// * `unit_standard`: "g"
/// * `gluten_free`: None
/// * `fibre`: None
pub async fn create_test_ingredient(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::ingredient::Model> {
    ingredient::create_ingredient(
        db,
        IngredientPayload {
            name: Some(name.to_string()),
            standard_unit: Some("g".to_string()),
            ..Default::default()
        },
    )
    .await
}

/// Creates a test ingredient with a custom fibre value.
pub async fn create_custom_ingredient(
    db: &DatabaseConnection,
    name: &str,
    fibre: Option<f64>,
) -> Result<entities::ingredient::Model> {
    ingredient::create_ingredient(
        db,
        IngredientPayload {
            name: Some(name.to_string()),
            fibre,
            ..Default::default()
        },
    )
    .await
}

/// Creates a database with one recipe ("Pancakes") and one ingredient ("Flour").
pub async fn setup_with_recipe_and_ingredient() -> Result<(
    DatabaseConnection,
    entities::recipe::Model,
    entities::ingredient::Model,
)> {
    let db = setup_test_db().await?;
    let recipe = create_test_recipe(&db, "Pancakes").await?;
    let ingredient = create_test_ingredient(&db, "Flour").await?;
    Ok((db, recipe, ingredient))
}

/// Serves the API over a fresh in-memory database on `127.0.0.1:0` and
/// returns a client pointed at it. The server lives until the test runtime
/// shuts down.
pub async fn spawn_test_server() -> Result<ApiClient> {
    let db = setup_test_db().await?;
    let app = api::create_router(AppState::new(db));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    ApiClient::new(format!("http://{addr}/api"))
}
