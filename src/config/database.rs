//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema (including composite keys and foreign-key actions) always matches the
//! Rust structs. The sqlx `SQLite` driver enables `PRAGMA foreign_keys` on every connection,
//! which is what makes the cascade/restrict rules on links and sources effective.

use crate::entities::{Ingredient, IngredientSource, Recipe, RecipeIngredient};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info, instrument};

/// Default database location, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://recipes.sqlite?mode=rwc";

/// Establishes a connection to the database at `database_url`.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates every table that does not exist yet.
///
/// Recipes and ingredients are created before the tables that reference them.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    create_table(db, Recipe).await?;
    create_table(db, Ingredient).await?;
    create_table(db, RecipeIngredient).await?;
    create_table(db, IngredientSource).await?;

    info!("Database tables ensured");
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Connects and makes sure the schema exists.
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection> {
    let db = create_connection(database_url).await?;
    create_tables(&db).await?;
    Ok(db)
}
