//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.
//!
//! Rust field names are English; column names and JSON field names keep the
//! names used on the wire (`nom`, `auteur`, `lieu`, ...).

pub mod ingredient;
pub mod ingredient_source;
pub mod recipe;
pub mod recipe_ingredient;

// Re-export specific types to avoid conflicts
pub use ingredient::{Column as IngredientColumn, Entity as Ingredient, Model as IngredientModel};
pub use ingredient_source::{
    Column as IngredientSourceColumn, Entity as IngredientSource, Model as IngredientSourceModel,
};
pub use recipe::{Column as RecipeColumn, Entity as Recipe, Model as RecipeModel};
pub use recipe_ingredient::{
    Column as RecipeIngredientColumn, Entity as RecipeIngredient, Model as RecipeIngredientModel,
};
