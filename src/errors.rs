//! Unified error type for the recipe box.
//!
//! The same enum travels from the data layer up to the HTTP layer, where
//! `crate::api::error` turns each variant into a status code and an
//! `{ "error": ... }` body, and back down to the client, where a failed call
//! is reported as [`Error::Api`].

use thiserror::Error;

/// All errors produced by the recipe box.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A required body field is absent, null or blank
    #[error("Field \"{field}\" is required")]
    MissingField {
        /// Wire name of the field
        field: &'static str,
    },

    /// The request body or path could not be parsed
    #[error("Malformed request: {message}")]
    MalformedRequest {
        /// Parser message
        message: String,
    },

    /// An edited ingredient list names the same ingredient more than once
    #[error("Ingredient {ingredient_id} appears more than once in the recipe")]
    DuplicateIngredient {
        /// The repeated ingredient id
        ingredient_id: i64,
    },

    /// A source operation was attempted before an ingredient was selected
    #[error("No ingredient selected")]
    NoIngredientSelected,

    /// No recipe with this id
    #[error("Recipe {id} not found")]
    RecipeNotFound {
        /// Requested recipe id
        id: i64,
    },

    /// No ingredient with this id
    #[error("Ingredient {id} not found")]
    IngredientNotFound {
        /// Requested ingredient id
        id: i64,
    },

    /// The ingredient is not part of the recipe
    #[error("Ingredient {ingredient_id} not found in recipe {recipe_id}")]
    LinkNotFound {
        /// Recipe id from the path
        recipe_id: i64,
        /// Ingredient id from the path
        ingredient_id: i64,
    },

    /// The source does not exist for this ingredient
    #[error("Source {source_id} not found for ingredient {ingredient_id}")]
    SourceNotFound {
        /// Ingredient id from the path
        ingredient_id: i64,
        /// Source id from the path
        source_id: i64,
    },

    /// The recipe has no ingredients
    #[error("No ingredients found for recipe {recipe_id}")]
    RecipeIngredientsNotFound {
        /// Recipe id from the path
        recipe_id: i64,
    },

    /// The ingredient has no purchase sources
    #[error("No sources found for ingredient {ingredient_id}")]
    SourcesNotFound {
        /// Ingredient id from the path
        ingredient_id: i64,
    },

    /// Any failure reported by the data store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (binding the listener, reading stdin, ...)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport failure while talking to the API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// The `error` field of the response body
        message: String,
    },
}

impl Error {
    /// Whether this error means "nothing there", locally or as reported by the API.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RecipeNotFound { .. }
                | Self::IngredientNotFound { .. }
                | Self::LinkNotFound { .. }
                | Self::SourceNotFound { .. }
                | Self::RecipeIngredientsNotFound { .. }
                | Self::SourcesNotFound { .. }
                | Self::Api { status: 404, .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
