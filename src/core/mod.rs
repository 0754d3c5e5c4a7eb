//! Core business logic - framework-agnostic recipe book operations
//!
//! Every function here takes a database connection and returns domain models;
//! the HTTP layer and the CLI are thin wrappers around these.

/// Ingredient catalogue operations
pub mod ingredient;
/// Recipe operations
pub mod recipe;
/// Links between recipes and the ingredients they use
pub mod recipe_ingredient;
/// Diffing an edited ingredient list against the persisted one
pub mod reconcile;
/// Where ingredients can be bought, and at what price
pub mod source;
