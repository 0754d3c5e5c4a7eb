//! Request handlers, one module per resource.
//!
//! Handlers only translate between HTTP and [`crate::core`]: they extract the
//! path and body, call one core function and wrap the result.

/// `GET /health`
pub mod health;
/// `/ingredients` and `/ingredients/:id`
pub mod ingredients;
/// `/recipes/:id/ingredients`
pub mod links;
/// `/recipes` and `/recipes/:id`
pub mod recipes;
/// `/ingredients/:id/sources`
pub mod sources;
