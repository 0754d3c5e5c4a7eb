//! Request and response schemas shared by the API and its client.
//!
//! Payload structs mirror the JSON bodies accepted by each endpoint. Every
//! field is optional at the serde level so that a missing required field is
//! reported as [`Error::MissingField`] (400) instead of a deserialization
//! failure; [`required`] performs that check.

use crate::errors::{Error, Result};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

/// Body of `POST /recipes` and `PUT /recipes/:id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipePayload {
    /// Recipe name (required)
    #[serde(rename = "nom")]
    pub name: Option<String>,
    /// Author
    #[serde(rename = "auteur")]
    pub author: Option<String>,
    /// Steps and notes
    #[serde(rename = "details_recette")]
    pub details: Option<String>,
    /// Link to the original recipe
    #[serde(rename = "lien")]
    pub link: Option<String>,
    /// Comma-joined tags
    pub tag: Option<String>,
}

/// Body of `POST /ingredients` and `PUT /ingredients/:id`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientPayload {
    /// Ingredient name (required)
    #[serde(rename = "nom")]
    pub name: Option<String>,
    /// Usual unit
    #[serde(rename = "unit_standard")]
    pub standard_unit: Option<String>,
    /// Gluten-free flag
    pub gluten_free: Option<bool>,
    /// Fibre per 100g
    pub fibre: Option<f64>,
}

/// Body of `POST /recipes/:id/ingredients`, and one element of the
/// `PUT /recipes/:id/ingredients` array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkPayload {
    /// Ingredient to add (required)
    pub ingredient_id: Option<i64>,
    /// Amount
    #[serde(rename = "quantite")]
    pub quantity: Option<f64>,
    /// Unit of the amount
    pub unit: Option<String>,
    /// Free-text remark
    pub comment: Option<String>,
}

/// Body of `PUT /recipes/:id/ingredients/:ingId`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkUpdatePayload {
    /// Amount
    #[serde(rename = "quantite")]
    pub quantity: Option<f64>,
    /// Unit of the amount
    pub unit: Option<String>,
    /// Free-text remark
    pub comment: Option<String>,
}

/// Body of `POST /ingredients/:id/sources` and `PUT /ingredients/:id/sources/:srcId`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcePayload {
    /// Place of purchase (required)
    #[serde(rename = "lieu")]
    pub place: Option<String>,
    /// Price
    #[serde(rename = "prix")]
    pub price: Option<f64>,
    /// Packaging description
    #[serde(rename = "quantite_achat")]
    pub purchase_quantity: Option<String>,
}

/// One row of `GET /recipes/:id/ingredients`: link columns joined with the
/// ingredient they point to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromQueryResult)]
pub struct RecipeIngredientDetail {
    /// Amount
    #[serde(rename = "quantite")]
    pub quantity: Option<f64>,
    /// Unit of the amount
    pub unit: Option<String>,
    /// Free-text remark
    pub comment: Option<String>,
    /// Linked ingredient
    pub ingredient_id: i64,
    /// Ingredient name
    #[serde(rename = "nom")]
    pub name: String,
    /// Ingredient's usual unit
    #[serde(rename = "unit_standard")]
    pub standard_unit: Option<String>,
    /// Gluten-free flag
    pub gluten_free: Option<bool>,
    /// Fibre per 100g
    pub fibre: Option<f64>,
}

/// One row of `GET /ingredients/:id/sources`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromQueryResult)]
pub struct IngredientSourceDetail {
    /// Source id, needed to modify or delete the source
    pub source_id: i64,
    /// Ingredient the source belongs to
    pub ingredient_id: i64,
    /// Ingredient name
    #[serde(rename = "nom")]
    pub ingredient_name: String,
    /// Place of purchase
    #[serde(rename = "lieu")]
    pub place: String,
    /// Price
    #[serde(rename = "prix")]
    pub price: Option<f64>,
    /// Packaging description
    #[serde(rename = "quantite_achat")]
    pub purchase_quantity: Option<String>,
}

/// Body of every 4xx/5xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human readable message
    pub error: String,
}

/// Body of `GET /health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always "Server is running!" when the server answers
    pub status: String,
}

/// Unwraps a required text field, treating null, absent and blank alike.
pub fn required(value: Option<String>, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::MissingField { field }),
    }
}
