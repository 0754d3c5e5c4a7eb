//! Ingredient entity - Represents a purchasable ingredient.
//!
//! Each ingredient has a name, a standard unit, a gluten-free flag and its
//! fibre content per 100g. Ingredients are referenced by recipe links and own
//! their purchase sources.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ingredient database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    /// Unique identifier for the ingredient
    #[sea_orm(primary_key)]
    pub ingredient_id: i64,
    /// Ingredient name, never empty
    #[sea_orm(column_name = "nom")]
    #[serde(rename = "nom")]
    pub name: String,
    /// Unit the ingredient is usually measured in (e.g. "g", "ml")
    #[sea_orm(column_name = "unit_standard")]
    #[serde(rename = "unit_standard")]
    pub standard_unit: Option<String>,
    /// Whether the ingredient is gluten free
    pub gluten_free: Option<bool>,
    /// Fibre in grams per 100g
    pub fibre: Option<f64>,
}

/// Defines relationships between Ingredient and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One ingredient is used by many recipe links
    #[sea_orm(has_many = "super::recipe_ingredient::Entity")]
    RecipeIngredients,
    /// One ingredient has many purchase sources
    #[sea_orm(has_many = "super::ingredient_source::Entity")]
    Sources,
}

impl Related<super::recipe_ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeIngredients.def()
    }
}

impl Related<super::ingredient_source::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
