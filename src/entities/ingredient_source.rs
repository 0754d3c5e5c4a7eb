//! Ingredient source entity - Where an ingredient can be bought, at what
//! price and in which packaging.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ingredient source database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredient_sources")]
pub struct Model {
    /// Unique identifier for the source
    #[sea_orm(primary_key)]
    pub source_id: i64,
    /// Ingredient sold at this place
    pub ingredient_id: i64,
    /// Place of purchase, never empty
    #[sea_orm(column_name = "lieu")]
    #[serde(rename = "lieu")]
    pub place: String,
    /// Price paid for `purchase_quantity`
    #[sea_orm(column_name = "prix")]
    #[serde(rename = "prix")]
    pub price: Option<f64>,
    /// Packaging description ("1kg bag", "6 pack")
    #[sea_orm(column_name = "quantite_achat")]
    #[serde(rename = "quantite_achat")]
    pub purchase_quantity: Option<String>,
}

/// Defines relationships between IngredientSource and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each source belongs to one ingredient
    #[sea_orm(
        belongs_to = "super::ingredient::Entity",
        from = "Column::IngredientId",
        to = "super::ingredient::Column::IngredientId",
        on_delete = "Cascade"
    )]
    Ingredient,
}

impl Related<super::ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
