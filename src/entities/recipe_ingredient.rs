//! Recipe ingredient entity - The link between a recipe and an ingredient.
//!
//! A link has no surrogate id: `(recipe_id, ingredient_id)` is the primary
//! key, so an ingredient appears at most once per recipe. Deleting a recipe
//! cascades to its links; deleting an ingredient that is still linked is
//! refused by the database.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recipe ingredient database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe_ingredients")]
pub struct Model {
    /// Recipe this link belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub recipe_id: i64,
    /// Ingredient used by the recipe
    #[sea_orm(primary_key, auto_increment = false)]
    pub ingredient_id: i64,
    /// Amount of the ingredient
    #[sea_orm(column_name = "quantite")]
    #[serde(rename = "quantite")]
    pub quantity: Option<f64>,
    /// Unit the amount is expressed in
    pub unit: Option<String>,
    /// Free-text remark ("finely chopped")
    pub comment: Option<String>,
}

/// Defines relationships between RecipeIngredient and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each link belongs to one recipe
    #[sea_orm(
        belongs_to = "super::recipe::Entity",
        from = "Column::RecipeId",
        to = "super::recipe::Column::RecipeId",
        on_delete = "Cascade"
    )]
    Recipe,
    /// Each link points to one ingredient
    #[sea_orm(
        belongs_to = "super::ingredient::Entity",
        from = "Column::IngredientId",
        to = "super::ingredient::Column::IngredientId",
        on_delete = "Restrict"
    )]
    Ingredient,
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipe.def()
    }
}

impl Related<super::ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
