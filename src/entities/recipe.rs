//! Recipe entity - A named recipe with optional author, free-text details,
//! a link to the original and a comma-joined tag string.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recipe database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    /// Unique identifier for the recipe
    #[sea_orm(primary_key)]
    pub recipe_id: i64,
    /// Recipe name, never empty
    #[sea_orm(column_name = "nom")]
    #[serde(rename = "nom")]
    pub name: String,
    /// Who wrote the recipe
    #[sea_orm(column_name = "auteur")]
    #[serde(rename = "auteur")]
    pub author: Option<String>,
    /// Steps, notes, description
    #[sea_orm(column_name = "details_recette")]
    #[serde(rename = "details_recette")]
    pub details: Option<String>,
    /// URL of the original recipe
    #[sea_orm(column_name = "lien")]
    #[serde(rename = "lien")]
    pub link: Option<String>,
    /// Comma-joined tags (e.g. "Italian, Quick")
    pub tag: Option<String>,
}

/// Defines relationships between Recipe and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One recipe has many ingredient links
    #[sea_orm(has_many = "super::recipe_ingredient::Entity")]
    RecipeIngredients,
}

impl Related<super::recipe_ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeIngredients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
