//! `ingredients` subcommands.

use super::{confirm_on_terminal, or_dash};
use crate::{
    client::ApiClient,
    entities::ingredient,
    errors::Result,
    models::IngredientPayload,
    view::{DeleteOutcome, IngredientsPage},
};
use clap::{Args, Subcommand};

/// Commands under `recipe-box ingredients`.
#[derive(Subcommand)]
pub enum IngredientCommands {
    /// List ingredients, optionally only those whose name matches
    List {
        /// Case-insensitive part of the name to look for
        #[arg(short, long, value_name = "TEXT")]
        search: Option<String>,
    },

    /// Show one ingredient
    Show {
        /// Ingredient id
        id: i64,
    },

    /// Create an ingredient
    Add {
        /// Field values
        #[command(flatten)]
        fields: IngredientFields,
    },

    /// Replace an ingredient's fields
    Edit {
        /// Ingredient id
        id: i64,

        /// Field values
        #[command(flatten)]
        fields: IngredientFields,
    },

    /// Delete an ingredient (refused while a recipe uses it)
    Delete {
        /// Ingredient id
        id: i64,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Every mutable ingredient field. Edits replace all of them.
#[derive(Args)]
pub struct IngredientFields {
    /// Ingredient name
    #[arg(long)]
    nom: String,

    /// Usual unit (g, ml, piece...)
    #[arg(long)]
    unit: Option<String>,

    /// Mark as gluten free; pass `false` to mark as containing gluten
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    gluten_free: Option<bool>,

    /// Fibre per 100 g
    #[arg(long)]
    fibre: Option<f64>,
}

impl From<IngredientFields> for IngredientPayload {
    fn from(fields: IngredientFields) -> Self {
        Self {
            name: Some(fields.nom),
            standard_unit: fields.unit,
            gluten_free: fields.gluten_free,
            fibre: fields.fibre,
        }
    }
}

pub(super) async fn run(api: &ApiClient, command: IngredientCommands) -> Result<()> {
    let mut page = IngredientsPage::new(api);

    match command {
        IngredientCommands::List { search } => {
            page.reload().await?;
            let found = page.matching(search.as_deref().unwrap_or_default());
            if found.is_empty() {
                match search {
                    Some(query) => println!("No ingredient matches \"{query}\"."),
                    None => println!("No ingredients yet."),
                }
            }
            for ingredient in found {
                print_ingredient_line(ingredient);
            }
        }
        IngredientCommands::Show { id } => {
            print_ingredient_line(&api.get_ingredient(id).await?);
        }
        IngredientCommands::Add { fields } => {
            let created = page.create(&fields.into()).await?;
            println!("Created ingredient {}.", created.ingredient_id);
        }
        IngredientCommands::Edit { id, fields } => {
            let updated = page.modify(id, &fields.into()).await?;
            print_ingredient_line(&updated);
        }
        IngredientCommands::Delete { id, yes } => {
            match page.delete(id, &confirm_on_terminal(yes)).await? {
                DeleteOutcome::Deleted(ingredient) => println!(
                    "Deleted ingredient {} ({}).",
                    ingredient.ingredient_id, ingredient.name
                ),
                DeleteOutcome::Cancelled => println!("Cancelled."),
            }
        }
    }

    Ok(())
}

fn print_ingredient_line(ingredient: &ingredient::Model) {
    let gluten = match ingredient.gluten_free {
        Some(true) => "gluten free",
        Some(false) => "contains gluten",
        None => "-",
    };
    println!(
        "{:>4}  {}  unit: {}  {}  fibre: {}",
        ingredient.ingredient_id,
        ingredient.name,
        or_dash(ingredient.standard_unit.as_ref()),
        gluten,
        or_dash(ingredient.fibre.as_ref()),
    );
}
