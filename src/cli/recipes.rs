//! `recipes` subcommands.

use super::{confirm_on_terminal, or_dash, parse_link_entry};
use crate::{
    client::ApiClient,
    core::reconcile::{LinkEntry, LinkOp},
    entities::recipe,
    errors::Result,
    models::RecipePayload,
    view::{DeleteOutcome, RecipesPage, SaveMode},
};
use clap::{Args, Subcommand};

/// Commands under `recipe-box recipes`.
#[derive(Subcommand)]
pub enum RecipeCommands {
    /// List every recipe
    List,

    /// Show a recipe and its ingredients
    Show {
        /// Recipe id
        id: i64,
    },

    /// Create a recipe
    Add {
        /// Field values
        #[command(flatten)]
        fields: RecipeFields,

        /// Ingredient line as ID:QTY[:UNIT[:COMMENT]] (repeatable)
        #[arg(long = "ingredient", value_name = "LINE", value_parser = parse_link_entry)]
        ingredients: Vec<LinkEntry>,
    },

    /// Replace a recipe's fields and optionally its ingredient list
    Edit {
        /// Recipe id
        id: i64,

        /// Field values
        #[command(flatten)]
        fields: RecipeFields,

        /// New ingredient list, one ID:QTY[:UNIT[:COMMENT]] per flag; the
        /// current list is kept when none is given
        #[arg(long = "ingredient", value_name = "LINE", value_parser = parse_link_entry)]
        ingredients: Vec<LinkEntry>,

        /// Remove every ingredient from the recipe
        #[arg(long, conflicts_with = "ingredients")]
        clear_ingredients: bool,

        /// Apply the ingredient changes in a single server-side transaction
        #[arg(long)]
        atomic: bool,
    },

    /// Delete a recipe and its ingredient lines
    Delete {
        /// Recipe id
        id: i64,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Every mutable recipe field. Edits replace all of them.
#[derive(Args)]
pub struct RecipeFields {
    /// Recipe name
    #[arg(long)]
    nom: String,

    /// Author
    #[arg(long)]
    auteur: Option<String>,

    /// Steps and notes
    #[arg(long)]
    details: Option<String>,

    /// Link to the original recipe
    #[arg(long)]
    lien: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    tag: Option<String>,
}

impl From<RecipeFields> for RecipePayload {
    fn from(fields: RecipeFields) -> Self {
        Self {
            name: Some(fields.nom),
            author: fields.auteur,
            details: fields.details,
            link: fields.lien,
            tag: fields.tag,
        }
    }
}

pub(super) async fn run(api: &ApiClient, command: RecipeCommands) -> Result<()> {
    let mut page = RecipesPage::new(api);

    match command {
        RecipeCommands::List => {
            page.reload().await?;
            if page.recipes().items().is_empty() {
                println!("No recipes yet.");
            }
            for recipe in page.recipes().items() {
                print_recipe_line(recipe);
            }
        }
        RecipeCommands::Show { id } => {
            let recipe = api.get_recipe(id).await?;
            print_recipe_line(&recipe);
            if let Some(details) = &recipe.details {
                println!("    {details}");
            }
            if let Some(link) = &recipe.link {
                println!("    {link}");
            }

            let ingredients = page.ingredients_of(id).await?;
            if ingredients.is_empty() {
                println!("  (no ingredients)");
            }
            for line in ingredients {
                println!(
                    "  - [{}] {} {} {}{}",
                    line.ingredient_id,
                    line.name,
                    or_dash(line.quantity.as_ref()),
                    line.unit.as_deref().unwrap_or_default(),
                    line.comment
                        .as_deref()
                        .map(|c| format!(" ({c})"))
                        .unwrap_or_default(),
                );
            }
        }
        RecipeCommands::Add {
            fields,
            ingredients,
        } => {
            let created = page.create(&fields.into(), &ingredients).await?;
            println!(
                "Created recipe {} with {} ingredient(s).",
                created.recipe_id,
                ingredients.len()
            );
        }
        RecipeCommands::Edit {
            id,
            fields,
            ingredients,
            clear_ingredients,
            atomic,
        } => {
            let edited = if clear_ingredients {
                Some(&[][..])
            } else if ingredients.is_empty() {
                None
            } else {
                Some(ingredients.as_slice())
            };
            let mode = if atomic {
                SaveMode::Atomic
            } else {
                SaveMode::Sequential
            };

            let ops = page.modify(id, &fields.into(), edited, mode).await?;
            println!("Updated recipe {id}.");
            for op in &ops {
                print_op(op);
            }
        }
        RecipeCommands::Delete { id, yes } => {
            match page.delete(id, &confirm_on_terminal(yes)).await? {
                DeleteOutcome::Deleted(recipe) => {
                    println!("Deleted recipe {} ({}).", recipe.recipe_id, recipe.name);
                }
                DeleteOutcome::Cancelled => println!("Cancelled."),
            }
        }
    }

    Ok(())
}

fn print_recipe_line(recipe: &recipe::Model) {
    println!(
        "{:>4}  {}  by {}  [{}]",
        recipe.recipe_id,
        recipe.name,
        or_dash(recipe.author.as_ref()),
        tag_labels(recipe.tag.as_deref()).join("] ["),
    );
}

/// Splits the comma-separated `tag` column into trimmed labels.
fn tag_labels(tag: Option<&str>) -> Vec<&str> {
    tag.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .collect()
}

fn print_op(op: &LinkOp) {
    match op {
        LinkOp::Delete { ingredient_id } => println!("  - removed ingredient {ingredient_id}"),
        LinkOp::Update(entry) => println!(
            "  ~ ingredient {} now {}",
            entry.ingredient_id,
            or_dash(entry.quantity.as_ref())
        ),
        LinkOp::Create(entry) => println!(
            "  + ingredient {} ({})",
            entry.ingredient_id,
            or_dash(entry.quantity.as_ref())
        ),
    }
}
