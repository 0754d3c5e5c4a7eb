//! `sources` subcommands. Each one selects the ingredient first.

use super::{confirm_on_terminal, or_dash};
use crate::{
    client::ApiClient,
    errors::Result,
    models::SourcePayload,
    view::{DeleteOutcome, SourcesPage},
};
use clap::{Args, Subcommand};

/// Commands under `recipe-box sources`.
#[derive(Subcommand)]
pub enum SourceCommands {
    /// List where an ingredient can be bought
    List {
        /// Ingredient id
        ingredient: i64,
    },

    /// Add a purchase source to an ingredient
    Add {
        /// Ingredient id
        ingredient: i64,

        /// Field values
        #[command(flatten)]
        fields: SourceFields,
    },

    /// Replace a source's fields
    Edit {
        /// Ingredient id
        ingredient: i64,

        /// Source id
        source: i64,

        /// Field values
        #[command(flatten)]
        fields: SourceFields,
    },

    /// Delete a source
    Delete {
        /// Ingredient id
        ingredient: i64,

        /// Source id
        source: i64,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Every mutable source field. Edits replace all of them.
#[derive(Args)]
pub struct SourceFields {
    /// Place of purchase
    #[arg(long)]
    lieu: String,

    /// Price
    #[arg(long)]
    prix: Option<f64>,

    /// Packaging (e.g. "1kg bag")
    #[arg(long)]
    quantite_achat: Option<String>,
}

impl From<SourceFields> for SourcePayload {
    fn from(fields: SourceFields) -> Self {
        Self {
            place: Some(fields.lieu),
            price: fields.prix,
            purchase_quantity: fields.quantite_achat,
        }
    }
}

pub(super) async fn run(api: &ApiClient, command: SourceCommands) -> Result<()> {
    let mut page = SourcesPage::new(api);

    match command {
        SourceCommands::List { ingredient } => {
            page.select(Some(ingredient)).await?;
            if page.sources().items().is_empty() {
                println!("No sources for ingredient {ingredient}.");
            }
            for source in page.sources().items() {
                println!(
                    "{:>4}  {}  at {}  price: {}  {}",
                    source.source_id,
                    source.ingredient_name,
                    source.place,
                    or_dash(source.price.as_ref()),
                    source.purchase_quantity.as_deref().unwrap_or_default(),
                );
            }
        }
        SourceCommands::Add { ingredient, fields } => {
            page.select(Some(ingredient)).await?;
            let created = page.add(&fields.into()).await?;
            println!(
                "Added source {} to ingredient {ingredient}.",
                created.source_id
            );
        }
        SourceCommands::Edit {
            ingredient,
            source,
            fields,
        } => {
            page.select(Some(ingredient)).await?;
            let updated = page.modify(source, &fields.into()).await?;
            println!("Updated source {} ({}).", updated.source_id, updated.place);
        }
        SourceCommands::Delete {
            ingredient,
            source,
            yes,
        } => {
            page.select(Some(ingredient)).await?;
            match page.delete(source, &confirm_on_terminal(yes)).await? {
                DeleteOutcome::Deleted(deleted) => {
                    println!("Deleted source {} ({}).", deleted.source_id, deleted.place);
                }
                DeleteOutcome::Cancelled => println!("Cancelled."),
            }
        }
    }

    Ok(())
}
