//! Command-line interface definitions and dispatch.
//!
//! `serve` (the default) runs the HTTP API. Every other command is a client of
//! a running API and goes through the matching page of [`crate::view`], so the
//! terminal sees the same flows as any other front end:
//! - `recipes` - list, show, add, edit, delete recipes and their ingredients
//! - `ingredients` - manage the ingredient catalogue
//! - `sources` - manage where an ingredient can be bought

mod ingredients;
mod recipes;
mod sources;

pub use ingredients::IngredientCommands;
pub use recipes::RecipeCommands;
pub use sources::SourceCommands;

use crate::{
    api,
    client::ApiClient,
    config::AppConfig,
    core::reconcile::LinkEntry,
    errors::Result,
};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};

/// Top-level command line.
#[derive(Parser)]
#[command(name = "recipe-box")]
#[command(version)]
#[command(about = "Recipe and ingredient manager with a REST API", long_about = None)]
pub struct Cli {
    /// Base URL of the API used by client commands (overrides RECIPE_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Command to run; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Commands of the `recipe-box` binary.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Port to listen on (overrides SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Interface to bind (overrides SERVER_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Database URL (overrides DATABASE_URL)
        #[arg(long, value_name = "URL")]
        database_url: Option<String>,
    },

    /// Manage recipes
    #[command(subcommand)]
    Recipes(RecipeCommands),

    /// Manage ingredients
    #[command(subcommand)]
    Ingredients(IngredientCommands),

    /// Manage ingredient purchase sources
    #[command(subcommand)]
    Sources(SourceCommands),
}

/// Runs the parsed command line against `config`.
///
/// # Errors
/// Returns the first error of the command; client commands report API
/// failures as [`crate::errors::Error::Api`].
pub async fn run(cli: Cli, mut config: AppConfig) -> Result<()> {
    if let Some(url) = cli.api_url {
        config.client.api_url = url;
    }

    match cli.command {
        None => api::serve(&config).await,
        Some(Commands::Serve {
            port,
            host,
            database_url,
        }) => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(url) = database_url {
                config.database.url = url;
            }
            api::serve(&config).await
        }
        Some(Commands::Recipes(command)) => {
            let api = ApiClient::new(&config.client.api_url)?;
            recipes::run(&api, command).await
        }
        Some(Commands::Ingredients(command)) => {
            let api = ApiClient::new(&config.client.api_url)?;
            ingredients::run(&api, command).await
        }
        Some(Commands::Sources(command)) => {
            let api = ApiClient::new(&config.client.api_url)?;
            sources::run(&api, command).await
        }
    }
}

/// Parses `ID:QTY[:UNIT[:COMMENT]]` into an ingredient line.
///
/// Empty quantity, unit or comment parts are left unset; the comment may
/// itself contain colons.
pub fn parse_link_entry(value: &str) -> std::result::Result<LinkEntry, String> {
    let mut parts = value.splitn(4, ':');

    let ingredient_id = parts
        .next()
        .unwrap_or_default()
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid ingredient id in '{value}': {e}"))?;

    let quantity = match parts.next().map(str::trim) {
        None | Some("") => None,
        Some(q) => Some(
            q.parse::<f64>()
                .map_err(|e| format!("invalid quantity in '{value}': {e}"))?,
        ),
    };

    let text = |part: Option<&str>| {
        part.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let unit = text(parts.next());
    let comment = text(parts.next());

    Ok(LinkEntry {
        ingredient_id,
        quantity,
        unit,
        comment,
    })
}

/// Asks `message [y/N]` on the terminal; anything but y/yes declines.
/// `assume_yes` skips the question.
pub(crate) fn confirm_on_terminal(assume_yes: bool) -> impl Fn(&str) -> bool {
    move |message: &str| {
        if assume_yes {
            return true;
        }
        ask(message).unwrap_or(false)
    }
}

fn ask(message: &str) -> io::Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{message} [y/N] ")?;
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Renders an optional column, `-` when unset.
pub(crate) fn or_dash<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_link_entry() {
        let full = parse_link_entry("3:250:g:sifted: twice").unwrap();
        assert_eq!(full.ingredient_id, 3);
        assert_eq!(full.quantity, Some(250.0));
        assert_eq!(full.unit.as_deref(), Some("g"));
        assert_eq!(full.comment.as_deref(), Some("sifted: twice"));

        let bare = parse_link_entry("7").unwrap();
        assert_eq!(bare.ingredient_id, 7);
        assert_eq!(bare.quantity, None);
        assert_eq!(bare.unit, None);

        let no_quantity = parse_link_entry("7::pinch").unwrap();
        assert_eq!(no_quantity.quantity, None);
        assert_eq!(no_quantity.unit.as_deref(), Some("pinch"));

        assert!(parse_link_entry("salt:1").is_err());
        assert!(parse_link_entry("1:lots").is_err());
    }

    #[test]
    fn test_serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["recipe-box"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["recipe-box", "serve", "--port", "8080"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Serve { port: Some(8080), .. })
        ));
    }

    #[test]
    fn test_ingredient_flags_parse() {
        let cli = Cli::try_parse_from([
            "recipe-box",
            "--api-url",
            "http://example.test/api",
            "recipes",
            "edit",
            "4",
            "--nom",
            "Pancakes",
            "--ingredient",
            "1:200:g",
            "--ingredient",
            "2:1",
            "--atomic",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://example.test/api"));
        let Some(Commands::Recipes(RecipeCommands::Edit {
            id,
            ingredients,
            atomic,
            clear_ingredients,
            ..
        })) = cli.command
        else {
            unreachable!("parsed into another command");
        };
        assert_eq!(id, 4);
        assert_eq!(ingredients.len(), 2);
        assert!(atomic);
        assert!(!clear_ingredients);
    }

    #[test]
    fn test_clear_conflicts_with_ingredients() {
        let result = Cli::try_parse_from([
            "recipe-box",
            "recipes",
            "edit",
            "4",
            "--nom",
            "Pancakes",
            "--ingredient",
            "1:200",
            "--clear-ingredients",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_ingredient_search_flag() {
        let cli = Cli::try_parse_from(["recipe-box", "ingredients", "list", "--search", "Flo"])
            .unwrap();
        let Some(Commands::Ingredients(IngredientCommands::List { search })) = cli.command else {
            unreachable!("parsed into another command");
        };
        assert_eq!(search.as_deref(), Some("Flo"));

        let cli = Cli::try_parse_from(["recipe-box", "ingredients", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Ingredients(IngredientCommands::List { search: None }))
        ));
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some(&"g")), "g");
        assert_eq!(or_dash::<f64>(None), "-");
    }
}
