//! View/state layer - one explicit state value per list page.
//!
//! Pages own their loaded collection and talk to the API through an
//! [`ApiClient`](crate::client::ApiClient). Every successful mutation is
//! followed by a reload of the page's collection; nothing is cached across
//! reloads. Deletions go through a [`Confirm`] prompt first.

/// Ingredient catalogue page
pub mod ingredients;
/// Recipe page, including the ingredient-list editor save flow
pub mod recipes;
/// Purchase sources page, gated on a selected ingredient
pub mod sources;
/// Load state machine shared by every page
pub mod state;

pub use ingredients::IngredientsPage;
pub use recipes::{RecipesPage, SaveMode};
pub use sources::SourcesPage;
pub use state::{Collection, LoadState};

/// Interactive yes/no question asked before a destructive action.
pub trait Confirm {
    /// Returns `true` when the user accepts `message`.
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Result of a delete request that needed confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome<T> {
    /// The row was deleted; carries the deleted row
    Deleted(T),
    /// The user declined; no request was sent
    Cancelled,
}
