use crate::errors::Result;
use tracing::warn;

/// Where a page is in loading its collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A load is in flight
    Loading,
    /// The last load succeeded
    Loaded,
    /// The last load failed with this message
    Errored(String),
}

/// A page's collection together with its load state.
///
/// A failed load keeps the previously loaded items so the page can still
/// show them next to the error.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection<T> {
    state: LoadState,
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            state: LoadState::Idle,
            items: Vec::new(),
        }
    }
}

impl<T> Collection<T> {
    /// An idle, empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current load state.
    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    /// Items from the last successful load.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Message of the last failed load, if the last load failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Errored(message) => Some(message),
            _ => None,
        }
    }

    /// Enters `Loading`.
    pub fn begin_load(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Records the outcome of a load and hands the error back to the caller.
    ///
    /// # Errors
    /// Returns the load error after recording it as [`LoadState::Errored`].
    pub fn finish_load(&mut self, result: Result<Vec<T>>) -> Result<()> {
        match result {
            Ok(items) => {
                self.items = items;
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Load failed");
                self.state = LoadState::Errored(e.to_string());
                Err(e)
            }
        }
    }

    /// Back to `Idle` with no items.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
