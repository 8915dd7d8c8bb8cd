use std::fmt;

/// Errors surfaced by [`super::Router::render`].
///
/// A failed match only becomes an error when the caller supplied no completion
/// callback; navigation driven by location changes always reports through the
/// not-found view instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The route is absent from the table, or no route was given.
    NotFound { requested: Option<String> },
    /// A partial failed to render.
    Render { partial: String, message: String },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::NotFound { requested: Some(r) } => write!(f, "Route not found: {r}"),
            RouterError::NotFound { requested: None } => write!(f, "Route not found"),
            RouterError::Render { partial, message } => {
                write!(f, "Failed to render partial '{partial}': {message}")
            }
        }
    }
}

impl std::error::Error for RouterError {}
