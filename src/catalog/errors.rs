use std::path::PathBuf;

// ============================================================================
// Catalog Errors
// ============================================================================

/// Failure to load the menu. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("Failed to read menu file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Menu source is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Menu contains no items")]
    Empty,

    #[error("Menu item at position {0} has a blank name")]
    BlankName(usize),

    #[error("Menu item '{0}' appears more than once")]
    DuplicateItem(String),

    #[error("Menu item '{name}' has an invalid cost: {cost}")]
    InvalidCost { name: String, cost: String },
}

/// Lookup of a name that is not on the menu.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("'{0}' is not on the menu")]
pub struct UnknownItemError(pub String);
