use crate::catalog::UnknownItemError;

// ============================================================================
// Order Validation Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Order must contain at least one item")]
    EmptySelection,

    #[error(transparent)]
    UnknownItem(#[from] UnknownItemError),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("'{0}' is not a valid total")]
    InvalidThreshold(String),
}

impl ValidationError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::EmptySelection => "empty_selection",
            ValidationError::UnknownItem(_) => "unknown_item",
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::InvalidThreshold(_) => "invalid_threshold",
        }
    }
}
