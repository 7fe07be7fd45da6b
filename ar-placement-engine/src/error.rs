use thiserror::Error;

/// Failure of a single placement operation.
///
/// None of these are fatal: the handler that hits one logs it, reports it to
/// the page and leaves the scene as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error("required scene handle is missing: {0}")]
    MissingHandle(&'static str),
    #[error("invalid furniture type selected: {0}")]
    InvalidSelection(String),
    #[error("unparsable value {raw:?} for control {control}")]
    UnparsableInput { control: String, raw: String },
    #[error("invalid catalog entry {id}: {reason}")]
    InvalidCatalog { id: String, reason: String },
}

impl PlacementError {
    /// Stable identifier forwarded to the page with `placement_error`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingHandle(_) => "missing_handle",
            Self::InvalidSelection(_) => "invalid_selection",
            Self::UnparsableInput { .. } => "unparsable_input",
            Self::InvalidCatalog { .. } => "invalid_catalog",
        }
    }
}
