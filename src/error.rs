//! Error types for catalog loading and drop expansion.

use crate::catalog::ItemId;
use std::path::PathBuf;

/// Result type alias using [`DropError`].
pub type Result<T> = std::result::Result<T, DropError>;

/// Everything that can abort a simulation run.
///
/// All of these are fatal: the run stops and no partial multiset is returned.
#[derive(Debug, thiserror::Error)]
pub enum DropError {
    /// An id was referenced that the catalog does not define.
    #[error("item {0} is not defined in the catalog")]
    UnknownItem(ItemId),

    /// The engine reached an item whose kind it cannot expand.
    #[error("unhandled item type {kind:?} on item {id}")]
    UnhandledKind { id: ItemId, kind: String },

    /// A weighted selection was requested over nothing (empty list or all-zero weights).
    #[error("weighted selection requires a positive total weight")]
    EmptySelection,

    /// A weighted selection list contained a negative weight.
    #[error("negative weight {0} in weighted selection")]
    NegativeWeight(i64),

    /// Expansion did not reach a fixed point within the configured round ceiling.
    #[error("expansion did not settle after {rounds} rounds (cyclic catalog?)")]
    RoundLimitExceeded { rounds: usize },

    /// A bundle multiplied a quantity past what the working set can hold.
    #[error("quantity overflow while expanding item {id}")]
    QuantityOverflow { id: ItemId },

    /// A compact text field in the schema could not be decoded.
    #[error("invalid {field} {input:?}: {reason}")]
    InvalidEncoding {
        field: &'static str,
        input: String,
        reason: String,
    },

    /// An item id outside (0, 1_000_000_000).
    #[error("invalid item id: {0}")]
    InvalidItemId(i64),

    /// Two schema entries share an `itemdefid`.
    #[error("duplicate item id {id} in {}", file.display())]
    DuplicateItem { id: ItemId, file: PathBuf },

    /// A schema item carries a field the loader does not know.
    #[error("unknown field {field:?} on item {id} in {}", file.display())]
    UnknownField {
        id: ItemId,
        field: String,
        file: PathBuf,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DropError {
    /// Create an encoding error for a schema text field.
    pub fn encoding(field: &'static str, input: &str, reason: impl Into<String>) -> Self {
        DropError::InvalidEncoding {
            field,
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by a malformed catalog rather than I/O.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, DropError::Io(_) | DropError::Json(_))
    }
}
