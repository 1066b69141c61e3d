//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::Direction;

/// Domain errors represent violations of the map's shape rules.
/// Navigation itself never fails: rejected moves are reported, not raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("map has no rooms")]
    EmptyMap,

    #[error("map already has a root room: {0}")]
    RootExists(String),

    #[error("room '{parent}' already has a passage to the {side}")]
    SlotOccupied { parent: String, side: Direction },

    #[error("unknown room handle")]
    UnknownRoom,

    #[error("invalid map: {0}")]
    InvalidMap(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
