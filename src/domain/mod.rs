//! Domain layer: the room tree, the clue index and the navigation state machine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod clue_index;
pub mod entities;
pub mod error;
pub mod navigator;

pub use arena::{Room, RoomId, RoomTree};
pub use builder::MansionBuilder;
pub use clue_index::ClueIndex;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use navigator::{Arrival, NavState, Navigator, Rejection, StepOutcome, Terminal};
