//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, ChoiceSource, Presenter)
//! but are themselves concrete structs, not traits.

mod investigation;
mod map;

pub use investigation::{InvestigationService, Report};
pub use map::MapService;
