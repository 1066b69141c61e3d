//! Infrastructure layer: console and filesystem implementations, DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod console;
pub mod di;
pub mod error;
pub mod scripted;
pub mod traits;

pub use error::InfraError;
