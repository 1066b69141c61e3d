//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("cannot read map file {path}: {source}")]
    MapRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid map file {path}: {message}")]
    MapParse { path: PathBuf, message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
