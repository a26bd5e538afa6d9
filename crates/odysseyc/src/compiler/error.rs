//! Errors of the compiler driver

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// An error occurred while running the compiler. Problems in the compiled program are never
/// errors, they are reported as diagnostics of the [Compilation](crate::Compilation).
#[derive(Debug, Error)]
pub enum OdysseycError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Build(#[from] BuildOdysseycError),
}

/// An error occurred while building an [Odysseyc](crate::Odysseyc) instance
#[derive(Debug, Error)]
pub enum BuildOdysseycError {
    #[error("the module name can not be empty")]
    EmptyModuleName,
    #[error("the entry point can not be empty")]
    EmptyEntryPoint,
}

/// A type alias for general results in odysseyc
pub type OdysseycResult<T> = Result<T, OdysseycError>;
