//! Config Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// An explicitly requested config file does not exist.
    #[display("config file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// A provider failed, or the merged values don't fit the schema.
    #[display("unable to load configuration")]
    Load,
    /// Values were loaded but are not usable.
    #[display("invalid configuration: {_0}")]
    Invalid(#[error(not(source))] String),
}
