//! Command-line Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A command-line error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for the command-line shell.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("unable to resolve configuration")]
    Config,
    #[display("unable to pack assets")]
    Pack,
    #[display("unable to generate module")]
    Generate,
    #[display("unable to write output: {}", _0.display())]
    Write(#[error(not(source))] PathBuf),
    #[display("system clock is before the Unix epoch")]
    Clock,
}
