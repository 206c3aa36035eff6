//! Codegen Error Types

use derive_more::{Display, Error};

/// A code generation error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for code generation.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The module template failed to compile or render.
    #[display("issue with module template")]
    Template,
    /// A header value would break out of its line in the generated source.
    #[display("invalid generate option: {_0}")]
    InvalidOption(#[error(not(source))] String),
}
