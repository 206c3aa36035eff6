//! Pack Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Every kind is fatal to a run: the
//! pipeline never skips a bad file or returns a partial manifest.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A packing error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for packing operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The source root is missing, unreadable, or traversal failed part way.
    #[display("unable to scan source tree: {}", _0.display())]
    Scan(#[error(not(source))] PathBuf),
    /// A file cannot be expressed as a forward-slash separated UTF-8 logical path.
    #[display("invalid asset path: {}", _0.display())]
    InvalidPath(#[error(not(source))] PathBuf),
    /// A scanned file vanished or became unreadable before it was read.
    #[display("unable to read asset: {}", _0.display())]
    Read(#[error(not(source))] PathBuf),
    /// The compression engine failed while encoding or decoding an asset.
    #[display("codec failure for asset: {_0}")]
    Codec(#[error(not(source))] String),
    /// The blob buffer could not grow to hold another representation.
    #[display("unable to grow blob by {_0} bytes")]
    Packing(#[error(not(source))] usize),
}
