//! Compression and decompression for pre-compressed asset representations.
//!
//! This crate wraps the codec libraries behind a unified [`Compression`] enum,
//! providing:
//!
//! - **Format parsing** from names ([`FromStr`](std::str::FromStr)) and
//!   detection from magic bytes ([`Compression::from_magic_bytes`])
//! - **In-memory** compression/decompression ([`Compression::compress`],
//!   [`Compression::decompress`])
//! - **HTTP naming** of each format ([`Compression::content_encoding`])
//!
//! All compression uses the highest available level for each format,
//! prioritizing output size over speed. Assets are compressed once at build
//! time and served many times, so the trade-off is always worth it.

mod construct;
pub mod error;
mod ops;
mod util;

/// A supported compression format.
///
/// Defaults to [`None`](Self::None) (uncompressed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Uncompressed
    #[default]
    None,
    /// Gzip compression (.gz)
    Gzip,
    /// Brotli compression (.br)
    Brotli,
}

#[cfg(test)]
mod tests {
    use crate::Compression;

    #[test]
    fn compression_default() {
        assert_eq!(Compression::default(), Compression::None);
    }
}
