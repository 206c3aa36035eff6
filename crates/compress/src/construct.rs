use crate::Compression;
use crate::error::{Error, ErrorKind};
use std::str::FromStr;

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

impl FromStr for Compression {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "identity" => Ok(Compression::None),
            "gz" | "gzip" => Ok(Compression::Gzip),
            "br" | "brotli" => Ok(Compression::Brotli),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(s.to_string())),
        }
    }
}
impl Compression {
    /// Detect compression format from magic bytes.
    ///
    /// Brotli streams have no magic bytes, so they are reported as
    /// [`None`](Compression::None) just like unrecognized input.
    #[must_use]
    pub fn from_magic_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&GZIP_MAGIC) {
            return Compression::Gzip;
        }
        Compression::None
    }
}
