//! Compression selection.
//!
//! Every asset keeps at most two stored representations:
//!
//! 1. **Primary** (always present): gzip if it is strictly smaller than the
//!    original, otherwise the original bytes. The primary slot is therefore
//!    never larger than the asset itself.
//! 2. **Brotli** (optional): kept only when it is strictly smaller than both
//!    the original *and* the gzip candidate, whichever of those ended up in
//!    the primary slot.

use embedpack_compress::Compression;
use embedpack_compress::error::Result;
use std::borrow::Cow;
use tracing::instrument;

/// One stored encoding of an asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Representation<'a> {
    /// [`Compression::None`] or [`Compression::Gzip`] for the primary slot.
    pub compression: Compression,
    pub bytes: Cow<'a, [u8]>,
}

impl<'a> Representation<'a> {
    /// The original bytes, borrowed rather than copied.
    fn raw(bytes: &'a [u8]) -> Self {
        Self {
            compression: Compression::None,
            bytes: Cow::Borrowed(bytes),
        }
    }

    fn gzip(bytes: Vec<u8>) -> Self {
        Self {
            compression: Compression::Gzip,
            bytes: Cow::Owned(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The representations chosen for one asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection<'a> {
    pub primary: Representation<'a>,
    pub brotli: Option<Vec<u8>>,
}

/// Compress `raw` with gzip and Brotli at maximum level and decide which
/// representations are worth storing.
///
/// A codec failure is returned as-is; the caller decides how to attribute it.
///
/// ```
/// use embedpack_pack::{Compression, select};
///
/// let selection = select(b"hello").unwrap();
/// assert_eq!(selection.primary.compression, Compression::None);
/// assert_eq!(&*selection.primary.bytes, b"hello");
/// assert!(selection.brotli.is_none());
/// ```
#[instrument(skip_all, fields(raw_size = raw.len(), gzip_size, brotli_size))]
pub fn select(raw: &[u8]) -> Result<Selection<'_>> {
    let gzip = Compression::Gzip.compress(raw)?;
    let gzip_size = gzip.len();
    let primary = match gzip_size < raw.len() {
        true => Representation::gzip(gzip),
        false => Representation::raw(raw),
    };
    let brotli = Compression::Brotli.compress(raw)?;
    let brotli_size = brotli.len();
    let span = tracing::Span::current();
    span.record("gzip_size", gzip_size);
    span.record("brotli_size", brotli_size);
    // Compared against the gzip candidate, not the chosen primary.
    let brotli = (brotli_size < raw.len() && brotli_size < gzip_size).then_some(brotli);
    Ok(Selection { primary, brotli })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Deterministic bytes that neither codec can shrink.
    fn noise(len: usize) -> Vec<u8> {
        let mut state: u32 = 0x9E37_79B9;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect()
    }

    #[test]
    fn test_short_text_stays_raw() {
        let selection = select(b"hello").unwrap();
        assert_eq!(selection.primary.compression, Compression::None);
        assert_eq!(&*selection.primary.bytes, b"hello");
        assert!(matches!(selection.primary.bytes, Cow::Borrowed(_)));
        assert!(selection.brotli.is_none());
    }

    #[test]
    fn test_repetitive_text_compresses() {
        let raw = "a".repeat(1000);
        let selection = select(raw.as_bytes()).unwrap();
        assert_eq!(selection.primary.compression, Compression::Gzip);
        assert!(selection.primary.len() < raw.len());
        assert_eq!(Compression::Gzip.decompress(&selection.primary.bytes).unwrap(), raw.as_bytes());
        let brotli = selection.brotli.expect("brotli should beat gzip on a long run");
        assert!(brotli.len() < selection.primary.len());
    }

    #[test]
    fn test_empty_input() {
        let selection = select(b"").unwrap();
        assert_eq!(selection.primary.compression, Compression::None);
        assert!(selection.primary.is_empty());
        assert!(selection.brotli.is_none());
    }

    #[test]
    fn test_incompressible_input() {
        let raw = noise(4096);
        let selection = select(&raw).unwrap();
        assert_eq!(selection.primary.compression, Compression::None);
        assert_eq!(&*selection.primary.bytes, raw.as_slice());
        assert!(selection.brotli.is_none());
    }

    #[rstest]
    #[case(b"".to_vec())]
    #[case(b"hello".to_vec())]
    #[case("<p>lorem ipsum dolor sit amet</p>\n".repeat(40).into_bytes())]
    #[case("a".repeat(1000).into_bytes())]
    #[case(noise(512))]
    fn test_selection_invariants(#[case] raw: Vec<u8>) {
        let selection = select(&raw).unwrap();
        let gzip = Compression::Gzip.compress(&raw).unwrap();
        // Primary is never larger than the original.
        assert!(selection.primary.len() <= raw.len());
        match selection.primary.compression {
            Compression::Gzip => assert!(gzip.len() < raw.len()),
            Compression::None => {
                assert!(gzip.len() >= raw.len());
                assert_eq!(&*selection.primary.bytes, raw.as_slice());
            },
            Compression::Brotli => panic!("brotli is never primary"),
        }
        if let Some(brotli) = selection.brotli {
            assert!(brotli.len() < raw.len());
            assert!(brotli.len() < gzip.len());
            assert!(brotli.len() < selection.primary.len());
            assert_eq!(Compression::Brotli.decompress(&brotli).unwrap(), raw);
        }
    }
}
