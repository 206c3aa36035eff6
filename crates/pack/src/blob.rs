//! The shared, append-only byte buffer holding every stored representation.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::ops::Range;

/// A half-open byte range `[start, end)` into a [`Blob`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// The `(0, 0)` range recorded for a representation that is absent.
    pub const EMPTY: ByteRange = ByteRange { start: 0, end: 0 };

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether the two ranges share at least one byte. Empty ranges overlap nothing.
    pub fn overlaps(&self, other: &ByteRange) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }
}

impl From<ByteRange> for Range<usize> {
    fn from(range: ByteRange) -> Self {
        range.start..range.end
    }
}

/// Append-only packed bytes.
///
/// Each [`append`](Self::append) returns the range the bytes now occupy.
/// Ranges are handed out in call order, never overlap, and identical inputs
/// are never deduplicated. Not meant to be shared between threads: append
/// order *is* the layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Blob {
    bytes: Vec<u8>,
}

impl Blob {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `bytes`, returning the range they occupy.
    ///
    /// ```
    /// use embedpack_pack::{Blob, ByteRange};
    ///
    /// let mut blob = Blob::new();
    /// assert_eq!(blob.append(b"abc").unwrap(), ByteRange { start: 0, end: 3 });
    /// assert_eq!(blob.append(b"de").unwrap(), ByteRange { start: 3, end: 5 });
    /// assert_eq!(blob.as_bytes(), b"abcde");
    /// ```
    pub fn append(&mut self, bytes: &[u8]) -> Result<ByteRange> {
        self.bytes.try_reserve(bytes.len()).or_raise(|| ErrorKind::Packing(bytes.len()))?;
        let start = self.bytes.len();
        self.bytes.extend_from_slice(bytes);
        Ok(ByteRange { start, end: self.bytes.len() })
    }

    /// The bytes within `range`, or `None` if it falls outside the blob.
    pub fn get(&self, range: ByteRange) -> Option<&[u8]> {
        self.bytes.get(Range::from(range))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_append_is_sequential() {
        let mut blob = Blob::new();
        let first = blob.append(b"first").unwrap();
        let empty = blob.append(b"").unwrap();
        let second = blob.append(b"second").unwrap();
        assert_eq!(first, ByteRange { start: 0, end: 5 });
        assert_eq!(empty, ByteRange { start: 5, end: 5 });
        assert_eq!(second, ByteRange { start: 5, end: 11 });
        assert_eq!(blob.len(), 11);
        assert_eq!(blob.get(first).unwrap(), b"first");
        assert_eq!(blob.get(second).unwrap(), b"second");
    }

    #[test]
    fn test_identical_bytes_are_not_deduplicated() {
        let mut blob = Blob::new();
        let a = blob.append(b"same").unwrap();
        let b = blob.append(b"same").unwrap();
        assert_ne!(a, b);
        assert!(!a.overlaps(&b));
        assert_eq!(blob.as_bytes(), b"samesame");
    }

    #[test]
    fn test_get_out_of_bounds() {
        let mut blob = Blob::new();
        blob.append(b"abc").unwrap();
        assert!(blob.get(ByteRange { start: 2, end: 4 }).is_none());
        assert_eq!(blob.get(ByteRange::EMPTY).unwrap(), b"");
    }

    #[rstest]
    #[case((0, 5), (5, 10), false)]
    #[case((0, 5), (4, 10), true)]
    #[case((3, 4), (0, 10), true)]
    #[case((3, 3), (0, 10), false)]
    #[case((0, 0), (0, 0), false)]
    fn test_overlaps(#[case] a: (usize, usize), #[case] b: (usize, usize), #[case] expected: bool) {
        let a = ByteRange { start: a.0, end: a.1 };
        let b = ByteRange { start: b.0, end: b.1 };
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected);
    }
}
