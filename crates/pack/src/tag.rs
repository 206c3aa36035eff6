//! Content tags for cache invalidation.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

/// A short content-derived identifier: the CRC-32C (Castagnoli) checksum of
/// an asset's original bytes, rendered as 8 lowercase hex digits.
///
/// Identical content always produces an identical tag, regardless of path or
/// modification time. This is for cache busting, not tamper detection.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(u32);

impl Tag {
    /// Tag the given content.
    ///
    /// ```
    /// use embedpack_pack::Tag;
    ///
    /// assert_eq!(Tag::of(b"123456789").to_string(), "e3069283");
    /// ```
    #[must_use]
    pub fn of(bytes: &[u8]) -> Self {
        Self(crc32c::crc32c(bytes))
    }

    /// The raw checksum value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        // Most significant nibble first; independent of host endianness.
        write!(f, "{:08x}", self.0)
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Tag({self})")
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_check_value() {
        // Standard CRC-32C check input.
        assert_eq!(Tag::of(b"123456789").value(), 0xE306_9283);
        assert_eq!(Tag::of(b"123456789").to_string(), "e3069283");
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(Tag::of(b"").to_string(), "00000000");
    }

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"hello".as_slice())]
    #[case(b"<!DOCTYPE html><html></html>".as_slice())]
    #[case(&[0xFF; 300])]
    fn test_always_eight_lowercase_hex(#[case] content: &[u8]) {
        let tag = Tag::of(content).to_string();
        assert_eq!(tag.len(), 8);
        assert!(tag.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(tag, Tag::of(content).to_string());
    }

    #[test]
    fn test_leading_zeros_are_kept() {
        assert_eq!(Tag(0xab).to_string(), "000000ab");
        assert_eq!(format!("{:?}", Tag(0xab)), "Tag(000000ab)");
    }

    #[test]
    fn test_content_changes_tag() {
        assert_ne!(Tag::of(b"body { color: red; }"), Tag::of(b"body { color: blue; }"));
    }
}
