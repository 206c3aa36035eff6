use crate::blob::ByteRange;
use crate::tag::Tag;
use embedpack_compress::Compression;

/// Everything needed to serve one asset straight out of the blob.
///
/// Records are only built by the pipeline, which appends to the blob and
/// fills in the ranges in the same step; they are read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRecord {
    pub(crate) path: String,
    pub(crate) size: u64,
    pub(crate) mime_type: String,
    pub(crate) tag: Tag,
    pub(crate) encoding: Compression,
    pub(crate) primary: ByteRange,
    pub(crate) brotli: Option<ByteRange>,
}

impl AssetRecord {
    /// Root-relative, forward-slash separated path. Unique within a manifest.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Final segment of the path.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Length of the original, uncompressed content.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Encoding of the primary representation: [`Compression::Gzip`] or [`Compression::None`].
    pub fn encoding(&self) -> Compression {
        self.encoding
    }

    pub fn has_gzip(&self) -> bool {
        self.encoding == Compression::Gzip
    }

    pub fn has_brotli(&self) -> bool {
        self.brotli.is_some()
    }

    pub fn primary_range(&self) -> ByteRange {
        self.primary
    }

    /// Range of the Brotli representation, or [`ByteRange::EMPTY`] when there is none.
    pub fn secondary_range(&self) -> ByteRange {
        self.brotli.unwrap_or(ByteRange::EMPTY)
    }

    /// Choose the representation to serve for a client's accepted encodings.
    ///
    /// Brotli wins when stored and accepted, then the primary slot. Returns
    /// `None` when the only thing stored is gzip and the client can't decode
    /// it; the caller then has to decompress before serving.
    pub fn preferred(&self, accepts_brotli: bool, accepts_gzip: bool) -> Option<(Compression, ByteRange)> {
        if accepts_brotli && let Some(range) = self.brotli {
            return Some((Compression::Brotli, range));
        }
        match self.encoding {
            Compression::Gzip if !accepts_gzip => None,
            encoding => Some((encoding, self.primary)),
        }
    }
}
