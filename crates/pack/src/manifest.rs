//! The finished output of a run: records, their index, and the blob.

use crate::blob::Blob;
use crate::error::{ErrorKind, Result};
use crate::record::AssetRecord;
use exn::ResultExt;
use std::collections::BTreeMap;

/// Maps each asset path to its position in the record sequence.
///
/// Built once from the final records; there is exactly one entry per record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManifestIndex(BTreeMap<String, usize>);

impl ManifestIndex {
    fn build(records: &[AssetRecord]) -> Self {
        let index: BTreeMap<_, _> = records.iter().enumerate().map(|(i, r)| (r.path.clone(), i)).collect();
        debug_assert_eq!(index.len(), records.len(), "asset paths must be unique");
        Self(index)
    }

    pub fn get(&self, path: &str) -> Option<usize> {
        self.0.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(path, i)| (path.as_str(), *i))
    }
}

/// Totals for a packed manifest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub assets: usize,
    /// Sum of original asset sizes.
    pub raw_bytes: u64,
    pub blob_bytes: usize,
    /// Assets whose primary representation is gzip.
    pub gzip: usize,
    /// Assets with a Brotli representation.
    pub brotli: usize,
}

/// Ordered [`AssetRecord`]s, their [`ManifestIndex`], and the [`Blob`] their
/// ranges point into. Ranges are only meaningful against this exact blob.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    records: Vec<AssetRecord>,
    index: ManifestIndex,
    blob: Blob,
}

impl Manifest {
    pub(crate) fn new(records: Vec<AssetRecord>, blob: Blob) -> Self {
        let index = ManifestIndex::build(&records);
        Self { records, index, blob }
    }

    /// Records in scan order (lexicographic by path).
    pub fn records(&self) -> &[AssetRecord] {
        &self.records
    }

    pub fn index(&self) -> &ManifestIndex {
        &self.index
    }

    pub fn blob(&self) -> &Blob {
        &self.blob
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&AssetRecord> {
        self.index.get(path).map(|i| &self.records[i])
    }

    /// Bytes of the record's primary representation.
    ///
    /// # Panics
    ///
    /// If `record` was not produced alongside this manifest's blob.
    pub fn primary(&self, record: &AssetRecord) -> &[u8] {
        &self.blob.as_bytes()[record.primary.start..record.primary.end]
    }

    /// Bytes of the record's Brotli representation, if one was stored.
    ///
    /// # Panics
    ///
    /// If `record` was not produced alongside this manifest's blob.
    pub fn secondary(&self, record: &AssetRecord) -> Option<&[u8]> {
        record.brotli.map(|range| &self.blob.as_bytes()[range.start..range.end])
    }

    /// The original content of the asset at `path`, decoding gzip if needed.
    pub fn content(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let Some(record) = self.get(path) else {
            return Ok(None);
        };
        let content = record
            .encoding
            .decompress(self.primary(record))
            .or_raise(|| ErrorKind::Codec(record.path.clone()))?;
        Ok(Some(content))
    }

    pub fn stats(&self) -> Stats {
        Stats {
            assets: self.records.len(),
            raw_bytes: self.records.iter().map(|r| r.size).sum(),
            blob_bytes: self.blob.len(),
            gzip: self.records.iter().filter(|r| r.has_gzip()).count(),
            brotli: self.records.iter().filter(|r| r.has_brotli()).count(),
        }
    }

    pub fn into_parts(self) -> (Vec<AssetRecord>, ManifestIndex, Blob) {
        (self.records, self.index, self.blob)
    }
}
