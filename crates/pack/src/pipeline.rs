//! Pipeline orchestration: scan → read → tag → select → pack.

use crate::blob::Blob;
use crate::error::{ErrorKind, Result};
use crate::manifest::Manifest;
use crate::mime::mime_type;
use crate::record::AssetRecord;
use crate::scan::{ScannedFile, Scanner};
use crate::select::select;
use crate::tag::Tag;
use exn::ResultExt;
use std::fs;
use std::path::Path;
use tracing::instrument;

/// Builds a [`Manifest`] from a directory tree.
///
/// Files are processed one at a time, in scan order; the blob's append
/// order is what assigns every range, so there is nothing to parallelize
/// without splitting compression from packing.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    follow_symlinks: bool,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Process every regular file under `root`.
    ///
    /// The first failure aborts the run; there is no way to get a manifest
    /// covering only the files processed so far.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn process(&self, root: impl AsRef<Path>) -> Result<Manifest> {
        let files = Scanner::new(root).follow_symlinks(self.follow_symlinks).scan()?;
        let mut blob = Blob::new();
        let mut records = Vec::with_capacity(files.len());
        for file in &files {
            records.push(pack_file(&mut blob, file)?);
        }
        let manifest = Manifest::new(records, blob);
        let stats = manifest.stats();
        tracing::info!(
            assets = stats.assets,
            raw_bytes = stats.raw_bytes,
            blob_bytes = stats.blob_bytes,
            gzip = stats.gzip,
            brotli = stats.brotli,
            "Packed asset tree"
        );
        Ok(manifest)
    }
}

/// Process every regular file under `root` with default options.
pub fn process(root: impl AsRef<Path>) -> Result<Manifest> {
    Pipeline::default().process(root)
}

fn pack_file(blob: &mut Blob, file: &ScannedFile) -> Result<AssetRecord> {
    let data = fs::read(&file.source).or_raise(|| ErrorKind::Read(file.source.clone()))?;
    pack_asset(blob, file.path.as_str(), &data)
}

/// Compress one asset, append its representations to `blob`, and return the
/// finished record.
///
/// Appending and recording the ranges happen together here so a record can
/// never disagree with the blob it was packed into.
#[instrument(skip_all, fields(path = tracing::field::Empty, size = data.len()))]
pub fn pack_asset(blob: &mut Blob, path: impl Into<String>, data: &[u8]) -> Result<AssetRecord> {
    let path = path.into();
    tracing::Span::current().record("path", path.as_str());
    let selection = select(data).or_raise(|| ErrorKind::Codec(path.clone()))?;
    let primary = blob.append(&selection.primary.bytes)?;
    let brotli = selection.brotli.as_deref().map(|bytes| blob.append(bytes)).transpose()?;
    tracing::debug!(
        encoding = %selection.primary.compression,
        primary = primary.len(),
        brotli = brotli.map(|range| range.len()),
        "Selected representations"
    );
    Ok(AssetRecord {
        mime_type: mime_type(&path).to_string(),
        tag: Tag::of(data),
        size: data.len() as u64,
        encoding: selection.primary.compression,
        primary,
        brotli,
        path,
    })
}
