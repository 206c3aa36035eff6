//! Asset packing pipeline.
//!
//! Turns a directory tree into a [`Manifest`]: one contiguous [`Blob`] plus an
//! ordered list of [`AssetRecord`]s describing where each file's stored
//! representations live inside it. Every file gets a primary representation
//! (gzip when it helps, raw bytes otherwise) and, when Brotli beats both, a
//! secondary Brotli representation.
//!
//! ```no_run
//! let manifest = embedpack_pack::process("assets/").unwrap();
//! let index = manifest.get("index.html").unwrap();
//! println!("{} ({}) {}", index.path(), index.mime_type(), index.tag());
//! ```
//!
//! A run is all-or-nothing: the first I/O or codec failure aborts it and no
//! partial manifest is ever returned.

mod blob;
pub mod error;
mod manifest;
mod mime;
mod pipeline;
mod record;
mod scan;
mod select;
mod tag;

pub use crate::blob::{Blob, ByteRange};
pub use crate::manifest::{Manifest, ManifestIndex, Stats};
pub use crate::mime::{DEFAULT_MIME_TYPE, mime_type};
pub use crate::pipeline::{Pipeline, pack_asset, process};
pub use crate::record::AssetRecord;
pub use crate::scan::{ScannedFile, Scanner};
pub use crate::select::{Representation, Selection, select};
pub use crate::tag::Tag;
pub use embedpack_compress::Compression;
