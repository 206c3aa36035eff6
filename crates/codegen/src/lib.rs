//! Rust source generation for packed assets.
//!
//! Renders a [`Manifest`] into a standalone Rust module that embeds the blob
//! as a static byte array and exposes a `get(path)` lookup over the records.
//! Every field, range, and the record order are copied verbatim: ranges are
//! only valid against the exact blob they were packed into.
//!
//! The module preamble comes from an [upon] template; the tables are written
//! directly since they are large and entirely regular.
//!
//! ```no_run
//! use embedpack_codegen::{GenerateOptions, Generator};
//!
//! let manifest = embedpack_pack::process("web/dist").unwrap();
//! let options = GenerateOptions::new("embedpack", 1_700_000_000);
//! let source = Generator::new().unwrap().render(&manifest, &options).unwrap();
//! std::fs::write("src/assets.rs", source).unwrap();
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use embedpack_pack::{AssetRecord, ByteRange, Manifest};
use exn::ResultExt;
use std::fmt::Write;
use tracing::instrument;
use upon::{Engine, Template};

const MODULE_TEMPLATE: &str = include_str!("module.rs.tpl");
const BYTES_PER_LINE: usize = 16;

/// Settings that end up in the generated module but don't come from the assets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Tool name for the "Code generated by" header.
    pub generated_by: String,
    /// `cfg` predicate to gate the whole module behind.
    pub cfg: Option<String>,
    /// Unix timestamp (seconds) exposed as `STAMP`.
    pub timestamp: u64,
}

impl GenerateOptions {
    pub fn new(generated_by: impl Into<String>, timestamp: u64) -> Self {
        Self {
            generated_by: generated_by.into(),
            cfg: None,
            timestamp,
        }
    }

    #[must_use]
    pub fn with_cfg(mut self, cfg: impl Into<Option<String>>) -> Self {
        self.cfg = cfg.into();
        self
    }

    /// Both values are spliced into the module as-is, so each must stay on
    /// its own line and `cfg` must not close the attribute early.
    pub fn validate(&self) -> Result<()> {
        if self.generated_by.contains(['\n', '\r']) {
            exn::bail!(ErrorKind::InvalidOption("generated_by must be a single line".to_string()));
        }
        if let Some(cfg) = &self.cfg
            && cfg.contains(['\n', '\r', ']'])
        {
            exn::bail!(ErrorKind::InvalidOption(format!("cfg predicate `{cfg}` is not a single expression")));
        }
        Ok(())
    }
}

/// Renders manifests into Rust source. The template is compiled once in
/// [`Generator::new`] and reused for every render.
pub struct Generator {
    engine: Engine<'static>,
    template: Template<'static>,
}

impl Generator {
    pub fn new() -> Result<Self> {
        let engine = Engine::new();
        // Compile the template early so we can fail-fast in construction.
        let template = engine.compile(MODULE_TEMPLATE).or_raise(|| ErrorKind::Template)?;
        Ok(Self { engine, template })
    }

    /// Render `manifest` as a Rust module. Identical input renders identical output.
    #[instrument(skip_all, fields(assets = manifest.len(), blob_len = manifest.blob().len(), output_size))]
    pub fn render(&self, manifest: &Manifest, options: &GenerateOptions) -> Result<String> {
        options.validate()?;
        let parameters = upon::value! {
            generated_by: options.generated_by.as_str(),
            cfg: options.cfg.as_deref(),
            stamp: options.timestamp,
            count: manifest.len() as u64,
            blob_len: manifest.blob().len() as u64,
            index: index_table(manifest),
            files: files_table(manifest),
            blob: byte_table(manifest.blob().as_bytes()),
        };
        let source = self
            .template
            .render(&self.engine, parameters)
            .to_string()
            .or_raise(|| ErrorKind::Template)?;
        tracing::Span::current().record("output_size", source.len());
        Ok(source)
    }
}

// Writing to a String can't fail, hence the discarded fmt::Results below.

fn index_table(manifest: &Manifest) -> String {
    let mut out = String::new();
    for (path, position) in manifest.index().iter() {
        let _ = write!(out, "\n    ({path:?}, {position}),");
    }
    close_table(out)
}

fn files_table(manifest: &Manifest) -> String {
    let mut out = String::new();
    for record in manifest.records() {
        file_entry(&mut out, record);
    }
    close_table(out)
}

fn file_entry(out: &mut String, record: &AssetRecord) {
    let range = |r: ByteRange| format!("({}, {})", r.start, r.end);
    let _ = write!(
        out,
        "\n    File {{\
         \n        name: {name:?},\
         \n        path: {path:?},\
         \n        size: {size},\
         \n        mime: {mime:?},\
         \n        tag: \"{tag}\",\
         \n        gz: {gz},\
         \n        br: {br},\
         \n        data: {data},\
         \n        brotli: {brotli},\
         \n    }},",
        name = record.name(),
        path = record.path(),
        size = record.size(),
        mime = record.mime_type(),
        tag = record.tag(),
        gz = record.has_gzip(),
        br = record.has_brotli(),
        data = range(record.primary_range()),
        brotli = range(record.secondary_range()),
    );
}

fn byte_table(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 6 + bytes.len() / BYTES_PER_LINE * 5);
    for line in bytes.chunks(BYTES_PER_LINE) {
        out.push_str("\n   ");
        for byte in line {
            let _ = write!(out, " 0x{byte:02x},");
        }
    }
    close_table(out)
}

/// Non-empty tables end on their own line; empty ones render as `[]`.
fn close_table(mut out: String) -> String {
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
