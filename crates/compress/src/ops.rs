//! Compression Operations

use crate::Compression;
use crate::error::{ErrorKind, Result};
use brotli::{CompressorWriter as BrotliEncoder, Decompressor as BrotliDecoder};
use exn::ResultExt;
use flate2::{Compression as GzCompression, read::GzDecoder, write::GzEncoder};
use std::io::{Read, Write};
use tracing::instrument;

// Use the highest compression level available for the formats; assets are
// compressed once when the artifact is generated and served many times.
const GZIP_LEVEL: GzCompression = GzCompression::best();
const BROTLI_LEVEL: u32 = 11;
const BROTLI_BUFFER_SIZE: usize = 4096;
const BROTLI_LG_WINDOW_SIZE: u32 = 22;

impl Compression {
    /// Compress a byte slice in memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedpack_compress::Compression;
    ///
    /// let data = "Hello, world! ".repeat(32);
    /// let compressed = Compression::Gzip.compress(data.as_bytes()).unwrap();
    /// assert!(compressed.len() < data.len());
    /// ```
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.compress_into(input, &mut output)?;
        Ok(output)
    }

    /// Decompress a byte slice in memory.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use embedpack_compress::Compression;
    ///
    /// let original = b"Hello, world!";
    /// let compressed = Compression::Brotli.compress(original).unwrap();
    /// let decompressed = Compression::Brotli.decompress(&compressed).unwrap();
    /// assert_eq!(decompressed, original);
    /// ```
    pub fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.decompress_into(input, &mut output)?;
        Ok(output)
    }

    /// Compress `input`, appending to `output`. Returns the length of `output`.
    #[instrument(skip(input, output), fields(
        format = %self,
        input_size = input.len(),
        output_size
    ))]
    pub fn compress_into(&self, input: &[u8], output: &mut Vec<u8>) -> Result<usize> {
        let size = match self {
            Compression::None => {
                output.extend_from_slice(input);
                output.len()
            },
            Compression::Gzip => {
                // flate2 writes a zeroed mtime into the header, so the
                // output only ever depends on the input bytes.
                let mut encoder = GzEncoder::new(&mut *output, GZIP_LEVEL);
                encoder.write_all(input).or_raise(|| ErrorKind::Io)?;
                encoder.finish().or_raise(|| ErrorKind::Encoder)?;
                output.len()
            },
            Compression::Brotli => {
                let mut encoder =
                    BrotliEncoder::new(&mut *output, BROTLI_BUFFER_SIZE, BROTLI_LEVEL, BROTLI_LG_WINDOW_SIZE);
                encoder.write_all(input).or_raise(|| ErrorKind::Io)?;
                encoder.flush().or_raise(|| ErrorKind::Encoder)?;
                // No fallible finish: consuming the writer emits the final meta-block.
                let _ = encoder.into_inner();
                output.len()
            },
        };
        tracing::Span::current().record("output_size", size);
        Ok(size)
    }

    /// Decompress `input`, appending to `output`. Returns the number of bytes decoded.
    #[instrument(skip(input, output), fields(
        format = %self,
        input_size = input.len(),
        output_size
    ))]
    pub fn decompress_into(&self, input: &[u8], output: &mut Vec<u8>) -> Result<usize> {
        let size = match self {
            Compression::None => {
                output.extend_from_slice(input);
                input.len()
            },
            Compression::Gzip => {
                let mut decoder = GzDecoder::new(input);
                decoder.read_to_end(output).or_raise(|| ErrorKind::InvalidData)?
            },
            Compression::Brotli => {
                let mut decoder = BrotliDecoder::new(input, BROTLI_BUFFER_SIZE);
                decoder.read_to_end(output).or_raise(|| ErrorKind::InvalidData)?
            },
        };
        tracing::Span::current().record("output_size", size);
        Ok(size)
    }
}
