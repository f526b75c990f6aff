//! Conditional one-shot decompression.
//!
//! This module provides the decode half of the crate: a [`Decompressor`]
//! capability trait, a default implementation backed by `flate2`, and the
//! [`maybe_decompress_gzip`] entry point that sniffs a buffer and either
//! decompresses it or hands it back untouched.
//!
//! Decoding is a whole-buffer transform: the entire input is fed to the
//! decompressor and the entire output is materialized before the call
//! returns. This suits "decode this blob", not unbounded streams.

use std::borrow::Cow;
use std::future::Future;
use std::io::{self, Read};
use std::pin::Pin;

use flate2::read::{DeflateDecoder, MultiGzDecoder, ZlibDecoder};

use crate::error::{GzSniffError, Result};
use crate::format::{CompressionFormat, is_gzip_format};

/// Default output chunk size for the provided decompressor (32KB).
const DEFAULT_CHUNK_SIZE: usize = 32 * 1024;

/// An injected decompression capability.
///
/// The conditional decoder does not implement any compression algorithm
/// itself; it delegates to whatever stands behind this trait. The provided
/// implementation is [`FlateDecompressor`], but callers can supply their
/// own binding (a different backend, an instrumented wrapper, a test
/// double) through [`maybe_decompress_gzip_with`].
pub trait Decompressor: Send + Sync {
    /// Decompress `input` as a single `format`-wrapped stream.
    ///
    /// # Returns
    ///
    /// The fully decompressed payload, or [`GzSniffError::Decode`] if the
    /// stream is malformed or truncated. All-or-nothing: no partial output
    /// is ever returned.
    fn decompress<'a>(
        &'a self,
        input: &'a [u8],
        format: CompressionFormat,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;
}

/// The provided [`Decompressor`], backed by `flate2`.
///
/// Output is drained from the decoder in fixed-size chunks, yielding to
/// the scheduler between chunks so a large payload cannot monopolize a
/// cooperative executor.
#[derive(Debug, Clone)]
pub struct FlateDecompressor {
    chunk_size: usize,
}

impl FlateDecompressor {
    /// Create a decompressor with the default chunk size.
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Create a decompressor with a custom output chunk size.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }
}

impl Default for FlateDecompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Decompressor for FlateDecompressor {
    fn decompress<'a>(
        &'a self,
        input: &'a [u8],
        format: CompressionFormat,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            match format {
                // MultiGzDecoder so concatenated members (legal per
                // RFC 1952) decode to the concatenated payload.
                CompressionFormat::Gzip => {
                    drain(MultiGzDecoder::new(input), format, self.chunk_size).await
                }
                CompressionFormat::Zlib => {
                    drain(ZlibDecoder::new(input), format, self.chunk_size).await
                }
                CompressionFormat::Deflate => {
                    drain(DeflateDecoder::new(input), format, self.chunk_size).await
                }
            }
        })
    }
}

/// Drain a decoder to completion, yielding between output chunks.
async fn drain<R: Read + Send>(
    mut decoder: R,
    format: CompressionFormat,
    chunk_size: usize,
) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    let mut chunk = vec![0u8; chunk_size];
    loop {
        match decoder.read(&mut chunk) {
            Ok(0) => return Ok(output),
            Ok(n) => output.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            // The source is an in-memory slice, so any read failure is the
            // decoder rejecting the stream, not real I/O.
            Err(e) => return Err(GzSniffError::decode(format, e.to_string())),
        }
        tokio::task::yield_now().await;
    }
}

/// Decompress `data` as a single `format`-wrapped stream.
///
/// Format-generic one-shot entry point using the default
/// [`FlateDecompressor`]. No sniffing: the caller asserts the format, and
/// a mismatch surfaces as [`GzSniffError::Decode`].
pub async fn decode(data: &[u8], format: CompressionFormat) -> Result<Vec<u8>> {
    let decompressor = FlateDecompressor::new();
    decompressor.decompress(data, format).await
}

/// Decompress `data` if it is in gzip format, otherwise just return it.
///
/// Non-gzip input (including empty and undersized buffers) comes back as
/// `Cow::Borrowed` without copying; gzip input is decoded into a new owned
/// buffer. A buffer that carries the gzip magic but holds a malformed or
/// truncated stream fails with [`GzSniffError::Decode`].
pub async fn maybe_decompress_gzip(data: &[u8]) -> Result<Cow<'_, [u8]>> {
    maybe_decompress_gzip_with(&FlateDecompressor::new(), data).await
}

/// [`maybe_decompress_gzip`] through an injected [`Decompressor`].
pub async fn maybe_decompress_gzip_with<'a, D>(
    decompressor: &D,
    data: &'a [u8],
) -> Result<Cow<'a, [u8]>>
where
    D: Decompressor + ?Sized,
{
    if is_gzip_format(data) {
        let decoded = decompressor
            .decompress(data, CompressionFormat::Gzip)
            .await?;
        return Ok(Cow::Owned(decoded));
    }
    Ok(Cow::Borrowed(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[tokio::test]
    async fn test_decode_gzip() {
        let compressed = gzip(b"hello");
        let decoded = decode(&compressed, CompressionFormat::Gzip).await.unwrap();
        assert_eq!(decoded, b"hello");
    }

    #[tokio::test]
    async fn test_decode_zlib() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"zlib payload").unwrap();
        let compressed = encoder.finish().unwrap();

        let decoded = decode(&compressed, CompressionFormat::Zlib).await.unwrap();
        assert_eq!(decoded, b"zlib payload");
    }

    #[tokio::test]
    async fn test_decode_raw_deflate() {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"raw deflate payload").unwrap();
        let compressed = encoder.finish().unwrap();

        let decoded = decode(&compressed, CompressionFormat::Deflate)
            .await
            .unwrap();
        assert_eq!(decoded, b"raw deflate payload");
    }

    #[tokio::test]
    async fn test_decode_concatenated_members() {
        let mut compressed = gzip(b"first ");
        compressed.extend_from_slice(&gzip(b"second"));

        let decoded = decode(&compressed, CompressionFormat::Gzip).await.unwrap();
        assert_eq!(decoded, b"first second");
    }

    #[tokio::test]
    async fn test_decode_small_chunks() {
        // Output larger than the chunk size forces multiple drain rounds.
        let payload = b"0123456789".repeat(100);
        let compressed = gzip(&payload);

        let decompressor = FlateDecompressor::with_chunk_size(64);
        let decoded = decompressor
            .decompress(&compressed, CompressionFormat::Gzip)
            .await
            .unwrap();
        assert_eq!(decoded, payload);
    }

    #[tokio::test]
    async fn test_decode_format_mismatch() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"zlib, not gzip").unwrap();
        let compressed = encoder.finish().unwrap();

        let err = decode(&compressed, CompressionFormat::Gzip)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GzSniffError::Decode {
                format: CompressionFormat::Gzip,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_maybe_decompress_roundtrip() {
        let compressed = gzip(b"hello");
        let result = maybe_decompress_gzip(&compressed).await.unwrap();
        assert_eq!(result.as_ref(), b"hello");
        assert!(matches!(result, Cow::Owned(_)));
    }

    #[tokio::test]
    async fn test_maybe_decompress_passthrough() {
        let raw = [0x68, 0x65, 0x6C, 0x6C, 0x6F]; // "hello"
        let result = maybe_decompress_gzip(&raw).await.unwrap();
        assert_eq!(result.as_ref(), b"hello");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[tokio::test]
    async fn test_maybe_decompress_empty() {
        let result = maybe_decompress_gzip(&[]).await.unwrap();
        assert!(result.is_empty());
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[tokio::test]
    async fn test_maybe_decompress_bare_magic() {
        // The magic alone is too short to be a stream; passed through.
        let raw = [0x1F, 0x8B];
        let result = maybe_decompress_gzip(&raw).await.unwrap();
        assert_eq!(result.as_ref(), &raw);
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[tokio::test]
    async fn test_maybe_decompress_truncated() {
        let compressed = gzip(b"some payload that will be cut short");
        // Keep the 10-byte header plus a sliver of the body.
        let truncated = &compressed[..12];

        let err = maybe_decompress_gzip(truncated).await.unwrap_err();
        assert!(matches!(err, GzSniffError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_maybe_decompress_corrupt_trailer() {
        let mut compressed = gzip(b"payload with a bad checksum");
        let last = compressed.len() - 5;
        compressed[last] ^= 0xFF; // flip a CRC-32 trailer byte

        let err = maybe_decompress_gzip(&compressed).await.unwrap_err();
        assert!(matches!(err, GzSniffError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_maybe_decompress_subslice() {
        // Only the window into the allocation may be considered.
        let mut storage = vec![0x1F, 0x8B]; // misleading bytes before the view
        let start = storage.len();
        storage.extend_from_slice(b"plain bytes");
        let end = storage.len();
        storage.extend_from_slice(&[0x1F, 0x8B, 0x08]);

        let result = maybe_decompress_gzip(&storage[start..end]).await.unwrap();
        assert_eq!(result.as_ref(), b"plain bytes");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[tokio::test]
    async fn test_maybe_decompress_empty_payload() {
        let compressed = gzip(b"");
        let result = maybe_decompress_gzip(&compressed).await.unwrap();
        assert!(result.is_empty());
        assert!(matches!(result, Cow::Owned(_)));
    }
}
