//! Compression format tags and magic-byte sniffing.
//!
//! Detection is deliberately conservative: only gzip carries a magic number
//! this module recognizes, and a buffer of two bytes or fewer is never
//! classified as gzip, since a valid gzip stream is at minimum a 10-byte
//! header plus an 8-byte trailer.

use std::io::Read;

use crate::error::Result;

/// GZIP magic bytes (RFC 1952).
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Detect gzip format from the two magic bytes at the start of `data`.
///
/// Returns `true` iff `data` is longer than two bytes and starts with
/// [`GZIP_MAGIC`]. Never reads past the slice; undersized or empty slices
/// are always "not gzip".
///
/// # Example
///
/// ```rust
/// use gzsniff::format::is_gzip_format;
///
/// assert!(is_gzip_format(&[0x1F, 0x8B, 0x08]));
/// assert!(!is_gzip_format(b"hello"));
/// assert!(!is_gzip_format(&[0x1F, 0x8B])); // too short to be a stream
/// ```
pub fn is_gzip_format(data: &[u8]) -> bool {
    data.len() > 2 && data[..2] == GZIP_MAGIC
}

/// Compression wrappings the decoder understands.
///
/// This is the algorithm tag passed to [`decode`](crate::decode::decode)
/// and [`Decompressor`](crate::decode::Decompressor): gzip (RFC 1952),
/// zlib (RFC 1950), and raw DEFLATE (RFC 1951).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// GZIP stream (.gz): 10-byte header, DEFLATE body, CRC-32 + size trailer.
    Gzip,
    /// Zlib stream: 2-byte header, DEFLATE body, Adler-32 trailer.
    Zlib,
    /// Raw DEFLATE stream with no framing.
    Deflate,
}

impl CompressionFormat {
    /// Detect format from magic bytes.
    ///
    /// Only gzip is reliably identifiable by signature; zlib and raw
    /// DEFLATE have no unambiguous magic, so anything that is not gzip
    /// comes back as `None`.
    pub fn from_magic(magic: &[u8]) -> Option<Self> {
        if is_gzip_format(magic) {
            return Some(Self::Gzip);
        }
        None
    }

    /// Detect format from a reader.
    ///
    /// Reads up to the magic length from `reader` and returns the detected
    /// format (if any) together with the bytes consumed, so the caller can
    /// stitch them back in front of the rest of the stream.
    pub fn detect<R: Read>(reader: &mut R) -> Result<(Option<Self>, Vec<u8>)> {
        // One extra byte so a bare two-byte magic still sniffs as "not gzip".
        let mut magic = vec![0u8; GZIP_MAGIC.len() + 1];
        let mut filled = 0;
        while filled < magic.len() {
            let n = reader.read(&mut magic[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        magic.truncate(filled);

        let format = Self::from_magic(&magic);
        Ok((format, magic))
    }

    /// Get the format name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Zlib => "zlib",
            Self::Deflate => "deflate",
        }
    }

    /// Get the typical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Gzip => "gz",
            Self::Zlib => "zz",
            Self::Deflate => "deflate",
        }
    }

    /// Get the MIME type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Gzip => "application/gzip",
            Self::Zlib => "application/zlib",
            Self::Deflate => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for CompressionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
