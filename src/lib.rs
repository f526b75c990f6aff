//! # gzsniff
//!
//! Gzip detection and one-shot conditional decompression.
//!
//! This crate answers one question — "is this buffer gzip?" — and acts on
//! the answer: gzip buffers are decompressed in full through a delegated
//! decompression primitive, anything else is passed back unchanged without
//! copying.
//!
//! - [`format`]: magic-byte sniffing and the [`CompressionFormat`] tag
//! - [`decode`]: the [`Decompressor`] seam and conditional decoding
//! - [`error`]: error types
//!
//! Detection looks only at the two magic bytes `0x1F 0x8B` (RFC 1952) and
//! never reads past the slice it is given; a sub-view into a larger
//! allocation is sniffed and decoded strictly within its own window.
//!
//! ## Example
//!
//! ```rust
//! use gzsniff::maybe_decompress_gzip;
//! use std::borrow::Cow;
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! // Raw bytes come back borrowed, untouched.
//! let raw = b"hello";
//! let out = maybe_decompress_gzip(raw).await.unwrap();
//! assert!(matches!(out, Cow::Borrowed(_)));
//! assert_eq!(out.as_ref(), b"hello");
//! # });
//! ```
//!
//! Decoding is all-or-nothing over a whole in-memory buffer. For unbounded
//! streams, decode incrementally with `flate2` directly instead.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod error;
pub mod format;

// Re-exports for convenience
pub use decode::{Decompressor, FlateDecompressor, decode, maybe_decompress_gzip,
    maybe_decompress_gzip_with};
pub use error::{GzSniffError, Result};
pub use format::{CompressionFormat, GZIP_MAGIC, is_gzip_format};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::decode::{Decompressor, FlateDecompressor, decode, maybe_decompress_gzip};
    pub use crate::error::{GzSniffError, Result};
    pub use crate::format::{CompressionFormat, is_gzip_format};
}
