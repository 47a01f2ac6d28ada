#![forbid(unsafe_code)]

//! Binary-format layer for the vacmap engine.
//!
//! Everything the vacuum sends about its map arrives as small base64 strings
//! wrapping vendor-flavored LZMA streams. This crate decodes them into plain
//! values and knows nothing about accumulated state:
//!
//! - [`payload`] — the shared decompression primitive (and its quirk: the
//!   stream omits four bytes of the LZMA-alone header).
//! - [`tile`] — one 100×100 map piece decoded from a single payload.
//! - [`trace`] — fixed-width path-history records and their transform into
//!   render-space points.
//!
//! State tracking, change detection, and rendering live in `vacmap-engine`.

pub mod payload;
pub mod tile;
pub mod trace;

pub use payload::decode_payload;
pub use tile::{PixelKind, TILE_CELLS, TILE_COUNT, TILE_SIDE, TileGrid};
pub use trace::{TracePoint, parse_trace_points};

/// Errors raised while decoding a vendor payload.
///
/// Every variant is recoverable: the caller skips the offending update and
/// keeps whatever it had before.
#[derive(Debug)]
pub enum DecodeError {
    /// The payload is not valid base64.
    Base64(base64::DecodeError),
    /// The patched stream failed LZMA decompression.
    Lzma(lzma_rs::error::Error),
    /// A tile payload decompressed to the wrong number of cells.
    TileLength { actual: usize },
}

impl From<base64::DecodeError> for DecodeError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64(err)
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base64(err) => write!(f, "payload base64 decode failed: {err}"),
            Self::Lzma(err) => write!(f, "payload decompression failed: {err:?}"),
            Self::TileLength { actual } => write!(
                f,
                "tile payload decompressed to {actual} bytes, expected {}",
                tile::TILE_CELLS
            ),
        }
    }
}

impl std::error::Error for DecodeError {}
