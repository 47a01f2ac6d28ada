//! Vendor map payload codec.
//!
//! Map pieces and trace chunks travel as base64-encoded LZMA streams with
//! one quirk: the 8-byte unpacked-size field of the LZMA-alone header is
//! truncated to four bytes on the wire. [`decode_payload`] restores the
//! missing zero bytes at offset 8 before handing the stream to the
//! decompressor.
//!
//! The inverse, [`encode_payload`], exists for building test fixtures and is
//! gated behind the `test-helpers` feature.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::DecodeError;

/// Offset at which the vendor stream drops four bytes of the LZMA-alone
/// header. Streams of 8 bytes or fewer are passed through untouched.
const HEADER_GAP_OFFSET: usize = 8;

/// Decode one vendor payload into its raw decompressed bytes.
///
/// Fails if the input is not base64 or if the patched stream does not
/// decompress; no partial output is ever returned.
pub fn decode_payload(b64: &str) -> Result<Vec<u8>, DecodeError> {
    let stream = STANDARD.decode(b64)?;
    let patched = patch_header(stream);
    let mut reader = patched.as_slice();
    let mut raw = Vec::new();
    lzma_rs::lzma_decompress(&mut reader, &mut raw).map_err(DecodeError::Lzma)?;
    Ok(raw)
}

/// Re-insert the four header bytes the vendor omits.
fn patch_header(stream: Vec<u8>) -> Vec<u8> {
    if stream.len() <= HEADER_GAP_OFFSET {
        return stream;
    }
    let mut patched = Vec::with_capacity(stream.len() + 4);
    patched.extend_from_slice(&stream[..HEADER_GAP_OFFSET]);
    patched.extend_from_slice(&[0, 0, 0, 0]);
    patched.extend_from_slice(&stream[HEADER_GAP_OFFSET..]);
    patched
}

/// Build a vendor-shaped payload from raw bytes: LZMA-alone compress, drop
/// the four zero bytes [`decode_payload`] re-inserts, base64-encode.
///
/// Only valid for inputs below 16 MiB, where the dropped size bytes are
/// guaranteed to be zero; real map payloads are 10 000 bytes.
#[cfg(any(test, feature = "test-helpers"))]
pub fn encode_payload(raw: &[u8]) -> String {
    let mut compressed = Vec::new();
    let mut reader = raw;
    lzma_rs::lzma_compress(&mut reader, &mut compressed)
        .expect("in-memory lzma compression cannot fail");
    assert!(
        compressed[HEADER_GAP_OFFSET..HEADER_GAP_OFFSET + 4]
            .iter()
            .all(|&b| b == 0),
        "fixture input too large for the vendor header layout"
    );
    compressed.drain(HEADER_GAP_OFFSET..HEADER_GAP_OFFSET + 4);
    STANDARD.encode(compressed)
}
