//! Content-Transfer-Encoding handling for part bodies.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{ExtractError, Result};
use crate::model::headers::HeaderMap;

/// Decode a part's body according to its `Content-Transfer-Encoding`.
///
/// `base64` (case-insensitive) is decoded with the standard alphabet,
/// tolerating embedded line breaks and whitespace. Any other value — or
/// no header at all — passes the bytes through unmodified; body-level
/// `quoted-printable` is deliberately not special-cased.
pub fn decode_body(headers: &HeaderMap, body: &[u8]) -> Result<Vec<u8>> {
    let encoding = headers
        .get("content-transfer-encoding")
        .unwrap_or("")
        .trim()
        .to_lowercase();

    if encoding == "base64" {
        decode_base64(body)
    } else {
        Ok(body.to_vec())
    }
}

/// Decode base64 content, skipping line breaks and whitespace.
fn decode_base64(body: &[u8]) -> Result<Vec<u8>> {
    let cleaned: Vec<u8> = body
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    BASE64
        .decode(&cleaned)
        .map_err(|e| ExtractError::InvalidBase64(e.to_string()))
}
