//! RFC 2047 encoded-word decoding for header parameter values.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{ExtractError, Result};
use crate::parser::charset;

/// Decode RFC 2047 encoded-words in a header value.
///
/// Example: `"=?UTF-8?B?SG9sYQ==?= =?UTF-8?B?IG11bmRv?="` → `"Hola mundo"`
///
/// Text that is not a well-formed `=?charset?enc?text?=` word passes
/// through as literal text. A well-formed word whose charset is unknown
/// or whose payload cannot be decoded is an error — callers fall back to
/// the original string and record a single warning.
pub fn decode_encoded_words(input: &str) -> Result<String> {
    let mut result = String::with_capacity(input.len());
    let mut remaining = input;
    let mut last_was_encoded = false;

    while let Some(start) = remaining.find("=?") {
        let before = &remaining[..start];
        // If the gap between two encoded words is only whitespace, skip it (RFC 2047 §6.2)
        if !last_was_encoded || !before.trim().is_empty() {
            result.push_str(before);
        }

        let after_start = &remaining[start + 2..];

        match try_decode_one_word(after_start)? {
            Some(decoded) => {
                result.push_str(&decoded.text);
                remaining = &remaining[start + 2 + decoded.consumed..];
                last_was_encoded = true;
            }
            None => {
                result.push_str("=?");
                remaining = after_start;
                last_was_encoded = false;
            }
        }
    }

    result.push_str(remaining);
    Ok(result)
}

struct DecodedWord {
    text: String,
    consumed: usize, // bytes consumed from the string *after* the initial "=?"
}

/// Try to decode one word. `Ok(None)` means the text is not a well-formed
/// encoded-word and should pass through literally.
fn try_decode_one_word(s: &str) -> Result<Option<DecodedWord>> {
    // Format: charset?encoding?encoded_text?=
    let Some(first_q) = s.find('?') else {
        return Ok(None);
    };
    let charset_name = &s[..first_q];

    let rest = &s[first_q + 1..];
    let Some(second_q) = rest.find('?') else {
        return Ok(None);
    };
    let encoding = &rest[..second_q];

    let rest2 = &rest[second_q + 1..];
    let Some(end) = rest2.find("?=") else {
        return Ok(None);
    };
    let encoded_text = &rest2[..end];

    let total_consumed = first_q + 1 + second_q + 1 + end + 2;

    let bytes = match encoding.to_uppercase().as_str() {
        "B" => decode_b_encoding(encoded_text)?,
        "Q" => decode_q_encoding(encoded_text),
        _ => return Ok(None),
    };

    let text = charset::decode(charset_name, &bytes)?;

    Ok(Some(DecodedWord {
        text,
        consumed: total_consumed,
    }))
}

/// Decode B-encoding (base64, standard alphabet, whitespace tolerated).
fn decode_b_encoding(input: &str) -> Result<Vec<u8>> {
    let cleaned: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    BASE64
        .decode(cleaned.as_bytes())
        .map_err(|e| ExtractError::InvalidBase64(e.to_string()))
}

/// Decode Q-encoding (RFC 2047): underscores → spaces, `=XX` → byte.
fn decode_q_encoding(input: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(input.len());
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'_' => {
                result.push(b' ');
                i += 1;
            }
            b'=' if i + 2 < bytes.len() => {
                if let Ok(byte) = u8::from_str_radix(
                    std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap_or("00"),
                    16,
                ) {
                    result.push(byte);
                    i += 3;
                } else {
                    result.push(b'=');
                    i += 1;
                }
            }
            b => {
                result.push(b);
                i += 1;
            }
        }
    }
    result
}
