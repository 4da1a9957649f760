//! Charset registry: named lookup of byte-to-UTF-8 transcoders.

use encoding_rs::Encoding;

use crate::error::{ExtractError, Result};

/// Look up an encoding by its charset name or alias (case-insensitive).
///
/// Backed by `encoding_rs`' WHATWG label table, which covers the names
/// seen in mail headers (`utf-8`, `ISO-8859-1`, `shift_jis`, ...).
pub fn lookup(charset: &str) -> Result<&'static Encoding> {
    Encoding::for_label(charset.trim().as_bytes())
        .ok_or_else(|| ExtractError::UnsupportedCharset(charset.to_string()))
}

/// Decode bytes in the named charset to a UTF-8 string.
///
/// Unknown charset names are an [`ExtractError::UnsupportedCharset`] —
/// always recoverable; filename decoding falls back to the raw string.
pub fn decode(charset: &str, bytes: &[u8]) -> Result<String> {
    let charset_lower = charset.trim().to_lowercase();
    match charset_lower.as_str() {
        "utf-8" | "utf8" => Ok(String::from_utf8_lossy(bytes).into_owned()),
        _ => {
            let encoding = lookup(charset)?;
            let (decoded, _, _) = encoding.decode(bytes);
            Ok(decoded.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_common_charsets() {
        assert!(lookup("utf-8").is_ok());
        assert!(lookup("UTF-8").is_ok());
        assert!(lookup("ISO-8859-1").is_ok());
        assert!(lookup("windows-1252").is_ok());
        assert!(lookup("shift_jis").is_ok());
    }

    #[test]
    fn test_lookup_unknown_charset() {
        let err = lookup("x-no-such-charset").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedCharset(_)));
    }

    #[test]
    fn test_decode_latin1() {
        // 0xE9 is 'é' in ISO-8859-1
        assert_eq!(decode("ISO-8859-1", &[0x63, 0x61, 0x66, 0xE9]).unwrap(), "café");
    }

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode("utf-8", "café".as_bytes()).unwrap(), "café");
    }

    #[test]
    fn test_decode_unknown_is_error() {
        assert!(decode("klingon", b"abc").is_err());
    }
}
