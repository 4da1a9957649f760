//! RFC 5322 header parsing: block splitting, folding, and structured values.

use std::collections::HashMap;

use crate::error::{ExtractError, Result};
use crate::model::headers::HeaderMap;
use crate::model::media::{ContentDisposition, MediaType};

/// Split a raw message into its header block and body.
///
/// The split point is the first blank line (`\n\n` or `\r\n\r\n`). A
/// message without a blank line is all headers and has an empty body.
pub fn split_message(raw: &[u8]) -> (&[u8], &[u8]) {
    // A leading blank line means an empty header block
    if let Some(body) = raw.strip_prefix(b"\r\n") {
        return (&[], body);
    }
    if let Some(body) = raw.strip_prefix(b"\n") {
        return (&[], body);
    }
    for i in 0..raw.len().saturating_sub(1) {
        if raw[i] == b'\n' && raw[i + 1] == b'\n' {
            return (&raw[..i], &raw[i + 2..]);
        }
        if i + 3 < raw.len()
            && raw[i] == b'\r'
            && raw[i + 1] == b'\n'
            && raw[i + 2] == b'\r'
            && raw[i + 3] == b'\n'
        {
            return (&raw[..i], &raw[i + 4..]);
        }
    }
    (raw, &[])
}

/// Parse a raw header block into a [`HeaderMap`].
///
/// Continuation lines (starting with space or tab) are unfolded into the
/// previous field's value with a single joining space. Lines without a
/// colon that are not continuations are silently skipped.
pub fn parse_header_block(raw_headers: &[u8]) -> HeaderMap {
    let text = decode_header_bytes(raw_headers);
    let mut headers = HeaderMap::new();
    let mut current: Option<(String, String)> = None;

    for line in text.lines() {
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some((_, value)) = current.as_mut() {
                value.push(' ');
                value.push_str(line.trim());
            }
        } else if let Some(colon_pos) = line.find(':') {
            if let Some((name, value)) = current.take() {
                headers.push(&name, value);
            }
            let name = line[..colon_pos].trim().to_string();
            let value = line[colon_pos + 1..].trim().to_string();
            current = Some((name, value));
        }
    }
    if let Some((name, value)) = current.take() {
        headers.push(&name, value);
    }

    headers
}

/// Decode raw header bytes to a string.
///
/// Tries UTF-8 first, then falls back to Windows-1252 (which accepts
/// every byte).
fn decode_header_bytes(bytes: &[u8]) -> String {
    // Strip BOM if present
    let bytes = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &bytes[3..]
    } else {
        bytes
    };

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

/// Parse a `Content-Type` value of the form `type/subtype; key=value; ...`.
///
/// Type, subtype and parameter keys are lower-cased; parameter values
/// keep their case and lose surrounding quotes.
pub fn parse_media_type(value: &str) -> Result<MediaType> {
    let mut parts = value.split(';');

    let type_str = parts.next().unwrap_or("").trim();
    if type_str.is_empty() {
        return Err(ExtractError::HeaderParse(
            "empty Content-Type value".to_string(),
        ));
    }

    let (main_type, sub_type) = type_str
        .split_once('/')
        .ok_or_else(|| ExtractError::HeaderParse(format!("malformed media type '{type_str}'")))?;
    let main_type = main_type.trim().to_lowercase();
    let sub_type = sub_type.trim().to_lowercase();
    if main_type.is_empty() || sub_type.is_empty() {
        return Err(ExtractError::HeaderParse(format!(
            "malformed media type '{type_str}'"
        )));
    }

    Ok(MediaType {
        main_type,
        sub_type,
        parameters: parse_parameters(parts),
    })
}

/// Parse a `Content-Disposition` value of the form `token; key=value; ...`.
pub fn parse_disposition(value: &str) -> Result<ContentDisposition> {
    let mut parts = value.split(';');

    let token = parts.next().unwrap_or("").trim().to_lowercase();
    if token.is_empty() {
        return Err(ExtractError::HeaderParse(
            "empty Content-Disposition value".to_string(),
        ));
    }

    Ok(ContentDisposition {
        disposition: token,
        parameters: parse_parameters(parts),
    })
}

/// Parse `key=value` parameters, respecting quoted values.
///
/// Keys are lower-cased; segments without `=` are skipped.
fn parse_parameters<'a>(parts: impl Iterator<Item = &'a str>) -> HashMap<String, String> {
    let mut parameters = HashMap::new();
    for param in parts {
        if let Some((key, value)) = param.trim().split_once('=') {
            let key = key.trim().to_lowercase();
            let value = value.trim().trim_matches('"').to_string();
            parameters.insert(key, value);
        }
    }
    parameters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_message_lf() {
        let raw = b"Subject: Hi\nFrom: a@b.com\n\nBody here\n";
        let (headers, body) = split_message(raw);
        assert!(headers.ends_with(b"a@b.com"));
        assert_eq!(body, b"Body here\n");
    }

    #[test]
    fn test_split_message_crlf() {
        let raw = b"Subject: Hi\r\n\r\nBody\r\n";
        let (headers, body) = split_message(raw);
        assert_eq!(headers, b"Subject: Hi");
        assert_eq!(body, b"Body\r\n");
    }

    #[test]
    fn test_split_message_no_body() {
        let raw = b"Subject: Hi\n";
        let (headers, body) = split_message(raw);
        assert_eq!(headers, raw);
        assert!(body.is_empty());
    }

    #[test]
    fn test_parse_header_block_unfolds() {
        let raw = b"Subject: This is a long\n\tsubject line\nFrom: user@example.com\n";
        let headers = parse_header_block(raw);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("subject"), Some("This is a long subject line"));
        assert_eq!(headers.get("from"), Some("user@example.com"));
    }

    #[test]
    fn test_parse_header_block_folded_content_type() {
        let raw = b"Content-Type: application/pdf;\r\n name=\"report.pdf\"\r\n";
        let headers = parse_header_block(raw);
        assert_eq!(
            headers.get("content-type"),
            Some("application/pdf; name=\"report.pdf\"")
        );
    }

    #[test]
    fn test_parse_media_type_basic() {
        let mt = parse_media_type("Application/PDF; name=\"A.pdf\"").unwrap();
        assert_eq!(mt.main_type, "application");
        assert_eq!(mt.sub_type, "pdf");
        assert!(mt.is_pdf());
        // Parameter values keep their case
        assert_eq!(mt.name(), Some("A.pdf"));
    }

    #[test]
    fn test_parse_media_type_boundary() {
        let mt = parse_media_type("multipart/mixed; boundary=\"XyZ\"").unwrap();
        assert!(mt.is_multipart());
        assert_eq!(mt.boundary(), Some("XyZ"));
    }

    #[test]
    fn test_parse_media_type_unquoted_param() {
        let mt = parse_media_type("multipart/mixed; boundary=simple").unwrap();
        assert_eq!(mt.boundary(), Some("simple"));
    }

    #[test]
    fn test_parse_media_type_missing_slash() {
        assert!(parse_media_type("pdf").is_err());
        assert!(parse_media_type("").is_err());
        assert!(parse_media_type("application/").is_err());
    }

    #[test]
    fn test_parse_disposition() {
        let d = parse_disposition("Attachment; filename=\"a.pdf\"").unwrap();
        assert!(d.is_attachment());
        assert_eq!(d.filename(), Some("a.pdf"));
    }

    #[test]
    fn test_parse_disposition_inline() {
        let d = parse_disposition("inline").unwrap();
        assert_eq!(d.disposition, "inline");
        assert!(!d.is_attachment());
    }

    #[test]
    fn test_parse_disposition_empty_is_error() {
        assert!(parse_disposition("").is_err());
        assert!(parse_disposition("   ").is_err());
    }
}
