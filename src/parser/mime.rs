//! Multipart body walking: boundary splitting and sub-part parsing.

use crate::model::part::MessagePart;
use crate::parser::header;

/// Split a multipart body into its sub-part segments.
///
/// The body is scanned line by line for delimiter lines (`--boundary`,
/// with the closing form `--boundary--`). Preamble before the first
/// delimiter and epilogue after the closing delimiter are discarded; the
/// line terminator preceding a delimiter belongs to the delimiter, not to
/// the part. A missing closing delimiter is tolerated — the final segment
/// then ends at EOF.
///
/// Nested `multipart/*` sub-parts are NOT descended into; segments are
/// yielded one level deep.
pub fn split_multipart<'a>(body: &'a [u8], boundary: &str) -> Vec<&'a [u8]> {
    let delim = format!("--{boundary}");
    let close = format!("--{boundary}--");

    let mut segments = Vec::new();
    let mut seg_start: Option<usize> = None;
    let mut pos = 0;

    while pos <= body.len() {
        let (line, next) = match body[pos..].iter().position(|&b| b == b'\n') {
            Some(i) => (&body[pos..pos + i], pos + i + 1),
            None => (&body[pos..], body.len() + 1),
        };
        let trimmed = trim_line_end(line);

        if trimmed == close.as_bytes() {
            if let Some(start) = seg_start.take() {
                // max() keeps an empty part between adjacent delimiters in range
                segments.push(&body[start..delimiter_line_start(body, pos).max(start)]);
            }
            break;
        }
        if trimmed == delim.as_bytes() {
            if let Some(start) = seg_start {
                segments.push(&body[start..delimiter_line_start(body, pos).max(start)]);
            }
            seg_start = Some(next.min(body.len()));
        }

        if next > body.len() {
            break;
        }
        pos = next;
    }

    // No closing delimiter seen: flush the trailing segment
    if let Some(start) = seg_start {
        if start <= body.len() {
            segments.push(&body[start..]);
        }
    }

    segments
}

/// Parse a raw segment into a [`MessagePart`] (own header block + body).
pub fn parse_part(raw: &[u8]) -> MessagePart<'_> {
    let (header_bytes, part_body) = header::split_message(raw);
    MessagePart {
        headers: header::parse_header_block(header_bytes),
        body: part_body,
    }
}

/// Strip the trailing `\r` and transport padding from a delimiter line.
fn trim_line_end(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    while end > 0 && (line[end - 1] == b'\r' || line[end - 1] == b' ' || line[end - 1] == b'\t') {
        end -= 1;
    }
    &line[..end]
}

/// Byte offset where a delimiter line's preceding terminator starts.
fn delimiter_line_start(body: &[u8], line_start: usize) -> usize {
    let mut end = line_start;
    if end > 0 && body[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && body[end - 1] == b'\r' {
        end -= 1;
    }
    end
}
