//! Per-message extraction pipeline.

use std::path::{Path, PathBuf};

use crate::error::{ExtractError, Result};
use crate::extract::{classify, content, filename};
use crate::model::media::{ContentDisposition, MediaType};
use crate::model::part::MessagePart;
use crate::model::report::{ExtractionResult, PdfCandidate};
use crate::parser::{encoded_word, header, mime};

/// Length cap applied to sanitized output filenames.
const MAX_FILENAME_LEN: usize = 150;

/// Extract every PDF attachment of one `.eml` file into `output_dir`.
pub fn extract_file(eml_path: &Path, output_dir: &Path) -> Result<ExtractionResult> {
    let raw = std::fs::read(eml_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ExtractError::FileNotFound(eml_path.to_path_buf())
        } else {
            ExtractError::io(eml_path, e)
        }
    })?;
    extract_message(&raw, eml_path, output_dir)
}

/// Extract every PDF attachment of one raw message into `output_dir`.
///
/// `source` is the message's own path, used only for warnings and
/// generated fallback names. A multipart message missing its `boundary`
/// parameter aborts with [`ExtractError::MissingBoundary`]; everything
/// else recoverable becomes a warning on the returned result, and files
/// written before a later failure stay on disk and stay counted.
pub fn extract_message(raw: &[u8], source: &Path, output_dir: &Path) -> Result<ExtractionResult> {
    let mut result = ExtractionResult::default();

    let (header_bytes, body) = header::split_message(raw);
    let headers = header::parse_header_block(header_bytes);

    let Some(media) = parse_top_media_type(&headers, source, &mut result) else {
        // Unparseable or absent top-level Content-Type: nothing further
        // can match application/pdf, so the lenient whole-body attempt
        // ends here with whatever was already recorded.
        return Ok(result);
    };

    if media.is_multipart() {
        let boundary = media
            .boundary()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| ExtractError::MissingBoundary(source.to_path_buf()))?
            .to_string();

        for (idx, segment) in mime::split_multipart(body, &boundary).iter().enumerate() {
            let part = mime::parse_part(segment);
            match process_part(&part, idx, source, output_dir, &mut result) {
                Ok(Some(path)) => result.files.push(path),
                Ok(None) => {}
                Err(e) => {
                    result.warn(format!("{}: part {idx}: {e}", source.display()));
                }
            }
        }
        return Ok(result);
    }

    // Non-multipart: the entire body is the single candidate part.
    let part = MessagePart { headers, body };
    let disposition = parse_part_disposition(&part, 0, source, &mut result);
    if classify::is_pdf_attachment(&media, &disposition) {
        match save_pdf(&part, &media, &disposition, true, source, output_dir, &mut result) {
            Ok(path) => result.files.push(path),
            Err(e) => result.warn(format!("{}: {e}", source.display())),
        }
    }
    Ok(result)
}

/// List the PDF attachment candidates of one `.eml` file without writing.
pub fn list_file(eml_path: &Path) -> Result<Vec<PdfCandidate>> {
    let raw = std::fs::read(eml_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ExtractError::FileNotFound(eml_path.to_path_buf())
        } else {
            ExtractError::io(eml_path, e)
        }
    })?;
    list_message(&raw, eml_path)
}

/// List the PDF attachment candidates of one raw message.
///
/// Follows the same walk and decision rule as [`extract_message`], but
/// decodes content only to report its size. Warnings go to the log.
pub fn list_message(raw: &[u8], source: &Path) -> Result<Vec<PdfCandidate>> {
    let mut scratch = ExtractionResult::default();
    let mut candidates = Vec::new();

    let (header_bytes, body) = header::split_message(raw);
    let headers = header::parse_header_block(header_bytes);

    let Some(media) = parse_top_media_type(&headers, source, &mut scratch) else {
        return Ok(candidates);
    };

    if media.is_multipart() {
        let boundary = media
            .boundary()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| ExtractError::MissingBoundary(source.to_path_buf()))?
            .to_string();

        for (idx, segment) in mime::split_multipart(body, &boundary).iter().enumerate() {
            let part = mime::parse_part(segment);
            let media = match parse_part_media_type(&part) {
                Ok(mt) => mt,
                Err(e) => {
                    scratch.warn(format!("{}: part {idx}: {e}", source.display()));
                    continue;
                }
            };
            let disposition = parse_part_disposition(&part, idx, source, &mut scratch);
            if !classify::is_pdf_attachment(&media, &disposition) {
                continue;
            }
            match content::decode_body(&part.headers, part.body) {
                Ok(data) => candidates.push(PdfCandidate {
                    source: source.to_path_buf(),
                    part_index: idx,
                    filename: resolve_output_name(
                        &media,
                        &disposition,
                        false,
                        source,
                        &mut scratch,
                    ),
                    size: data.len() as u64,
                }),
                Err(e) => scratch.warn(format!("{}: part {idx}: {e}", source.display())),
            }
        }
        return Ok(candidates);
    }

    let part = MessagePart { headers, body };
    let disposition = parse_part_disposition(&part, 0, source, &mut scratch);
    if classify::is_pdf_attachment(&media, &disposition) {
        match content::decode_body(&part.headers, part.body) {
            Ok(data) => candidates.push(PdfCandidate {
                source: source.to_path_buf(),
                part_index: 0,
                filename: resolve_output_name(&media, &disposition, true, source, &mut scratch),
                size: data.len() as u64,
            }),
            Err(e) => scratch.warn(format!("{}: {e}", source.display())),
        }
    }
    Ok(candidates)
}

/// Parse the top-level `Content-Type`, warning on failure.
///
/// Absence and unparseability are treated alike: the caller falls back
/// to whole-body classification, which can no longer match a PDF.
fn parse_top_media_type(
    headers: &crate::model::headers::HeaderMap,
    source: &Path,
    result: &mut ExtractionResult,
) -> Option<MediaType> {
    match header::parse_media_type(headers.get("content-type").unwrap_or("")) {
        Ok(media) => Some(media),
        Err(e) => {
            result.warn(format!(
                "{}: could not parse Content-Type: {e}",
                source.display()
            ));
            None
        }
    }
}

/// Parse a part's own `Content-Type`.
fn parse_part_media_type(part: &MessagePart<'_>) -> Result<MediaType> {
    header::parse_media_type(part.headers.get("content-type").unwrap_or(""))
}

/// Parse a part's `Content-Disposition`, mapping absence and parse
/// failure to the empty disposition. Parse failures are warned once.
fn parse_part_disposition(
    part: &MessagePart<'_>,
    part_index: usize,
    source: &Path,
    result: &mut ExtractionResult,
) -> ContentDisposition {
    match part.headers.get("content-disposition") {
        None => ContentDisposition::empty(),
        Some(value) => match header::parse_disposition(value) {
            Ok(d) => d,
            Err(e) => {
                result.warn(format!(
                    "{}: part {part_index}: could not parse Content-Disposition '{value}': {e}",
                    source.display()
                ));
                ContentDisposition::empty()
            }
        },
    }
}

/// Classify one multipart sub-part and extract it if it is a PDF.
///
/// `Ok(None)` is the silent not-a-PDF case. `Err` covers an unparseable
/// part `Content-Type`, undecodable content, and write failures — the
/// caller records it against the part index and keeps iterating.
fn process_part(
    part: &MessagePart<'_>,
    part_index: usize,
    source: &Path,
    output_dir: &Path,
    result: &mut ExtractionResult,
) -> Result<Option<PathBuf>> {
    let media = parse_part_media_type(part)?;
    let disposition = parse_part_disposition(part, part_index, source, result);

    if !classify::is_pdf_attachment(&media, &disposition) {
        return Ok(None);
    }

    save_pdf(part, &media, &disposition, false, source, output_dir, result).map(Some)
}

/// Decode a PDF part's content and write it under a collision-free name.
fn save_pdf(
    part: &MessagePart<'_>,
    media: &MediaType,
    disposition: &ContentDisposition,
    whole_body: bool,
    source: &Path,
    output_dir: &Path,
    result: &mut ExtractionResult,
) -> Result<PathBuf> {
    let name = resolve_output_name(media, disposition, whole_body, source, result);
    let data = content::decode_body(&part.headers, part.body)?;

    let path = filename::unique_path(&output_dir.join(&name));
    std::fs::write(&path, &data).map_err(|e| ExtractError::io(&path, e))?;

    tracing::info!(
        path = %path.display(),
        bytes = data.len(),
        "Extracted PDF"
    );
    Ok(path)
}

/// Resolve the final output filename for an accepted PDF part.
///
/// Header name, encoded-words decoded (falling back to the raw string
/// with one warning), generated fallback when nothing usable remains,
/// then sanitized.
fn resolve_output_name(
    media: &MediaType,
    disposition: &ContentDisposition,
    whole_body: bool,
    source: &Path,
    result: &mut ExtractionResult,
) -> String {
    let name = match filename::resolve_raw_name(media, disposition) {
        Some(raw_name) => match encoded_word::decode_encoded_words(&raw_name) {
            Ok(decoded) => decoded,
            Err(e) => {
                result.warn(format!(
                    "{}: failed to decode filename '{raw_name}': {e}; using original",
                    source.display()
                ));
                raw_name
            }
        },
        None => String::new(),
    };

    let name = if name.trim().is_empty() {
        let generated = filename::fallback_name(source, whole_body);
        result.warn(format!(
            "{}: PDF attachment has no filename, using '{generated}'",
            source.display()
        ));
        generated
    } else {
        name
    };

    filename::sanitize_filename_part(&name, MAX_FILENAME_LEN)
}
