//! Integration tests for the extraction pipeline, driven by EML fixtures.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use emlpdf::error::ExtractError;
use emlpdf::extract::message::{extract_file, extract_message, list_file};
use emlpdf::scan;

/// The decoded payload shared by the base64 fixtures.
const PDF_PAYLOAD: &[u8] =
    b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF\n";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

// ─── Test 1: multipart with one PDF attachment ──────────────────────

#[test]
fn test_extract_simple_pdf() {
    let out = tempfile::tempdir().unwrap();
    let result = extract_file(&fixture("simple_pdf.eml"), out.path()).unwrap();

    assert_eq!(result.extracted_count(), 1);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);

    let written = std::fs::read(out.path().join("invoice.pdf")).unwrap();
    assert_eq!(written, PDF_PAYLOAD);
}

// ─── Test 2: CRLF line endings behave identically ───────────────────

#[test]
fn test_extract_simple_pdf_crlf() {
    let out = tempfile::tempdir().unwrap();
    let result = extract_file(&fixture("simple_pdf_crlf.eml"), out.path()).unwrap();

    assert_eq!(result.extracted_count(), 1);
    let written = std::fs::read(out.path().join("invoice.pdf")).unwrap();
    assert_eq!(written, PDF_PAYLOAD);
}

// ─── Test 3: k PDF parts → exactly k files ──────────────────────────

#[test]
fn test_extract_two_pdfs() {
    let out = tempfile::tempdir().unwrap();
    let result = extract_file(&fixture("two_pdfs.eml"), out.path()).unwrap();

    assert_eq!(result.extracted_count(), 2);
    assert!(result.warnings.is_empty());
    assert!(out.path().join("q1.pdf").exists());
    assert!(out.path().join("q2.pdf").exists());
}

// ─── Test 4: non-multipart whole-body path ──────────────────────────

#[test]
fn test_extract_whole_body_pdf() {
    let out = tempfile::tempdir().unwrap();
    let result = extract_file(&fixture("body_pdf.eml"), out.path()).unwrap();

    assert_eq!(result.extracted_count(), 1);
    let written = std::fs::read(out.path().join("x.pdf")).unwrap();
    // Identity transfer encoding: body bytes are copied verbatim
    assert_eq!(written, PDF_PAYLOAD);
}

// ─── Test 5: missing boundary aborts that message only ──────────────

#[test]
fn test_missing_boundary_is_typed_error() {
    let out = tempfile::tempdir().unwrap();
    let err = extract_file(&fixture("no_boundary.eml"), out.path()).unwrap_err();
    assert!(matches!(err, ExtractError::MissingBoundary(_)));
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_boundary_does_not_stop_batch() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("in");
    std::fs::create_dir_all(&input).unwrap();
    std::fs::copy(fixture("no_boundary.eml"), input.join("no_boundary.eml")).unwrap();
    std::fs::copy(fixture("simple_pdf.eml"), input.join("simple_pdf.eml")).unwrap();

    let out = tmp.path().join("out");
    let summary = scan::extract_dir(&input, &out, None).unwrap();

    assert_eq!(summary.files_scanned, 2);
    assert_eq!(summary.pdfs_extracted, 1);
    assert_eq!(summary.warnings.len(), 1);
    assert!(summary.warnings[0].contains("no_boundary.eml"));
}

// ─── Test 6: collision-free naming across messages ──────────────────

#[test]
fn test_duplicate_names_get_suffixes() {
    let out = tempfile::tempdir().unwrap();

    let r1 = extract_file(&fixture("doc_a.eml"), out.path()).unwrap();
    assert_eq!(r1.files, vec![out.path().join("doc.pdf")]);

    let r2 = extract_file(&fixture("doc_b.eml"), out.path()).unwrap();
    assert_eq!(r2.files, vec![out.path().join("doc_1.pdf")]);

    let r3 = extract_file(&fixture("doc_a.eml"), out.path()).unwrap();
    assert_eq!(r3.files, vec![out.path().join("doc_2.pdf")]);

    // Nothing was overwritten
    assert_eq!(std::fs::read(out.path().join("doc.pdf")).unwrap(), PDF_PAYLOAD);
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 3);
}

// ─── Test 7: encoded-word filename decoding ─────────────────────────

#[test]
fn test_encoded_word_filename() {
    let out = tempfile::tempdir().unwrap();
    let result = extract_file(&fixture("encoded_name.eml"), out.path()).unwrap();

    assert_eq!(result.extracted_count(), 1);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    assert!(
        out.path().join("año-2024.pdf").exists(),
        "decoded UTF-8 filename should be used"
    );
}

// ─── Test 8: unsupported charset falls back with one warning ────────

#[test]
fn test_unsupported_charset_keeps_raw_name() {
    let out = tempfile::tempdir().unwrap();
    let result = extract_file(&fixture("bad_charset.eml"), out.path()).unwrap();

    // Still extracted, exactly one warning, under the (sanitized) raw name
    assert_eq!(result.extracted_count(), 1);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("X-MARTIAN"));
    assert!(
        !out.path().join("report.pdf").exists(),
        "encoded name must not have been decoded"
    );
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 1);
}

// ─── Test 9: inline PDF without a name is rejected ──────────────────

#[test]
fn test_inline_pdf_without_name_not_extracted() {
    let out = tempfile::tempdir().unwrap();
    let result = extract_file(&fixture("inline_no_name.eml"), out.path()).unwrap();

    assert_eq!(result.extracted_count(), 0);
    assert!(result.warnings.is_empty());
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

// ─── Test 10: plain text message yields nothing ─────────────────────

#[test]
fn test_plain_message_yields_nothing() {
    let out = tempfile::tempdir().unwrap();
    let result = extract_file(&fixture("plain.eml"), out.path()).unwrap();
    assert_eq!(result.extracted_count(), 0);
    assert!(result.warnings.is_empty());
}

// ─── Test 11: base64 round-trip against the encoder oracle ──────────

#[test]
fn test_base64_round_trip() {
    let payload: Vec<u8> = (0u8..=255).cycle().take(1024).collect();
    let encoded = BASE64.encode(&payload);

    // Fold the base64 text into 60-char lines, as mailers do
    let folded: String = encoded
        .as_bytes()
        .chunks(60)
        .map(|c| std::str::from_utf8(c).unwrap())
        .collect::<Vec<_>>()
        .join("\r\n");

    let msg = format!(
        "From: t@example.com\r\nMIME-Version: 1.0\r\nContent-Type: multipart/mixed; boundary=\"b\"\r\n\r\n--b\r\nContent-Type: application/pdf; name=\"blob.pdf\"\r\nContent-Disposition: attachment\r\nContent-Transfer-Encoding: base64\r\n\r\n{folded}\r\n--b--\r\n"
    );

    let out = tempfile::tempdir().unwrap();
    let result = extract_message(msg.as_bytes(), Path::new("oracle.eml"), out.path()).unwrap();

    assert_eq!(result.extracted_count(), 1);
    let written = std::fs::read(out.path().join("blob.pdf")).unwrap();
    assert_eq!(written, payload);
}

// ─── Test 12: listing reports candidates without writing ────────────

#[test]
fn test_list_does_not_write() {
    let candidates = list_file(&fixture("two_pdfs.eml")).unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].filename, "q1.pdf");
    assert_eq!(candidates[1].filename, "q2.pdf");
    assert_eq!(candidates[0].size, PDF_PAYLOAD.len() as u64);
}

// ─── Test 13: full fixture directory sweep ──────────────────────────

#[test]
fn test_extract_dir_over_all_fixtures() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("in");
    std::fs::create_dir_all(input.join("nested")).unwrap();

    for name in [
        "simple_pdf.eml",
        "two_pdfs.eml",
        "body_pdf.eml",
        "no_boundary.eml",
        "plain.eml",
    ] {
        std::fs::copy(fixture(name), input.join(name)).unwrap();
    }
    // Nested folders are walked too
    std::fs::copy(fixture("doc_a.eml"), input.join("nested/doc_a.eml")).unwrap();

    let out = tmp.path().join("out");
    let summary = scan::extract_dir(&input, &out, None).unwrap();

    assert_eq!(summary.files_scanned, 6);
    assert_eq!(summary.pdfs_extracted, 5);
    assert!(summary
        .warnings
        .iter()
        .any(|w| w.contains("no_boundary.eml")));
    assert!(summary.bytes_written >= 5 * PDF_PAYLOAD.len() as u64);
}
