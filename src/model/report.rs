//! Result types returned by the extraction pipeline.

use std::path::PathBuf;

/// Outcome of processing one `.eml` message.
///
/// Partial progress is never thrown away: a failure on one part leaves
/// the files already written by earlier parts in place and recorded here.
#[derive(Debug, Default, serde::Serialize)]
pub struct ExtractionResult {
    /// Paths of the PDF files written, in extraction order.
    pub files: Vec<PathBuf>,
    /// Non-fatal problems encountered, each naming the source file
    /// (and part index where applicable).
    pub warnings: Vec<String>,
}

impl ExtractionResult {
    /// Number of PDFs extracted from this message.
    pub fn extracted_count(&self) -> usize {
        self.files.len()
    }

    /// Record a warning and emit it through tracing.
    pub fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.warnings.push(message);
    }
}

/// Aggregated outcome of a whole directory scan.
#[derive(Debug, Default, serde::Serialize)]
pub struct ScanSummary {
    /// Number of `.eml` files processed.
    pub files_scanned: usize,
    /// Total PDFs written across all messages.
    pub pdfs_extracted: usize,
    /// Total bytes written.
    pub bytes_written: u64,
    /// All warnings, in scan order.
    pub warnings: Vec<String>,
}

/// A PDF attachment candidate found by the `list` command.
///
/// Nothing is written to disk; the decoded size is computed in memory.
#[derive(Debug, serde::Serialize)]
pub struct PdfCandidate {
    /// Source `.eml` file.
    pub source: PathBuf,
    /// Part index within the message (0 for the whole-body path).
    pub part_index: usize,
    /// Resolved (decoded, sanitized) output filename.
    pub filename: String,
    /// Decoded content size in bytes.
    pub size: u64,
}
