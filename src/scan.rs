//! Recursive `.eml` discovery and batch extraction.

use std::path::{Path, PathBuf};

use crate::error::{ExtractError, Result};
use crate::extract::message;
use crate::model::report::{PdfCandidate, ScanSummary};

/// Find every `.eml` file under `input_dir` (case-insensitive extension).
///
/// The result is sorted so batch runs are deterministic.
pub fn find_eml_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(ExtractError::InputDirNotFound(input_dir.to_path_buf()));
    }
    let mut files = Vec::new();
    walk(input_dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| ExtractError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ExtractError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, files)?;
        } else if is_eml(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_eml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("eml"))
}

/// Extract PDFs from every `.eml` file under `input_dir` into `output_dir`.
///
/// The output directory is created if missing. A failure on one file
/// (unreadable, missing boundary) becomes a warning in the summary and
/// the batch continues. The progress callback receives `(current, total)`.
pub fn extract_dir(
    input_dir: &Path,
    output_dir: &Path,
    progress: Option<&dyn Fn(usize, usize)>,
) -> Result<ScanSummary> {
    let files = find_eml_files(input_dir)?;
    std::fs::create_dir_all(output_dir).map_err(|e| ExtractError::io(output_dir, e))?;

    let mut summary = ScanSummary::default();
    let total = files.len();

    for (i, file) in files.iter().enumerate() {
        if let Some(cb) = progress {
            cb(i, total);
        }
        tracing::info!(file = %file.display(), "Processing EML file");

        match message::extract_file(file, output_dir) {
            Ok(result) => {
                summary.pdfs_extracted += result.extracted_count();
                for path in &result.files {
                    if let Ok(meta) = std::fs::metadata(path) {
                        summary.bytes_written += meta.len();
                    }
                }
                summary.warnings.extend(result.warnings);
            }
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "Failed to process EML file");
                summary.warnings.push(format!("{}: {e}", file.display()));
            }
        }
        summary.files_scanned += 1;
    }

    if let Some(cb) = progress {
        cb(total, total);
    }
    Ok(summary)
}

/// List PDF candidates across every `.eml` file under `input_dir`.
///
/// Nothing is written. Per-file failures are logged and skipped.
pub fn list_dir(
    input_dir: &Path,
    progress: Option<&dyn Fn(usize, usize)>,
) -> Result<Vec<PdfCandidate>> {
    let files = find_eml_files(input_dir)?;
    let mut candidates = Vec::new();
    let total = files.len();

    for (i, file) in files.iter().enumerate() {
        if let Some(cb) = progress {
            cb(i, total);
        }
        match message::list_file(file) {
            Ok(found) => candidates.extend(found),
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "Failed to list EML file");
            }
        }
    }

    if let Some(cb) = progress {
        cb(total, total);
    }
    Ok(candidates)
}
