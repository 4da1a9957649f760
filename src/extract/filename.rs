//! Output filename resolution: header priority, sanitization, uniqueness.

use std::path::{Path, PathBuf};

use crate::model::media::{ContentDisposition, MediaType};

/// Pick the raw (possibly encoded-word) filename for a part.
///
/// Priority: `Content-Disposition` `filename` parameter, then the
/// `Content-Type` `name` parameter. The result is trimmed; `None` means
/// neither header named the part.
pub fn resolve_raw_name(media: &MediaType, disposition: &ContentDisposition) -> Option<String> {
    disposition
        .filename()
        .filter(|f| !f.trim().is_empty())
        .or_else(|| media.name())
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
}

/// Generated name for a nameless PDF part.
///
/// `whole_body` selects the `unnamed_body_pdf_` prefix used when the
/// entire message body was the candidate. The source file's name has its
/// dots replaced by underscores.
pub fn fallback_name(source: &Path, whole_body: bool) -> String {
    let base = source
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .replace('.', "_");
    if whole_body {
        format!("unnamed_body_pdf_{base}.pdf")
    } else {
        format!("unnamed_pdf_{base}.pdf")
    }
}

/// Sanitize a string for use in filenames.
///
/// Replaces invalid characters with `_` and truncates to `max_len`.
pub fn sanitize_filename_part(s: &str, max_len: usize) -> String {
    let sanitized: String = s
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '.' || c == '_' || c == '@' {
                c
            } else {
                '_'
            }
        })
        .take(max_len)
        .collect();

    if sanitized.is_empty() {
        "unknown".to_string()
    } else {
        sanitized
    }
}

/// If `path` already exists, append a counter to make it unique.
///
/// Probes `path`, then `stem_1.ext`, `stem_2.ext`, ... and returns the
/// first path that does not exist. The check is not atomic with the
/// subsequent file creation; a parallel caller over the same output
/// directory would need create-exclusive retry instead.
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("file");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parent = path.parent().unwrap_or(Path::new("."));

    for i in 1.. {
        let candidate = if ext.is_empty() {
            parent.join(format!("{stem}_{i}"))
        } else {
            parent.join(format!("{stem}_{i}.{ext}"))
        };
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!("suffix probe is unbounded")
}
