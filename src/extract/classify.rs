//! The attachment decision rule.

use crate::model::media::{ContentDisposition, MediaType};

/// Decide whether a part is an extractable PDF attachment.
///
/// Accept iff the content type is exactly `application/pdf` AND either
/// the disposition is `attachment`, or the disposition is absent and the
/// Content-Type carries a non-empty `name` parameter. Everything else is
/// rejected — an inline PDF with no naming hint has no principled
/// filename to extract under.
pub fn is_pdf_attachment(media: &MediaType, disposition: &ContentDisposition) -> bool {
    media.is_pdf()
        && (disposition.is_attachment()
            || (disposition.is_empty() && media.name().is_some_and(|n| !n.is_empty())))
}
