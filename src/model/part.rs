//! A single message part: headers plus raw body bytes.

use super::headers::HeaderMap;

/// A leaf or container unit of a message.
///
/// For a top-level message the body is everything after the header block.
/// For a multipart sub-part it is the bytes between two boundary
/// delimiters with the part's own header block stripped off the front.
/// The body borrows from the message buffer — nothing is copied until a
/// part's content is actually decoded.
#[derive(Debug)]
pub struct MessagePart<'a> {
    /// Parsed header fields of this part.
    pub headers: HeaderMap,
    /// Raw (still transfer-encoded) body bytes.
    pub body: &'a [u8],
}
