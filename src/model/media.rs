//! Structured `Content-Type` and `Content-Disposition` values.

use std::collections::HashMap;

/// A parsed media type: `type/subtype; key=value; ...`.
///
/// Type, subtype and parameter keys are lower-cased for comparison.
/// Parameter values retain their original case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    /// Primary type (e.g. `"multipart"`, `"application"`).
    pub main_type: String,
    /// Subtype (e.g. `"mixed"`, `"pdf"`).
    pub sub_type: String,
    /// Parameters (e.g. `boundary=xxx`, `name="a.pdf"`).
    pub parameters: HashMap<String, String>,
}

impl MediaType {
    /// `true` if the primary type is `multipart`.
    pub fn is_multipart(&self) -> bool {
        self.main_type == "multipart"
    }

    /// `true` if this is exactly `application/pdf`.
    pub fn is_pdf(&self) -> bool {
        self.main_type == "application" && self.sub_type == "pdf"
    }

    /// The `boundary` parameter, if present.
    pub fn boundary(&self) -> Option<&str> {
        self.parameters.get("boundary").map(String::as_str)
    }

    /// The `name` parameter, if present.
    pub fn name(&self) -> Option<&str> {
        self.parameters.get("name").map(String::as_str)
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.main_type, self.sub_type)
    }
}

/// A parsed `Content-Disposition` value.
///
/// An empty `disposition` string means the header was absent or
/// unparseable — callers treat both the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentDisposition {
    /// `"attachment"`, `"inline"`, or `""` for absent/unparseable.
    pub disposition: String,
    /// Parameters (e.g. `filename="a.pdf"`).
    pub parameters: HashMap<String, String>,
}

impl ContentDisposition {
    /// The absent/unparseable case.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` if the disposition token is `attachment`.
    pub fn is_attachment(&self) -> bool {
        self.disposition == "attachment"
    }

    /// `true` if the header was absent or failed to parse.
    pub fn is_empty(&self) -> bool {
        self.disposition.is_empty()
    }

    /// The `filename` parameter, if present.
    pub fn filename(&self) -> Option<&str> {
        self.parameters.get("filename").map(String::as_str)
    }
}
