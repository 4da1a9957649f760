//! Ordered, case-insensitive header map.

/// Parsed message headers.
///
/// Field names are stored lower-cased, in the order they appeared.
/// Repeated fields are all kept, but [`HeaderMap::get`] returns only the
/// first occurrence — downstream classification never consults the rest.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    fields: Vec<(String, String)>,
}

impl HeaderMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. The name is lower-cased for storage.
    pub fn push(&mut self, name: &str, value: String) {
        self.fields.push((name.to_lowercase(), value));
    }

    /// First value for a header name (case-insensitive), if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.fields
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All values for a header name, in order of appearance.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        let name = name.to_lowercase();
        self.fields
            .iter()
            .filter(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Number of stored fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` if no fields were parsed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(lowercase_name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
