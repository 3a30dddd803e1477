//! Query-string assembly for list endpoints.

/// Ordered set of query parameters.
///
/// Only present values are included, in insertion order; encoding is left
/// to `reqwest` when the slice is handed to `RequestBuilder::query`.
#[derive(Debug, Clone, Default)]
pub struct Query {
    params: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn push(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    /// Append a parameter if the value is present.
    pub fn maybe(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.params
    }
}
