//! Flat line sequence produced by a reader.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::LineWithMeta;

/// Ordered lines of a document plus pass-through payload.
///
/// Structure extractors replace `lines` wholesale at every stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnstructuredDocument {
    pub lines: Vec<LineWithMeta>,
    /// Tables are carried through untouched.
    #[serde(default)]
    pub tables: Vec<Value>,
    #[serde(default)]
    pub attachments: Vec<Value>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, Value>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl UnstructuredDocument {
    #[must_use]
    pub fn new(lines: Vec<LineWithMeta>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    /// Set the `file_type` metadata entry.
    #[must_use]
    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.metadata
            .insert("file_type".to_string(), Value::String(file_type.into()));
        self
    }

    /// Whether the reader marked this document as plain text.
    ///
    /// Plain text has no visual features, so only text-based rules apply.
    #[must_use]
    pub fn is_txt_like(&self) -> bool {
        self.metadata
            .get("file_type")
            .and_then(Value::as_str)
            .is_some_and(|t| t.starts_with("text/") || t == "txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_txt_like() {
        assert!(UnstructuredDocument::default()
            .with_file_type("text/plain")
            .is_txt_like());
        assert!(!UnstructuredDocument::default()
            .with_file_type("application/pdf")
            .is_txt_like());
        assert!(!UnstructuredDocument::default().is_txt_like());
    }
}
