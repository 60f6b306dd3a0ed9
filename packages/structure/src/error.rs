//! Error types for structure extraction.
//!
//! Configuration mistakes and caller contract violations surface as
//! `StructureError`. Unrecognised or noisy input text never does: builders and
//! extractors degrade such lines to raw text or an inherited level instead.

use thiserror::Error;

use crate::types::{DocumentKind, Zone};

/// Main error type for the structure library.
#[derive(Debug, Error)]
pub enum StructureError {
    /// Hierarchy level constructed with a negative component.
    #[error("Invalid hierarchy level ({level_1:?}, {level_2:?}): levels must be non-negative")]
    InvalidLevel {
        level_1: Option<i64>,
        level_2: Option<i64>,
    },

    /// Line slice outside of the line bounds.
    #[error("Slice [{start}:{end}] is out of range for line of length {len}")]
    SliceOutOfRange { start: usize, end: usize, len: usize },

    /// Line split requested with an empty separator.
    #[error("Line separator must not be empty")]
    EmptySeparator,

    /// Token does not satisfy the prefix validity gate.
    #[error("'{prefix}' is not a valid {kind} prefix")]
    InvalidPrefix { kind: &'static str, prefix: String },

    /// No hierarchy level builder wired for a zone and document kind.
    #[error("No hierarchy level builder for zone '{zone}' of {document_kind} documents")]
    NoBuilder {
        zone: Zone,
        document_kind: DocumentKind,
    },

    /// Pattern dict is missing a required key.
    #[error("Pattern configuration is missing required key '{key}'{}", .pattern.as_ref().map(|p| format!(" in pattern '{p}'")).unwrap_or_default())]
    MissingPatternKey {
        key: &'static str,
        pattern: Option<String>,
    },

    /// Pattern dict names an unregistered pattern type.
    #[error("Unknown pattern name: '{0}'")]
    UnknownPattern(String),

    /// Pattern dict key has the wrong type or value.
    #[error("Invalid value for pattern key '{key}': {reason}")]
    InvalidPatternValue { key: &'static str, reason: String },

    /// User supplied regular expression failed to compile.
    #[error("Invalid regular expression: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Unknown document kind name.
    #[error("Unknown document kind: '{0}'. Expected one of: law, foiv, auto-law, tz, diploma, default")]
    UnknownDocumentKind(String),

    /// Classifier returned a label vector that does not line up with the input.
    #[error("Classifier returned {labels} labels for {lines} lines")]
    LabelCountMismatch { lines: usize, labels: usize },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias for structure operations.
pub type Result<T> = std::result::Result<T, StructureError>;
