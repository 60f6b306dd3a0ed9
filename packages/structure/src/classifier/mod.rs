//! Line type oracles.
//!
//! Extractors do not decide line types themselves: a [`LineClassifier`]
//! labels every line (`title`, `structure_unit`, `toc`, `named_item`, ...)
//! and the extractor turns labels into levels. Trained models live outside
//! this crate; [`keyword`] has rule-based stand-ins for plain text.

pub mod keyword;

pub use keyword::{DiplomaKeywordClassifier, LawKeywordClassifier, TzKeywordClassifier};

use crate::error::{Result, StructureError};
use crate::line::LineWithMeta;

/// Trait for line type oracles.
pub trait LineClassifier: Send + Sync {
    /// One label per line. Empty input gives an empty vector.
    fn predict(&self, lines: &[LineWithMeta]) -> Vec<String>;
}

/// Run a classifier and check that every line got exactly one label.
pub fn predict_checked(classifier: &dyn LineClassifier, lines: &[LineWithMeta]) -> Result<Vec<String>> {
    if lines.is_empty() {
        return Ok(Vec::new());
    }
    let labels = classifier.predict(lines);
    if labels.len() != lines.len() {
        tracing::warn!(lines = lines.len(), labels = labels.len(), "Classifier label count mismatch");
        return Err(StructureError::LabelCountMismatch {
            lines: lines.len(),
            labels: labels.len(),
        });
    }
    Ok(labels)
}

/// Classifier returning a fixed label vector.
#[derive(Debug, Clone, Default)]
pub struct StaticClassifier {
    labels: Vec<String>,
}

impl StaticClassifier {
    #[must_use]
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineClassifier for StaticClassifier {
    fn predict(&self, _lines: &[LineWithMeta]) -> Vec<String> {
        self.labels.clone()
    }
}
