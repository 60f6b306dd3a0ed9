//! Per-line metadata.

use serde::{Deserialize, Serialize};

use crate::types::HierarchyLevel;

/// Position and levels of a line.
///
/// `tag_hierarchy_level` is the reader's hint; `hierarchy_level` is set by a
/// structure extractor and stays `None` until then.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineMetadata {
    pub page_id: usize,
    pub line_id: Option<usize>,
    pub tag_hierarchy_level: HierarchyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy_level: Option<HierarchyLevel>,
}

impl LineMetadata {
    #[must_use]
    pub fn new(page_id: usize, line_id: Option<usize>) -> Self {
        Self {
            page_id,
            line_id,
            tag_hierarchy_level: HierarchyLevel::create_unknown(),
            hierarchy_level: None,
        }
    }

    /// Set the reader's tag hint.
    #[must_use]
    pub fn with_tag(mut self, tag_hierarchy_level: HierarchyLevel) -> Self {
        self.tag_hierarchy_level = tag_hierarchy_level;
        self
    }

    /// Set the extracted hierarchy level.
    #[must_use]
    pub fn with_hierarchy_level(mut self, hierarchy_level: HierarchyLevel) -> Self {
        self.hierarchy_level = Some(hierarchy_level);
        self
    }
}

impl Default for LineMetadata {
    fn default() -> Self {
        Self::new(0, None)
    }
}
