//! Table of contents zone.

use super::{HierarchyLevelBuilder, LabeledLine};
use crate::line::{LineMetadata, LineWithMeta};
use crate::types::{line_type, HierarchyLevel};

/// Titles that open a table of contents.
pub const TOC_TITLES: &[&str] = &["содержание", "оглавление"];

/// Whether `text` is a table of contents title.
#[must_use]
pub fn is_toc_title(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    TOC_TITLES.contains(&text.as_str())
}

/// Builder of the TOC node and its items.
///
/// Items without a preceding title get a synthetic empty `toc` line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TocBuilder;

impl TocBuilder {
    fn toc_level(init_hl_depth: u32) -> HierarchyLevel {
        HierarchyLevel::new(Some(init_hl_depth), Some(0), false, line_type::TOC)
    }

    fn toc_line(item: &LineWithMeta, init_hl_depth: u32) -> LineWithMeta {
        let metadata = LineMetadata::new(item.metadata.page_id, item.metadata.line_id)
            .with_hierarchy_level(Self::toc_level(init_hl_depth));
        LineWithMeta::with_uid("", metadata, Vec::new(), format!("{}_toc", item.uid()))
    }
}

impl HierarchyLevelBuilder for TocBuilder {
    fn build(&self, lines_with_labels: Vec<LabeledLine>, init_hl_depth: u32) -> Vec<LineWithMeta> {
        let mut result = Vec::with_capacity(lines_with_labels.len() + 1);
        let mut is_toc_begun = false;

        for (mut line, _) in lines_with_labels {
            if is_toc_title(line.line()) {
                line.set_hierarchy_level(Self::toc_level(init_hl_depth));
                result.push(line);
                is_toc_begun = true;
                continue;
            }
            if !is_toc_begun {
                result.push(Self::toc_line(&line, init_hl_depth));
                is_toc_begun = true;
            }
            line.set_hierarchy_level(HierarchyLevel::new(
                Some(init_hl_depth + 1),
                Some(0),
                false,
                line_type::TOC_ITEM,
            ));
            result.push(line);
        }
        result
    }
}
