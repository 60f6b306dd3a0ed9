//! Header zone: everything before the body belongs to the document root.

use super::{HierarchyLevelBuilder, LabeledLine};
use crate::line::LineWithMeta;
use crate::types::HierarchyLevel;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderBuilder;

impl HierarchyLevelBuilder for HeaderBuilder {
    fn build(&self, lines_with_labels: Vec<LabeledLine>, _init_hl_depth: u32) -> Vec<LineWithMeta> {
        lines_with_labels
            .into_iter()
            .map(|(mut line, _)| {
                line.set_hierarchy_level(HierarchyLevel::create_root());
                line
            })
            .collect()
    }
}
