//! Cellar zone: signatures and dates after the body.

use super::{HierarchyLevelBuilder, LabeledLine};
use crate::line::LineWithMeta;
use crate::types::{line_type, HierarchyLevel};

#[derive(Debug, Clone, Copy, Default)]
pub struct CellarBuilder;

impl HierarchyLevelBuilder for CellarBuilder {
    fn build(&self, lines_with_labels: Vec<LabeledLine>, init_hl_depth: u32) -> Vec<LineWithMeta> {
        lines_with_labels
            .into_iter()
            .map(|(mut line, _)| {
                line.set_hierarchy_level(HierarchyLevel::new(
                    Some(init_hl_depth),
                    Some(0),
                    true,
                    line_type::CELLAR,
                ));
                line
            })
            .collect()
    }
}
