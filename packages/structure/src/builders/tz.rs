//! Body zone of technical specifications.

use regex::Regex;
use std::sync::LazyLock;

use super::{body_line_for, HierarchyLevelBuilder, LabeledLine};
use crate::line::LineWithMeta;
use crate::prefix::bullet::BULLET_REGEX;
use crate::regexps::{NUMBER, SUBITEM};
use crate::types::{line_type, HierarchyLevel};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static NAMED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(под)?раздел\s*").expect("valid regex"));

/// Depth below the body line where items start.
const ITEM_DEPTH_OFFSET: u32 = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct TzBodyBuilder;

impl TzBodyBuilder {
    fn item_level(text: &str, prediction: &str, init_hl_depth: u32, previous_hl: Option<&HierarchyLevel>) -> HierarchyLevel {
        let text = text.trim().to_lowercase();
        let item_min_depth = ITEM_DEPTH_OFFSET + init_hl_depth;
        let level = |level_1: u32, level_2: u32, multiline: bool| {
            HierarchyLevel::new(Some(level_1), Some(level_2), multiline, prediction)
        };

        let mut hierarchy_level = if prediction == line_type::PART {
            level(init_hl_depth + 1, 0, true)
        } else if NAMED_ITEM.is_match(&text) {
            let level_2 = u32::from(text.contains("подраздел"));
            level(item_min_depth + 2, level_2, false)
        } else if let Some(number) = NUMBER.find(&text) {
            let depth = number
                .as_str()
                .trim()
                .split('.')
                .filter(|n| !n.is_empty() && n.chars().all(char::is_numeric))
                .count();
            level(item_min_depth + 3, u32::try_from(depth).unwrap_or(u32::MAX), false)
        } else if BULLET_REGEX.is_match(&text) || SUBITEM.is_match(&text) {
            level(item_min_depth + 4, 0, false)
        } else {
            HierarchyLevel::create_raw_text()
        };

        if let Some(previous) = previous_hl {
            if *previous <= hierarchy_level && !hierarchy_level.is_raw_text() {
                if previous.level_1 == hierarchy_level.level_1
                    || (*previous < hierarchy_level && previous.line_type == line_type::ITEM)
                {
                    hierarchy_level.line_type.clone_from(&previous.line_type);
                }
            }
        }
        hierarchy_level
    }
}

impl HierarchyLevelBuilder for TzBodyBuilder {
    fn build(&self, lines_with_labels: Vec<LabeledLine>, init_hl_depth: u32) -> Vec<LineWithMeta> {
        let mut result = Vec::with_capacity(lines_with_labels.len() + 1);
        result.push(body_line_for(&lines_with_labels, init_hl_depth));
        let mut previous_hl: Option<HierarchyLevel> = None;

        for (mut line, prediction) in lines_with_labels {
            let level = match prediction.as_str() {
                line_type::PART | line_type::NAMED_ITEM | line_type::ITEM => {
                    let level = Self::item_level(line.line(), &prediction, init_hl_depth, previous_hl.as_ref());
                    previous_hl = Some(level.clone());
                    level
                }
                _ => HierarchyLevel::create_raw_text(),
            };
            line.set_hierarchy_level(level);
            result.push(line);
        }
        result
    }
}
