//! Body zone of diploma theses.

use super::{body_line_for, HierarchyLevelBuilder, LabeledLine};
use crate::line::annotation::BOLD;
use crate::line::LineWithMeta;
use crate::list_features::get_dotted_item_depth;
use crate::patterns::{
    LevelTemplate, ListKind, ListPattern, PatternComposition, TagListPattern, TagPattern,
};
use crate::types::{line_type, HierarchyLevel};

/// Openings of chapter-like units of a thesis.
pub const NAMED_ITEM_KEYWORDS: &[&str] = &[
    "введение",
    "заключение",
    "библиографический список",
    "список литературы",
    "глава",
    "приложение",
    "приложения",
];

fn starts_with_keyword(text: &str) -> bool {
    NAMED_ITEM_KEYWORDS.iter().any(|k| text.starts_with(k))
}

/// Builder of chapters, lists and text of a thesis body.
#[derive(Debug)]
pub struct DiplomaBodyBuilder {
    patterns: PatternComposition,
}

impl Default for DiplomaBodyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DiplomaBodyBuilder {
    #[must_use]
    pub fn new() -> Self {
        let list = |level_1, level_2| LevelTemplate::new(line_type::LIST_ITEM, level_1, level_2, false);
        let patterns = PatternComposition::new(vec![
            Box::new(TagListPattern::new(list(2, None))),
            Box::new(ListPattern::new(ListKind::Dotted, list(2, None))),
            Box::new(ListPattern::new(ListKind::Bracket, list(3, Some(1)))),
            Box::new(ListPattern::new(ListKind::Letter, list(4, Some(1)))),
            Box::new(ListPattern::new(ListKind::Bullet, list(5, Some(1)))),
            Box::new(TagPattern::new(Some(line_type::RAW_TEXT.to_string()), None, None, None)),
        ]);
        Self { patterns }
    }

    fn named_item_level(
        text: &str,
        prediction: &str,
        init_hl_depth: u32,
        previous_named_item: Option<&HierarchyLevel>,
    ) -> HierarchyLevel {
        let text = text.trim().to_lowercase();
        if starts_with_keyword(&text) {
            return HierarchyLevel::new(Some(init_hl_depth), Some(0), true, prediction);
        }
        match get_dotted_item_depth(&text) {
            None => previous_named_item.cloned().unwrap_or_else(|| {
                HierarchyLevel::new(Some(init_hl_depth), Some(0), true, prediction)
            }),
            Some(depth) => {
                let level_2 = u32::try_from(depth.saturating_sub(1)).unwrap_or(u32::MAX);
                HierarchyLevel::new(Some(init_hl_depth), Some(level_2), true, prediction)
            }
        }
    }

    /// Bold raw text opening with a keyword is a missed named item.
    fn is_bold_named_item(line: &LineWithMeta) -> bool {
        starts_with_keyword(&line.line().trim().to_lowercase())
            && line
                .annotations()
                .iter()
                .any(|a| a.name == BOLD && a.value == "True")
    }
}

impl HierarchyLevelBuilder for DiplomaBodyBuilder {
    fn build(&self, lines_with_labels: Vec<LabeledLine>, init_hl_depth: u32) -> Vec<LineWithMeta> {
        let mut result = Vec::with_capacity(lines_with_labels.len() + 1);
        result.push(body_line_for(&lines_with_labels, init_hl_depth));
        let mut previous_named_item: Option<HierarchyLevel> = None;

        for (mut line, prediction) in lines_with_labels {
            let tag_type = &line.tag_hierarchy_level().line_type;
            let tagged_header = tag_type == line_type::HEADER || tag_type == line_type::NAMED_HEADER;

            let level = if prediction == line_type::NAMED_ITEM || tagged_header {
                let level =
                    Self::named_item_level(line.line(), &prediction, init_hl_depth, previous_named_item.as_ref());
                previous_named_item = Some(level.clone());
                level
            } else {
                match prediction.as_str() {
                    line_type::LIST_ITEM => {
                        let tag = line.tag_hierarchy_level();
                        let depth = tag.level_1.value().unwrap_or(1);
                        let base = previous_named_item
                            .as_ref()
                            .and_then(|l| l.level_1.value())
                            .unwrap_or(init_hl_depth);
                        HierarchyLevel::new(
                            Some((base + depth).saturating_sub(1)),
                            tag.level_2.value(),
                            true,
                            line_type::LIST_ITEM,
                        )
                    }
                    line_type::PAGE_ID => HierarchyLevel::new(None, None, false, line_type::PAGE_ID),
                    line_type::RAW_TEXT if Self::is_bold_named_item(&line) => {
                        Self::named_item_level(
                            line.line(),
                            line_type::NAMED_ITEM,
                            init_hl_depth,
                            previous_named_item.as_ref(),
                        )
                    }
                    line_type::RAW_TEXT => self.patterns.get_hierarchy_level(&line),
                    _ => HierarchyLevel::create_raw_text().with_line_type(prediction.as_str()),
                }
            };
            line.set_hierarchy_level(level);
            result.push(line);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::test_support::labeled;
    use crate::line::{Annotation, LineMetadata};
    use pretty_assertions::assert_eq;

    fn summary(lines: &[LineWithMeta]) -> Vec<(Option<u32>, Option<u32>, String)> {
        lines
            .iter()
            .map(|l| {
                let level = l.level_or_raw();
                (level.level_1.value(), level.level_2.value(), level.line_type)
            })
            .collect()
    }

    #[test]
    fn test_named_items_and_text() {
        let lines = DiplomaBodyBuilder::new().build(
            labeled(&[
                ("Введение", "named_item"),
                ("Текст введения", "raw_text"),
                ("1.2 Обзор литературы", "named_item"),
                ("Без номера", "named_item"),
                ("1) первый пункт", "raw_text"),
                ("12", "page_id"),
                ("Рисунок 1", "other"),
            ]),
            1,
        );
        assert_eq!(
            summary(&lines),
            vec![
                (Some(1), Some(0), "body".to_string()),
                (Some(1), Some(0), "named_item".to_string()),
                (None, None, "raw_text".to_string()),
                (Some(1), Some(1), "named_item".to_string()),
                (Some(1), Some(1), "named_item".to_string()),
                (Some(3), Some(1), "list_item".to_string()),
                (None, None, "page_id".to_string()),
                (None, None, "other".to_string()),
            ]
        );
        assert!(!lines[6].level_or_raw().can_be_multiline);
    }

    #[test]
    fn test_list_item_nests_under_named_item() {
        let tag = HierarchyLevel::new(Some(2), Some(1), false, line_type::LIST_ITEM);
        let item = LineWithMeta::new("пункт", LineMetadata::new(0, Some(1)).with_tag(tag), Vec::new());
        let lines = DiplomaBodyBuilder::new().build(
            vec![
                (LineWithMeta::from_text("Глава 1"), "named_item".to_string()),
                (item, "list_item".to_string()),
            ],
            1,
        );
        let level = lines[2].level_or_raw();
        assert_eq!((level.level_1.value(), level.level_2.value()), (Some(2), Some(1)));
        assert!(level.can_be_multiline);
    }

    #[test]
    fn test_bold_keyword_raw_text_is_named_item() {
        let bold = LineWithMeta::new(
            "Заключение",
            LineMetadata::default(),
            vec![Annotation::new(0, 10, BOLD, "True")],
        );
        let plain = LineWithMeta::from_text("Заключение следует");
        let lines = DiplomaBodyBuilder::new().build(
            vec![(bold, "raw_text".to_string()), (plain, "raw_text".to_string())],
            1,
        );
        assert_eq!(lines[1].level_or_raw().line_type, "named_item");
        assert!(lines[2].level_or_raw().is_raw_text());
    }
}
