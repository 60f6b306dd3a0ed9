//! Body zone of law-like documents.

use super::structure_unit::StructureUnitBuilder;
use super::{
    body_line_for, fresh, plain_raw_text, postprocess_roman, sticky, HierarchyLevelBuilder, LabeledLine,
    LevelStep,
};
use crate::line::LineWithMeta;
use crate::regexps::ROMAN;
use crate::types::{line_type, HierarchyLevel};

/// Body builder parameterised by the structural unit grammar.
///
/// The output always starts with an empty `body` line, even when the first
/// line of the zone is itself a structural unit.
#[derive(Debug, Clone, Default)]
pub struct BodyBuilder<S> {
    structure_unit: S,
}

impl<S: StructureUnitBuilder> BodyBuilder<S> {
    #[must_use]
    pub fn new(structure_unit: S) -> Self {
        Self { structure_unit }
    }

    fn line_to_level(
        &self,
        text: &str,
        label: &str,
        init_hl_depth: u32,
        previous_hl: Option<&HierarchyLevel>,
    ) -> LevelStep {
        let text = text.trim();
        let mut label = if label == line_type::HEADER {
            line_type::RAW_TEXT
        } else {
            label
        };

        if matches!(label, line_type::APPLICATION | line_type::RAW_TEXT | line_type::CELLAR)
            && ROMAN.is_match(text)
        {
            label = line_type::STRUCTURE_UNIT;
        }

        match label {
            line_type::STRUCTURE_UNIT => {
                self.structure_unit
                    .structure_unit(text, init_hl_depth, previous_hl)
            }
            line_type::FOOTER | line_type::APPLICATION => fresh(plain_raw_text()),
            line_type::RAW_TEXT => match previous_hl {
                Some(previous)
                    if previous.line_type == line_type::APPLICATION
                        || previous.line_type == line_type::CHAPTER =>
                {
                    sticky(previous.clone())
                }
                _ => fresh(plain_raw_text()),
            },
            line_type::OTHER => fresh(HierarchyLevel::new(Some(1), Some(1), false, line_type::OTHER)),
            other => {
                tracing::warn!(label = other, text, "Unexpected label in body zone, using raw text");
                fresh(plain_raw_text())
            }
        }
    }
}

impl<S: StructureUnitBuilder> HierarchyLevelBuilder for BodyBuilder<S> {
    fn build(&self, lines_with_labels: Vec<LabeledLine>, init_hl_depth: u32) -> Vec<LineWithMeta> {
        let mut result = Vec::with_capacity(lines_with_labels.len() + 1);
        result.push(body_line_for(&lines_with_labels, init_hl_depth));
        let mut previous_hl = Some(HierarchyLevel::create_root());

        for (mut line, label) in lines_with_labels {
            let (mut level, next) =
                self.line_to_level(line.line(), &label, init_hl_depth, previous_hl.as_ref());
            previous_hl = next;
            postprocess_roman(&level, &mut line);

            if line.line().trim().is_empty() {
                level.can_be_multiline = true;
            }
            line.set_hierarchy_level(level);
            result.push(line);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::structure_unit::{FoivStructureUnit, LawStructureUnit};
    use crate::builders::test_support::labeled;
    use pretty_assertions::assert_eq;

    fn summary(lines: &[LineWithMeta]) -> Vec<(String, Option<u32>, String)> {
        lines
            .iter()
            .map(|l| {
                let level = l.level_or_raw();
                (l.line().to_string(), level.level_1.value(), level.line_type)
            })
            .collect()
    }

    #[test]
    fn test_body_line_first() {
        let builder = BodyBuilder::new(LawStructureUnit);
        let lines = builder.build(
            labeled(&[("Статья 1. Предмет", "structure_unit"), ("текст статьи", "raw_text")]),
            2,
        );
        assert_eq!(
            summary(&lines),
            vec![
                (String::new(), Some(2), "body".to_string()),
                ("Статья 1. Предмет".to_string(), Some(8), "article".to_string()),
                ("текст статьи".to_string(), None, "raw_text".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_body_still_has_body_line() {
        let lines = BodyBuilder::new(LawStructureUnit).build(Vec::new(), 2);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].level_or_raw().line_type, "body");
    }

    #[test]
    fn test_raw_text_after_chapter_is_sticky() {
        let builder = BodyBuilder::new(LawStructureUnit);
        let lines = builder.build(
            labeled(&[
                ("Глава 1", "structure_unit"),
                ("Общие положения", "raw_text"),
                ("1) пункт", "structure_unit"),
                ("хвост", "raw_text"),
            ]),
            2,
        );
        let kinds: Vec<String> = lines.iter().map(|l| l.level_or_raw().line_type).collect();
        assert_eq!(kinds, vec!["body", "chapter", "chapter", "item", "raw_text"]);
    }

    #[test]
    fn test_roman_raw_text_becomes_subsection_and_is_fixed() {
        let builder = BodyBuilder::new(LawStructureUnit);
        let lines = builder.build(labeled(&[("ТУ. Заключение", "raw_text")]), 2);
        assert_eq!(lines[1].line(), "IV. Заключение");
        assert_eq!(lines[1].level_or_raw().line_type, "subsection");
    }

    #[test]
    fn test_header_footer_other_and_unknown_labels() {
        let builder = BodyBuilder::new(FoivStructureUnit);
        let lines = builder.build(
            labeled(&[
                ("Колонтитул", "footer"),
                ("Прочее", "Other"),
                ("Странное", "mystery"),
                ("Заголовок", "header"),
            ]),
            2,
        );
        let kinds: Vec<String> = lines.iter().map(|l| l.level_or_raw().line_type).collect();
        assert_eq!(kinds, vec!["body", "raw_text", "Other", "raw_text", "raw_text"]);
        assert_eq!(lines[2].level_or_raw().level_1.value(), Some(1));
    }

    #[test]
    fn test_blank_line_can_be_multiline() {
        let builder = BodyBuilder::new(LawStructureUnit);
        let lines = builder.build(labeled(&[("Статья 1.", "structure_unit"), ("   ", "raw_text")]), 2);
        assert!(lines[2].level_or_raw().can_be_multiline);
    }

    #[test]
    fn test_body_line_precedes_unrecognised_unit() {
        let builder = BodyBuilder::new(LawStructureUnit);
        let lines = builder.build(
            labeled(&[("ПРИКАЗЫВАЮ:", "structure_unit"), ("Статья 1.", "structure_unit")]),
            2,
        );
        let kinds: Vec<String> = lines.iter().map(|l| l.level_or_raw().line_type).collect();
        assert_eq!(kinds, vec!["body", "root", "article"]);
        assert_eq!(lines[0].line(), "");
    }
}
