//! Application zone: appendices after the body and cellar.

use super::structure_unit::StructureUnitBuilder;
use super::{
    fresh, plain_raw_text, postprocess_roman, sticky, HierarchyLevelBuilder, LabeledLine, LevelStep,
};
use crate::line::LineWithMeta;
use crate::regexps::{APPLICATION_BEGIN, ROMAN};
use crate::types::{line_type, HierarchyLevel};

/// Application builder parameterised by the structural unit grammar.
///
/// Consecutive application headings (`Приложение`, `к приказу`) merge into
/// one node; a new heading after other text starts a new application.
#[derive(Debug, Clone, Default)]
pub struct ApplicationBuilder<S> {
    structure_unit: S,
}

impl<S: StructureUnitBuilder> ApplicationBuilder<S> {
    #[must_use]
    pub fn new(structure_unit: S) -> Self {
        Self { structure_unit }
    }

    fn application_level(init_hl_depth: u32) -> HierarchyLevel {
        HierarchyLevel::new(Some(init_hl_depth), Some(0), true, line_type::APPLICATION)
    }

    fn line_to_level(
        &self,
        text: &str,
        label: &str,
        init_hl_depth: u32,
        previous_hl: Option<&HierarchyLevel>,
    ) -> LevelStep {
        let text = text.trim();
        let mut label = if text.is_empty() { line_type::RAW_TEXT } else { label };
        if label == line_type::HEADER || label == line_type::CELLAR {
            label = line_type::APPLICATION;
        }
        if label == line_type::RAW_TEXT && APPLICATION_BEGIN.is_match(text) {
            label = line_type::APPLICATION;
        }
        if (label == line_type::APPLICATION || label == line_type::RAW_TEXT) && ROMAN.is_match(text) {
            label = line_type::STRUCTURE_UNIT;
        }

        match (label, previous_hl) {
            (line_type::STRUCTURE_UNIT, _) => {
                self.structure_unit
                    .structure_unit(text, init_hl_depth, previous_hl)
            }
            (line_type::FOOTER, _) => fresh(plain_raw_text()),
            (line_type::RAW_TEXT, Some(previous)) if previous.line_type == line_type::CHAPTER => {
                sticky(previous.clone())
            }
            (line_type::RAW_TEXT, None) => fresh(HierarchyLevel::create_raw_text()),
            (line_type::OTHER, _) => fresh(HierarchyLevel::new(Some(1), Some(1), false, line_type::OTHER)),
            (line_type::APPLICATION, _) => sticky(Self::application_level(init_hl_depth)),
            (line_type::RAW_TEXT, Some(previous)) if previous.line_type == line_type::APPLICATION => {
                sticky(Self::application_level(init_hl_depth))
            }
            (line_type::RAW_TEXT, Some(_)) => fresh(HierarchyLevel::create_raw_text()),
            (other, _) => {
                tracing::warn!(label = other, text, "Unexpected label in application zone, using raw text");
                fresh(HierarchyLevel::create_raw_text())
            }
        }
    }
}

impl<S: StructureUnitBuilder> HierarchyLevelBuilder for ApplicationBuilder<S> {
    fn build(&self, lines_with_labels: Vec<LabeledLine>, init_hl_depth: u32) -> Vec<LineWithMeta> {
        let mut previous_hl = Some(Self::application_level(init_hl_depth));
        let mut previous_line_start_of_application = false;

        lines_with_labels
            .into_iter()
            .enumerate()
            .map(|(line_id, (mut line, label))| {
                // The zone always opens with an application heading.
                let label = if line_id == 0 { line_type::APPLICATION } else { label.as_str() };
                let (mut level, next) =
                    self.line_to_level(line.line(), label, init_hl_depth, previous_hl.as_ref());
                previous_hl = next;

                let text = line.line().trim().to_lowercase();
                if APPLICATION_BEGIN.is_match(&text) {
                    level.can_be_multiline = previous_line_start_of_application;
                    previous_line_start_of_application = true;
                } else if !text.is_empty() {
                    previous_line_start_of_application = false;
                }

                postprocess_roman(&level, &mut line);
                if line_id == 0 {
                    level.can_be_multiline = false;
                }
                line.set_hierarchy_level(level);
                line
            })
            .collect()
    }
}
