//! Building patterns from configuration dicts.
//!
//! Every dict needs `name`, `line_type` and `level_1`. Optional keys are
//! `level_2` and `can_be_multiline` (default `true`); `regexp` and
//! `start_word` patterns also need their own key.
//!
//! ```json
//! [
//!   {"name": "start_word", "start_word": "глава", "line_type": "глава", "level_1": 1},
//!   {"name": "dotted_list", "line_type": "point", "level_1": 2, "can_be_multiline": false}
//! ]
//! ```

use serde::Deserialize;
use serde_json::Value;

use super::{
    LevelTemplate, ListKind, ListPattern, Pattern, PatternComposition, RegexpPattern,
    StartWordPattern, TagHeaderPattern, TagListPattern, TagPattern,
};
use crate::error::{Result, StructureError};

const LIST_KINDS: [ListKind; 5] = [
    ListKind::Dotted,
    ListKind::Bracket,
    ListKind::Letter,
    ListKind::Bullet,
    ListKind::Roman,
];

/// Names accepted in the `name` key.
#[must_use]
pub fn pattern_names() -> Vec<&'static str> {
    let mut names = vec![
        RegexpPattern::NAME,
        StartWordPattern::NAME,
        TagPattern::NAME,
        TagHeaderPattern::NAME,
        TagListPattern::NAME,
    ];
    names.extend(LIST_KINDS.iter().map(|k| k.pattern_name()));
    names
}

/// One pattern dict as written in the configuration.
///
/// Required keys are optional here so that a missing one is reported as
/// [`StructureError::MissingPatternKey`] naming the pattern.
#[derive(Debug, Deserialize)]
struct PatternConfig {
    name: Option<String>,
    line_type: Option<String>,
    level_1: Option<u32>,
    level_2: Option<u32>,
    can_be_multiline: Option<bool>,
    regexp: Option<String>,
    start_word: Option<String>,
}

fn missing(name: &str, key: &'static str) -> StructureError {
    StructureError::MissingPatternKey {
        key,
        pattern: Some(name.to_string()),
    }
}

impl PatternConfig {
    fn into_pattern(self) -> Result<Box<dyn Pattern>> {
        let name = self.name.as_deref().ok_or(StructureError::MissingPatternKey {
            key: "name",
            pattern: None,
        })?;
        if !pattern_names().contains(&name) {
            return Err(StructureError::UnknownPattern(name.to_string()));
        }

        let line_type = self.line_type.as_deref().ok_or_else(|| missing(name, "line_type"))?;
        let level_1 = self.level_1.ok_or_else(|| missing(name, "level_1"))?;
        let template = LevelTemplate::new(
            line_type,
            level_1,
            self.level_2,
            self.can_be_multiline.unwrap_or(true),
        );

        let pattern: Box<dyn Pattern> = match name {
            RegexpPattern::NAME => {
                let regexp = self.regexp.as_deref().ok_or_else(|| missing(name, "regexp"))?;
                Box::new(RegexpPattern::new(regexp, template)?)
            }
            StartWordPattern::NAME => {
                let start_word = self.start_word.as_deref().ok_or_else(|| missing(name, "start_word"))?;
                Box::new(StartWordPattern::new(start_word, template))
            }
            TagPattern::NAME => Box::new(TagPattern::new(
                Some(line_type.to_string()),
                Some(level_1),
                self.level_2,
                self.can_be_multiline,
            )),
            TagHeaderPattern::NAME => Box::new(TagHeaderPattern::new(template)),
            TagListPattern::NAME => Box::new(TagListPattern::new(template)),
            _ => {
                let kind = LIST_KINDS
                    .into_iter()
                    .find(|k| k.pattern_name() == name)
                    .ok_or_else(|| StructureError::UnknownPattern(name.to_string()))?;
                Box::new(ListPattern::new(kind, template))
            }
        };
        Ok(pattern)
    }
}

/// Build one pattern from its dict.
pub fn pattern_from_value(value: &Value) -> Result<Box<dyn Pattern>> {
    let config = PatternConfig::deserialize(value).map_err(|e| StructureError::InvalidPatternValue {
        key: "pattern",
        reason: format!("{e} in {value}"),
    })?;
    config.into_pattern()
}

/// Build a composition from a list of dicts or a `{"patterns": [...]}` object.
pub fn patterns_from_value(value: &Value) -> Result<PatternComposition> {
    let list = match value {
        Value::Array(list) => list,
        Value::Object(fields) => match fields.get("patterns") {
            Some(Value::Array(list)) => list,
            _ => return Err(StructureError::MissingPatternKey {
                key: "patterns",
                pattern: None,
            }),
        },
        other => {
            return Err(StructureError::InvalidPatternValue {
                key: "patterns",
                reason: format!("expected a list of patterns, got {other}"),
            })
        }
    };

    let patterns = list.iter().map(pattern_from_value).collect::<Result<Vec<_>>>()?;
    tracing::debug!(count = patterns.len(), "Loaded patterns");
    Ok(PatternComposition::new(patterns))
}

/// Parse pattern configuration written as JSON or YAML.
pub fn patterns_from_str(text: &str) -> Result<PatternComposition> {
    let trimmed = text.trim_start();
    let value: Value = if trimmed.starts_with('[') || trimmed.starts_with('{') {
        serde_json::from_str(text)?
    } else {
        serde_yaml_ng::from_str(text)?
    };
    patterns_from_value(&value)
}
