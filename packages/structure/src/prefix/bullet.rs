//! Bullet markers: `-`, `*`, `•`.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, StructureError};

/// Characters accepted as bullets.
pub const BULLETS: &[char] = &[
    '*', '+', '?', '-', '#', '©', '•', '○', '▪', '◦', '·', '–', '—', '►', '➢', '\u{f0b7}', '\u{f0a7}',
];

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static BULLET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let class: String = BULLETS
        .iter()
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    Regex::new(&format!(r"^\s*[{class}]")).expect("valid regex")
});

/// Non-letter bullet item.
///
/// Bullets carry no order: two items with the same bullet precede each
/// other in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct BulletPrefix {
    pub prefix: String,
    pub indent: f64,
}

impl BulletPrefix {
    pub const NAME: &'static str = "bullet";

    pub fn new(prefix: &str, indent: f64) -> Result<Self> {
        if !Self::is_valid(prefix) {
            return Err(StructureError::InvalidPrefix {
                kind: Self::NAME,
                prefix: prefix.to_string(),
            });
        }
        Ok(Self {
            prefix: prefix.to_string(),
            indent,
        })
    }

    #[must_use]
    pub fn is_valid(prefix: &str) -> bool {
        let mut chars = prefix.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if BULLETS.contains(&c))
    }

    #[must_use]
    pub fn predecessor(&self, other: &Self) -> bool {
        self.prefix == other.prefix
    }
}
