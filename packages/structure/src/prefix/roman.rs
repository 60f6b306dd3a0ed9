//! Roman numeral items: `iv.`, `ii)`.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, StructureError};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static ROMAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[ivxlcdm]+\.").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static BRACKET_ROMAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[ivxlcdm]+\)").expect("valid regex"));

/// Parse a roman numeral, rejecting non-canonical forms such as `iiii` or `vx`.
#[must_use]
pub fn roman_to_int(numeral: &str) -> Option<u32> {
    let digit = |c: char| match c.to_ascii_lowercase() {
        'i' => Some(1),
        'v' => Some(5),
        'x' => Some(10),
        'l' => Some(50),
        'c' => Some(100),
        'd' => Some(500),
        'm' => Some(1000),
        _ => None,
    };
    let digits = numeral.chars().map(digit).collect::<Option<Vec<u32>>>()?;
    if digits.is_empty() {
        return None;
    }

    let mut total: i64 = 0;
    for (i, &value) in digits.iter().enumerate() {
        match digits.get(i + 1) {
            Some(&next) if next > value => total -= i64::from(value),
            _ => total += i64::from(value),
        }
    }
    let total = u32::try_from(total).ok().filter(|&t| t > 0)?;
    (int_to_roman(total) == numeral.to_ascii_lowercase()).then_some(total)
}

fn int_to_roman(mut value: u32) -> String {
    const TABLE: [(u32, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut out = String::new();
    for (arabic, roman) in TABLE {
        while value >= arabic {
            out.push_str(roman);
            value -= arabic;
        }
    }
    out
}

fn parse(prefix: &str, terminator: char, kind: &'static str) -> Result<u32> {
    prefix
        .strip_suffix(terminator)
        .and_then(roman_to_int)
        .ok_or_else(|| StructureError::InvalidPrefix {
            kind,
            prefix: prefix.to_string(),
        })
}

/// Roman numeral followed by a dot.
#[derive(Debug, Clone, PartialEq)]
pub struct RomanPrefix {
    pub prefix: String,
    pub indent: f64,
    pub value: u32,
}

impl RomanPrefix {
    pub const NAME: &'static str = "roman";

    pub fn new(prefix: &str, indent: f64) -> Result<Self> {
        Ok(Self {
            value: parse(prefix, '.', Self::NAME)?,
            prefix: prefix.to_string(),
            indent,
        })
    }

    #[must_use]
    pub fn is_valid(prefix: &str) -> bool {
        prefix.strip_suffix('.').and_then(roman_to_int).is_some()
    }

    #[must_use]
    pub fn predecessor(&self, other: &Self) -> bool {
        other.value.checked_add(1) == Some(self.value)
    }
}

/// Roman numeral followed by a closing bracket.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketRomanPrefix {
    pub prefix: String,
    pub indent: f64,
    pub value: u32,
}

impl BracketRomanPrefix {
    pub const NAME: &'static str = "bracket_roman";

    pub fn new(prefix: &str, indent: f64) -> Result<Self> {
        Ok(Self {
            value: parse(prefix, ')', Self::NAME)?,
            prefix: prefix.to_string(),
            indent,
        })
    }

    #[must_use]
    pub fn is_valid(prefix: &str) -> bool {
        prefix.strip_suffix(')').and_then(roman_to_int).is_some()
    }

    #[must_use]
    pub fn predecessor(&self, other: &Self) -> bool {
        other.value.checked_add(1) == Some(self.value)
    }
}
