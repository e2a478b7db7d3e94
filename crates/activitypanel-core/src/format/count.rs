/// Counter formatting — the `format` attribute of a counter element picks
/// between grouped integers and byte sizes.
use crate::error::{PanelError, Result};
use crate::format::size::format_bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decimal places used for `space` counters.
const SPACE_DECIMALS: i32 = 1;

/// How a counter renders its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// Whole number with thousands grouping.
    Regular,
    /// Byte size, one decimal place.
    Space,
}

impl FormatKind {
    /// The attribute value for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Space => "space",
        }
    }

    /// Render `number` in this kind.
    pub fn format(self, number: f64, locale: &NumberLocale) -> Result<String> {
        match self {
            Self::Regular => format_grouped(number, locale),
            Self::Space => format_bytes(number, SPACE_DECIMALS),
        }
    }
}

impl FromStr for FormatKind {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "regular" => Ok(Self::Regular),
            "space" => Ok(Self::Space),
            other => Err(PanelError::invalid_argument(format!(
                "unknown counter format kind {other:?} (expected \"regular\" or \"space\")"
            ))),
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digit grouping conventions for `regular` counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberLocale {
    /// Inserted between digit groups.
    pub group_separator: char,
    /// Digits per group; 0 disables grouping.
    pub group_size: usize,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self {
            group_separator: ',',
            group_size: 3,
        }
    }
}

impl NumberLocale {
    /// Strip this locale's group separators so a rendered number parses again.
    pub fn strip_grouping(&self, text: &str) -> String {
        text.chars()
            .filter(|&c| c != self.group_separator && !c.is_whitespace())
            .collect()
    }
}

/// Format a counter value by format-kind name.
///
/// Unknown kinds fail with `InvalidArgument` instead of rendering nothing.
pub fn format_count(number: f64, kind: &str, locale: &NumberLocale) -> Result<String> {
    kind.parse::<FormatKind>()?.format(number, locale)
}

/// Floor `number` and group its digits.
fn format_grouped(number: f64, locale: &NumberLocale) -> Result<String> {
    if !number.is_finite() {
        return Err(PanelError::invalid_argument(format!(
            "counter value must be finite, got {number}"
        )));
    }
    let floored = number.floor();
    let digits = format!("{:.0}", floored.abs());
    let grouped = group_digits(&digits, locale);
    if floored < 0.0 {
        Ok(format!("-{grouped}"))
    } else {
        Ok(grouped)
    }
}

/// Insert group separators into a plain digit string.
fn group_digits(digits: &str, locale: &NumberLocale) -> String {
    let size = locale.group_size;
    if size == 0 || digits.len() <= size {
        return digits.to_string();
    }
    let mut result = String::with_capacity(digits.len() + digits.len() / size);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % size == 0 {
            result.push(locale.group_separator);
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
