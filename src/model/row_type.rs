//! Row-type discriminator codes and their block classification

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Two upper-case letters and two digits (`SY02`), or `HEAD` / `FOOT`
static ROW_TYPE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Z]{2}[0-9]{2}|HEAD|FOOT)$").expect("row type pattern is valid")
});

/// Row types that belong to a report's header block
pub const HEAD_ROWS: [&str; 6] = ["HEAD", "SY01", "SY02", "SY03", "SY04", "FHEA"];

/// Row types that belong to a report's footer block
pub const FOOT_ROWS: [&str; 2] = ["FOOT", "FFOO"];

/// Block a row type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Head,
    Body,
    Foot,
    /// Unset or malformed row type
    Unknown,
}

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowKind::Head => "head",
            RowKind::Body => "body",
            RowKind::Foot => "foot",
            RowKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check a row type code, ignoring ASCII case
pub fn is_valid_row_type(code: &str) -> bool {
    ROW_TYPE_PATTERN.is_match(&code.to_ascii_uppercase())
}

/// Classify a row type code into its block kind
pub fn classify(code: &str) -> RowKind {
    let code = code.to_ascii_uppercase();
    if HEAD_ROWS.contains(&code.as_str()) {
        RowKind::Head
    } else if FOOT_ROWS.contains(&code.as_str()) {
        RowKind::Foot
    } else if ROW_TYPE_PATTERN.is_match(&code) {
        RowKind::Body
    } else {
        RowKind::Unknown
    }
}
