//! Project display colors.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Color assigned to projects created without one.
pub const DEFAULT_PROJECT_COLOR: &str = "#3B82F6";

/// `#RGB` or `#RRGGBB`, either case.
static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"));

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
}

/// Validate an optional color from a request body.
///
/// Surrounding whitespace is ignored; the trimmed value is returned.
pub fn validate_color(color: Option<&str>) -> Result<Option<String>, CoreError> {
    match color.map(str::trim) {
        None => Ok(None),
        Some(c) if is_hex_color(c) => Ok(Some(c.to_string())),
        Some(c) => Err(CoreError::invalid_field(
            "color",
            format!("'{c}' is not a valid hex color"),
        )),
    }
}
