//! Typed access to optional row fields.
//!
//! Parsed rows are JSON objects whose values are all strings; what a
//! cell *means* (flag, count, decimal) is decided here, once, when
//! the typed input rows are built. Absence is first-class: a blank
//! cell, a missing column, or a stringified-null artifact (`nan`,
//! `none`) all read as `None`, and every consumer declares its own
//! default at the output boundary instead of sprinkling fallbacks
//! through the pipeline.

use serde_json::{Map, Value};

/// Values recognized as an affirmative flag.
const TRUE_VALUES: &[&str] = &["true", "vrai", "oui", "1", "yes", "o"];

/// Values recognized as a negative flag.
const FALSE_VALUES: &[&str] = &["false", "faux", "non", "0", "no"];

/// Read-only view over one parsed row.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    row: &'a Map<String, Value>,
}

static EMPTY_ROW: once_cell::sync::Lazy<Map<String, Value>> =
    once_cell::sync::Lazy::new(Map::new);

impl<'a> RowView<'a> {
    /// Wrap a parsed row. Non-object values behave as an empty row.
    pub fn new(row: &'a Value) -> Self {
        Self {
            row: row.as_object().unwrap_or(&EMPTY_ROW),
        }
    }

    /// Raw cell content as a string, if the column exists.
    fn cell(&self, column: &str) -> Option<String> {
        match self.row.get(column)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Trimmed text content; absent cells and null artifacts read as `None`.
    pub fn text(&self, column: &str) -> Option<String> {
        let value = self.cell(column)?;
        let trimmed = value.trim();
        if is_absent(trimmed) {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Boolean-ish flag. Unrecognized or absent content reads as `None`.
    pub fn flag(&self, column: &str) -> Option<bool> {
        let value = self.cell(column)?;
        let lowered = value.trim().to_lowercase();
        if TRUE_VALUES.contains(&lowered.as_str()) {
            Some(true)
        } else if FALSE_VALUES.contains(&lowered.as_str()) {
            Some(false)
        } else {
            None
        }
    }

    /// Non-negative count. Accepts integer or float-formatted text
    /// (Excel exports capacities as `2.0`), truncating to the integer
    /// part. Negative or unparsable content reads as `None`.
    pub fn count(&self, column: &str) -> Option<u32> {
        let value = self.text(column)?;
        let parsed = parse_decimal(&value)?;
        if parsed >= 0.0 {
            Some(parsed as u32)
        } else {
            None
        }
    }
}

/// True when a trimmed cell reads as absent: empty, or one of the
/// stringified-null artifacts case-folded (`nan`, `none`).
fn is_absent(trimmed: &str) -> bool {
    let lowered = trimmed.to_lowercase();
    lowered.is_empty() || lowered == "nan" || lowered == "none"
}

/// Parse a decimal number, tolerating a decimal-comma locale.
///
/// Substitutes `,` for `.` before conversion; rejects non-finite
/// results so `inf`/`NaN` spellings never become coordinates.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_filters_artifacts() {
        let row = json!({"a": "  Paris ", "b": "nan", "c": "None", "d": ""});
        let view = RowView::new(&row);

        assert_eq!(view.text("a").as_deref(), Some("Paris"));
        assert_eq!(view.text("b"), None);
        assert_eq!(view.text("c"), None);
        assert_eq!(view.text("d"), None);
        assert_eq!(view.text("missing_column"), None);
    }

    #[test]
    fn test_text_keeps_multi_token_artifact() {
        // Only single-token artifacts read as absent; "nan nan" is the
        // sanitizer's job at the output boundary.
        let row = json!({"a": "nan nan"});
        let view = RowView::new(&row);
        assert_eq!(view.text("a").as_deref(), Some("nan nan"));
    }

    #[test]
    fn test_flag_parsing() {
        let row = json!({
            "a": "True", "b": "VRAI", "c": "oui", "d": "1",
            "e": "false", "f": "non", "g": "peut-être", "h": "nan"
        });
        let view = RowView::new(&row);

        assert_eq!(view.flag("a"), Some(true));
        assert_eq!(view.flag("b"), Some(true));
        assert_eq!(view.flag("c"), Some(true));
        assert_eq!(view.flag("d"), Some(true));
        assert_eq!(view.flag("e"), Some(false));
        assert_eq!(view.flag("f"), Some(false));
        assert_eq!(view.flag("g"), None);
        assert_eq!(view.flag("h"), None);
    }

    #[test]
    fn test_count_parsing() {
        let row = json!({"a": "12", "b": "2.0", "c": "0", "d": "-3", "e": "nan", "f": "douze"});
        let view = RowView::new(&row);

        assert_eq!(view.count("a"), Some(12));
        assert_eq!(view.count("b"), Some(2));
        assert_eq!(view.count("c"), Some(0));
        assert_eq!(view.count("d"), None);
        assert_eq!(view.count("e"), None);
        assert_eq!(view.count("f"), None);
    }

    #[test]
    fn test_parse_decimal_comma_equals_dot() {
        assert_eq!(parse_decimal("45,750"), parse_decimal("45.750"));
        assert_eq!(parse_decimal("45,750"), Some(45.75));
    }

    #[test]
    fn test_parse_decimal_rejects_non_finite() {
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }
}
