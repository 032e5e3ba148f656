//! Ad-hoc inspection of an input table.
//!
//! Used by the `inspect` CLI command to answer the questions that come
//! up when a new extract arrives: what columns does it have, which
//! ones look like address data, and what does a given column actually
//! contain.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

/// Column names that look like they carry address data.
static ADDRESS_CANDIDATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)ADRESSE|RUE|CPOSTAL|COMMUNE").expect("valid pattern"));

/// Headers matching the address-candidate pattern.
pub fn address_candidates(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .filter(|h| ADDRESS_CANDIDATE_RE.is_match(h))
        .cloned()
        .collect()
}

/// Occurrence counts of a column's values, most frequent first.
///
/// Rows where the column is missing count under the empty string, so
/// blank cells and absent artifacts stay visible (they usually are the
/// interesting part). Ties break on the value for deterministic
/// output.
pub fn unique_value_counts(rows: &[Value], column: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let cell = row
            .get(column)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .trim()
            .to_string();
        *counts.entry(cell).or_insert(0) += 1;
    }

    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_address_candidates() {
        let headers = vec![
            "UAI".to_string(),
            "Adresse".to_string(),
            "Rue principale".to_string(),
            "CPOSTAL".to_string(),
            "Commune".to_string(),
            "Type".to_string(),
        ];
        assert_eq!(
            address_candidates(&headers),
            vec!["Adresse", "Rue principale", "CPOSTAL", "Commune"]
        );
    }

    #[test]
    fn test_unique_value_counts_sorted() {
        let rows = vec![
            json!({"Dispositif spécifique": "DAR"}),
            json!({"Dispositif spécifique": "TSA"}),
            json!({"Dispositif spécifique": "DAR"}),
            json!({"Dispositif spécifique": "nan"}),
            json!({"autre": "x"}),
        ];
        let counts = unique_value_counts(&rows, "Dispositif spécifique");

        assert_eq!(counts[0], ("DAR".to_string(), 2));
        // "TSA", "nan" and the missing cell each count once; ties sort by value.
        assert_eq!(counts.len(), 4);
        assert!(counts.contains(&("nan".to_string(), 1)));
        assert!(counts.contains(&(String::new(), 1)));
    }
}
