//! JSON Schema validation of output records.
//!
//! The record schema is embedded at compile time from
//! `schemas/ulis-record.json` (JSON Schema draft 7). The extraction
//! pipeline constructs records typed, so it never re-validates its own
//! output; this module backs the `validate` CLI command for checking
//! artifacts after the fact, and the test suite's conformance
//! assertions.

use serde_json::Value;

/// Validate a JSON object against a JSON schema.
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(Vec<String>)` with the errors if invalid
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Even simpler variant: just true/false.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

fn record_schema() -> Value {
    serde_json::from_str(include_str!("../../schemas/ulis-record.json"))
        .expect("Invalid embedded schema")
}

/// Validate one record against the embedded ULIS record schema.
pub fn validate_ulis_record(data: &Value) -> Result<(), Vec<String>> {
    validate(&record_schema(), data)
}

/// Quick check against the embedded ULIS record schema.
pub fn is_valid_ulis_record(data: &Value) -> bool {
    is_valid(&record_schema(), data)
}

/// Validate a batch of records, collecting up to ten error reports.
pub fn validate_records(records: &[Value]) -> (usize, usize, Vec<(usize, Vec<String>)>) {
    let mut valid = 0;
    let mut invalid = 0;
    let mut errors = Vec::new();

    for (i, record) in records.iter().enumerate() {
        match validate_ulis_record(record) {
            Ok(()) => valid += 1,
            Err(errs) => {
                invalid += 1;
                if errors.len() < 10 {
                    errors.push((i, errs));
                }
            }
        }
    }

    (valid, invalid, errors)
}
