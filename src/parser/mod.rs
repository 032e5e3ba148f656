//! CSV table loading with encoding and delimiter auto-detection.
//!
//! French institutional exports arrive in whatever shape the source
//! office's Excel produced: UTF-8 or Latin-1/Windows-1252 bytes,
//! semicolon or comma delimiters, quoted fields. This module turns
//! such a file into row objects keyed by column header, leaving all
//! cell values as strings for the transform layer to interpret.

use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed rows as JSON objects
    pub records: Vec<Value>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
    /// Column headers
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the specified encoding.
///
/// Unknown encodings fall back to lossy UTF-8. A leading UTF-8 BOM is
/// stripped so it cannot corrupt the first header.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.to_string()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    };
    decoded.trim_start_matches('\u{feff}').to_string()
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ';';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV content into row objects with an explicit delimiter.
///
/// Each row becomes a JSON object where keys are column headers and
/// every value is a string. Rows shorter than the header are padded
/// with empty fields, extra fields are ignored, blank lines are
/// skipped.
///
/// # Example
/// ```ignore
/// use carte_ulis::parse_str;
///
/// let csv = "UAI;Ville\n0751234A;Paris";
/// let rows = parse_str(csv, ';').unwrap();
///
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0]["UAI"], "0751234A");
/// ```
pub fn parse_str(content: &str, delimiter: char) -> CsvResult<Vec<Value>> {
    let (_, records) = parse_rows(content, delimiter)?;
    Ok(records)
}

/// Parse CSV content, returning headers and row objects.
fn parse_rows(content: &str, delimiter: char) -> CsvResult<(Vec<String>, Vec<Value>)> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CsvError::ParseError(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut records = Vec::new();

    for row in reader.records() {
        let row = row.map_err(|e| CsvError::ParseError(e.to_string()))?;

        if row.iter().all(|field| field.is_empty()) {
            continue;
        }

        let mut obj = Map::new();
        for (i, header) in headers.iter().enumerate() {
            let raw_value = row.get(i).unwrap_or("");
            obj.insert(header.clone(), Value::String(raw_value.to_string()));
        }
        records.push(Value::Object(obj));
    }

    Ok((headers, records))
}

/// Parse a CSV file with auto-detection of encoding and delimiter.
///
/// # Example
/// ```ignore
/// let result = parse_csv_file_auto("details.csv")?;
/// println!("Encoding: {}, Delimiter: '{}'", result.encoding, result.delimiter);
/// println!("Rows: {}", result.records.len());
/// ```
pub fn parse_csv_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);

    let (headers, records) = parse_rows(&content, delimiter)?;

    Ok(ParseResult {
        records,
        encoding,
        delimiter,
        headers,
    })
}

/// Parse a CSV file with an explicit delimiter (encoding still auto-detected).
pub fn parse_csv_file<P: AsRef<Path>>(path: P, delimiter: char) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, &encoding);

    let (headers, records) = parse_rows(&content, delimiter)?;

    Ok(ParseResult {
        records,
        encoding,
        delimiter,
        headers,
    })
}
