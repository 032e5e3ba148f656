//! # carte-ulis - ULIS unit extraction for the academy map
//!
//! carte-ulis merges two spreadsheet extracts describing ULIS school
//! inclusion units - an administrative "details" table and a "geo"
//! table carrying coordinates - into one clean, geolocated dataset for
//! the map front end.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  CSV files  │────▶│   Parser    │────▶│  Transform   │────▶│ data_ulis.js │
//! │ (ISO/UTF8)  │     │ (auto-enc)  │     │ (merge+rules)│     │  (JS + JSON) │
//! └─────────────┘     └─────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use carte_ulis::{extract_files, write_artifact, DEFAULT_VAR_NAME};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let result = extract_files(Path::new("details.csv"), Path::new("geo.csv"))?;
//!     write_artifact(Path::new("data_ulis.js"), &result.records, DEFAULT_VAR_NAME, false)?;
//!     println!("{} units emitted", result.stats.emitted);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - error types and result aliases
//! - [`models`] - domain models (DetailsRow, GeoRow, UlisRecord, Degree)
//! - [`parser`] - CSV loading with encoding/delimiter auto-detection
//! - [`transform`] - merge, filters, classifiers, pipeline
//! - [`validation`] - record schema validation
//! - [`output`] - JS artifact rendering
//! - [`inspect`] - ad-hoc column inspection
//! - [`report`] - leveled status reporting

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// Output artifact
pub mod output;

// Inspection
pub mod inspect;

// Status reporting
pub mod report;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, CsvResult, PipelineError, PipelineResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Degree, DetailsRow, GeoRow, MergedRow, UlisRecord, UNSPECIFIED};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    detect_delimiter, detect_encoding, parse_bytes_auto, parse_csv_file, parse_csv_file_auto,
    parse_str, ParseResult,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::{
    extract_files, run, DropReason, DroppedRow, ExtractResult, ExtractStats,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid, is_valid_ulis_record, validate, validate_records, validate_ulis_record};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use output::{artifact_body, render_js, render_json, write_artifact, DEFAULT_VAR_NAME};
