//! Error types for the extraction pipeline.
//!
//! Two classes of failure exist:
//!
//! - [`CsvError`] - an input table cannot be read or parsed. Fatal:
//!   the run aborts before any output is written.
//! - [`PipelineError`] - top-level orchestration errors, wrapping
//!   [`CsvError`] plus serialization and IO failures around the
//!   output artifact.
//!
//! Per-row defects (missing or unparsable coordinates) are *not*
//! errors: they are dropped-row values carried in the pipeline result.
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Loading Errors
// =============================================================================

/// Errors while loading an input table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode content in the detected encoding.
    #[error("Failed to decode content: {0}")]
    EncodingError(String),

    /// Invalid CSV format.
    #[error("Invalid CSV format: {0}")]
    ParseError(String),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the main error type returned by
/// [`crate::transform::pipeline::extract_files`] and the artifact
/// writer. A load failure on either input table surfaces here and
/// aborts the run with no output written.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An input table could not be loaded.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while writing the output artifact.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV loading.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> PipelineError
        let csv_err = CsvError::EmptyFile;
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("empty"));

        // io::Error -> CsvError
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let csv_err: CsvError = io_err.into();
        assert!(csv_err.to_string().contains("no such file"));
    }

    #[test]
    fn test_parse_error_format() {
        let err = CsvError::ParseError("unterminated quote on line 3".into());
        assert!(err.to_string().contains("line 3"));
    }
}
