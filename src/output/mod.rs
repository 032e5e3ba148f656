//! Output artifact rendering and writing.
//!
//! The artifact is a UTF-8 text file assigning a JSON array of output
//! records to a JS variable, suitable for direct inclusion by the map
//! front end:
//!
//! ```text
//! const dataUlis = [
//!   {
//!     "uai": "0751234A",
//!     ...
//!   }
//! ];
//! ```
//!
//! Non-ASCII characters are preserved verbatim and indentation is
//! two spaces. Nothing run-dependent (no timestamps) goes into the
//! file, keeping re-runs on unchanged inputs byte-identical.

use std::fs;
use std::path::Path;

use crate::error::PipelineResult;
use crate::models::UlisRecord;

/// Default JS variable name consumed by the front end.
pub const DEFAULT_VAR_NAME: &str = "dataUlis";

/// Render records as a JS variable assignment.
pub fn render_js(records: &[UlisRecord], var_name: &str) -> serde_json::Result<String> {
    let body = serde_json::to_string_pretty(records)?;
    Ok(format!("const {} = {};", var_name, body))
}

/// Render records as a bare pretty JSON array.
pub fn render_json(records: &[UlisRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Write the artifact to disk.
pub fn write_artifact(
    path: &Path,
    records: &[UlisRecord],
    var_name: &str,
    json_only: bool,
) -> PipelineResult<()> {
    let content = if json_only {
        render_json(records)?
    } else {
        render_js(records, var_name)?
    };
    fs::write(path, content)?;
    Ok(())
}

/// Extract the JSON body from artifact content.
///
/// Accepts either a bare JSON array or the JS variable assignment
/// produced by [`render_js`], so `validate` works on both.
pub fn artifact_body(content: &str) -> &str {
    let trimmed = content.trim();
    if let Some(rest) = trimmed.strip_prefix("const ") {
        if let Some(eq) = rest.find('=') {
            return rest[eq + 1..].trim().trim_end_matches(';').trim_end();
        }
    }
    trimmed
}
