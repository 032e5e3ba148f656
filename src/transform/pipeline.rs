//! The extraction pipeline: merge, filter, classify, validate, emit.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────────────┐
//! │ details rows │──▶│  left join   │──▶│ active? ─ classify ─     │
//! ├──────────────┤   │ (normalized  │   │   coords valid? ─        │──▶ records
//! │   geo rows   │──▶│     UAI)     │   │     sanitize ─ emit      │──▶ dropped + stats
//! └──────────────┘   └──────────────┘   └──────────────────────────┘
//! ```
//!
//! Per merged row the state machine is strictly forward:
//! merged → dropped(inactive) | classified → dropped(coords) | emitted.
//! Per-row defects never abort the run; they are collected as
//! [`DroppedRow`] values and counted in [`ExtractStats`].

use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::error::PipelineResult;
use crate::models::{DetailsRow, MergedRow, UlisRecord, UNSPECIFIED};
use crate::parser::parse_csv_file_auto;
use crate::report::{log_info, log_success, log_warning};
use crate::transform::classify::{final_degree, specialization};
use crate::transform::fields::parse_decimal;
use crate::transform::merge::{merge, read_details, GeoIndex};

/// Why a merged row was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum DropReason {
    /// Not an active unit: flag false and no positive capacity.
    Inactive,
    /// No geo match, or the geo row lacks latitude or longitude.
    MissingCoordinates,
    /// Coordinates present but not parsable as finite numbers.
    InvalidCoordinates { lat: String, lng: String },
}

/// A merged row that did not survive the filters.
#[derive(Debug, Clone)]
pub struct DroppedRow {
    /// Index in the merged sequence.
    pub row: usize,
    pub uai: String,
    /// Display name for diagnostics.
    pub name: String,
    pub reason: DropReason,
}

/// Counters printed as the run summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractStats {
    /// Rows produced by the merge step.
    pub merged: usize,
    /// Records that survived every filter.
    pub emitted: usize,
    /// Dropped: zero/inactive unit.
    pub skipped_inactive: usize,
    /// Dropped: latitude or longitude absent.
    pub missing_coords: usize,
    /// Dropped: latitude or longitude unparsable.
    pub invalid_coords: usize,
}

/// Result of a complete extraction run.
#[derive(Debug)]
pub struct ExtractResult {
    /// Output records, in details-table order. A snapshot: never
    /// mutated after construction.
    pub records: Vec<UlisRecord>,
    /// Rows dropped by the filters, with reasons.
    pub dropped: Vec<DroppedRow>,
    pub stats: ExtractStats,
}

/// Run the pipeline over two already-parsed tables.
///
/// Pure and deterministic: identical inputs yield identical output
/// order and content.
pub fn run(details_rows: &[Value], geo_rows: &[Value]) -> ExtractResult {
    log_info("Normalizing identifiers and merging...");
    let details = read_details(details_rows);
    let geo = GeoIndex::build(geo_rows);
    let merged = merge(details, &geo);
    log_success(format!("{} records after merge", merged.len()));

    let mut records = Vec::new();
    let mut dropped = Vec::new();
    let mut stats = ExtractStats {
        merged: merged.len(),
        ..ExtractStats::default()
    };

    for (idx, row) in merged.iter().enumerate() {
        match build_record(row) {
            Ok(record) => records.push(record),
            Err(reason) => {
                match &reason {
                    DropReason::Inactive => stats.skipped_inactive += 1,
                    DropReason::MissingCoordinates => {
                        stats.missing_coords += 1;
                        log_warning(format!(
                            "No coordinates for {} - {}",
                            row.details.uai,
                            row.display_name()
                        ));
                    }
                    DropReason::InvalidCoordinates { lat, lng } => {
                        stats.invalid_coords += 1;
                        log_warning(format!(
                            "Invalid coordinates for {}: {}, {}",
                            row.details.uai, lat, lng
                        ));
                    }
                }
                dropped.push(DroppedRow {
                    row: idx,
                    uai: row.details.uai.clone(),
                    name: row.display_name().to_string(),
                    reason,
                });
            }
        }
    }

    stats.emitted = records.len();
    ExtractResult {
        records,
        dropped,
        stats,
    }
}

/// Load both tables from disk and run the pipeline.
///
/// A load failure on either table aborts before any processing.
pub fn extract_files(details_path: &Path, geo_path: &Path) -> PipelineResult<ExtractResult> {
    log_info(format!(
        "📖 Loading details table: {}",
        details_path.display()
    ));
    let details = parse_csv_file_auto(details_path)?;
    log_success(format!(
        "{} rows (encoding {}, delimiter '{}')",
        details.records.len(),
        details.encoding,
        details.delimiter
    ));

    log_info(format!("📖 Loading geo table: {}", geo_path.display()));
    let geo = parse_csv_file_auto(geo_path)?;
    log_success(format!(
        "{} rows (encoding {}, delimiter '{}')",
        geo.records.len(),
        geo.encoding,
        geo.delimiter
    ));

    Ok(run(&details.records, &geo.records))
}

/// Active-unit filter: explicit flag, or a strictly positive capacity.
fn is_active(details: &DetailsRow) -> bool {
    details.ulis == Some(true) || details.capacity.is_some_and(|c| c > 0)
}

/// Take one merged row through the filters to a finished record.
fn build_record(row: &MergedRow) -> Result<UlisRecord, DropReason> {
    if !is_active(&row.details) {
        return Err(DropReason::Inactive);
    }

    let degre = final_degree(row);

    let (lat, lng) = parse_coordinates(row)?;

    let details = &row.details;
    let nom = [details.name_main.as_deref(), details.name_extra.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    let mut record = UlisRecord {
        uai: details.uai.clone(),
        nom: nom.trim().to_string(),
        ville: details.city.clone().unwrap_or_default(),
        adresse: details.address.clone().unwrap_or_default(),
        degre,
        spec_type: specialization(row).unwrap_or_default().to_string(),
        circo: details
            .district
            .clone()
            .or_else(|| row.geo.as_ref().and_then(|g| g.district.clone()))
            .unwrap_or_default(),
        lat,
        lng,
        coordo: details
            .coordinator
            .clone()
            .unwrap_or_else(|| UNSPECIFIED.to_string()),
        capa: details.capacity.unwrap_or(0),
        erseh: details
            .support_staff
            .clone()
            .unwrap_or_else(|| UNSPECIFIED.to_string()),
    };
    record.sanitize();

    Ok(record)
}

/// Coordinate validation, the last filter applied.
///
/// Both values must be present on the geo match, and both must parse
/// to finite numbers after decimal-comma substitution.
fn parse_coordinates(row: &MergedRow) -> Result<(f64, f64), DropReason> {
    let geo = row.geo.as_ref().ok_or(DropReason::MissingCoordinates)?;

    let (raw_lat, raw_lng) = match (geo.lat.as_deref(), geo.lng.as_deref()) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return Err(DropReason::MissingCoordinates),
    };

    match (parse_decimal(raw_lat), parse_decimal(raw_lng)) {
        (Some(lat), Some(lng)) => Ok((lat, lng)),
        _ => Err(DropReason::InvalidCoordinates {
            lat: raw_lat.to_string(),
            lng: raw_lng.to_string(),
        }),
    }
}
