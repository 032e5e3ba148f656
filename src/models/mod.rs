//! Domain models for the ULIS extraction pipeline.
//!
//! This module contains the core data structures used throughout the
//! pipeline:
//!
//! - [`DetailsRow`] - administrative/program data for one facility assignment
//! - [`GeoRow`] - coordinates, degree and district for one facility
//! - [`MergedRow`] - a details row with its optional geo match
//! - [`Degree`] - schooling level classification
//! - [`UlisRecord`] - the emitted output record

use serde::{Deserialize, Serialize};

/// Sentinel presented for absent coordinator and support-staff fields.
pub const UNSPECIFIED: &str = "Non renseigné";

// =============================================================================
// Degree
// =============================================================================

/// Schooling level of a facility.
///
/// Derived from the details table's `Type` code when the geo table
/// carries no explicit degree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Degree {
    /// 1er degré - écoles (primary schooling).
    Primary,
    /// 2nd degré - collèges et lycées (secondary schooling).
    Secondary,
    /// Type code absent or outside the known vocabularies.
    Undetermined,
}

/// `Type` codes classified as primary schooling.
pub const PRIMARY_TYPE_CODES: &[&str] = &["EEPU", "EMPU", "EPPU", "ECOLE", "ELEM"];

/// `Type` codes classified as secondary schooling.
pub const SECONDARY_TYPE_CODES: &[&str] = &["CLG", "LPO", "LYC", "EREA", "LP", "LGT"];

impl Degree {
    /// Classify a `Type` code from the details table.
    pub fn from_type_code(code: &str) -> Self {
        let normalized = code.trim().to_uppercase();
        if PRIMARY_TYPE_CODES.contains(&normalized.as_str()) {
            Self::Primary
        } else if SECONDARY_TYPE_CODES.contains(&normalized.as_str()) {
            Self::Secondary
        } else {
            Self::Undetermined
        }
    }

    /// Display label, as consumed by the map front end.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Primary => "1er degré",
            Self::Secondary => "2nd degré",
            Self::Undetermined => "Indéterminé",
        }
    }
}

// =============================================================================
// Input rows
// =============================================================================

/// One row of the details table (administrative/program data).
///
/// Fields that may be blank or carry stringified-null artifacts in the
/// source are held as `Option`; `None` means the cell was absent.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsRow {
    /// Normalized facility identifier (trimmed, uppercased).
    pub uai: String,
    /// Explicit active-unit flag.
    pub ulis: Option<bool>,
    /// Accommodation capacity.
    pub capacity: Option<u32>,
    /// Specialized-device tag (DAR, TSA, TDL, ...).
    pub spec_device: Option<String>,
    /// Main display name.
    pub name_main: Option<String>,
    /// Complementary display name.
    pub name_extra: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    /// Degree-hint code (EEPU, CLG, ...).
    pub type_code: Option<String>,
    /// District, preferred over the geo table's.
    pub district: Option<String>,
    pub coordinator: Option<String>,
    pub support_staff: Option<String>,
}

/// One row of the geo table (coordinates, degree, district).
///
/// Coordinates stay raw strings until the coordinate validator runs,
/// so that an unparsable value can be reported verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRow {
    /// Normalized facility identifier (trimmed, uppercased).
    pub uai: String,
    pub lat: Option<String>,
    pub lng: Option<String>,
    /// Degree, taking priority over the details-derived classification.
    pub degree: Option<String>,
    /// District fallback.
    pub district: Option<String>,
}

/// A details row left-joined with its geo match.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub details: DetailsRow,
    /// Absent when no geo row shares the normalized identifier.
    pub geo: Option<GeoRow>,
}

impl MergedRow {
    /// Display name used in drop diagnostics.
    pub fn display_name(&self) -> &str {
        self.details.name_main.as_deref().unwrap_or("Unknown")
    }
}

// =============================================================================
// Output record
// =============================================================================

/// The externally visible unit consumed by the map front end.
///
/// Serialized field order is fixed by declaration order, keeping the
/// artifact byte-identical across runs on unchanged inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UlisRecord {
    pub uai: String,
    pub nom: String,
    pub ville: String,
    pub adresse: String,
    pub degre: String,
    pub spec_type: String,
    pub circo: String,
    pub lat: f64,
    pub lng: f64,
    pub coordo: String,
    pub capa: u32,
    pub erseh: String,
}

impl UlisRecord {
    /// Final sanitation pass over all string fields.
    ///
    /// Replaces the literal missing-value artifacts that string-casting
    /// absent cells produces upstream (`nan`, `NaN`, and the two-token
    /// `nan nan`) with an empty string.
    pub fn sanitize(&mut self) {
        for field in [
            &mut self.uai,
            &mut self.nom,
            &mut self.ville,
            &mut self.adresse,
            &mut self.degre,
            &mut self.spec_type,
            &mut self.circo,
            &mut self.coordo,
            &mut self.erseh,
        ] {
            if is_null_artifact(field) {
                field.clear();
            }
        }
    }
}

/// True for the literal string artifacts of a stringified absent cell.
fn is_null_artifact(value: &str) -> bool {
    let lowered = value.to_lowercase();
    lowered == "nan" || lowered == "nan nan"
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_from_type_code() {
        assert_eq!(Degree::from_type_code("EEPU"), Degree::Primary);
        assert_eq!(Degree::from_type_code("clg"), Degree::Secondary);
        assert_eq!(Degree::from_type_code(" LyC "), Degree::Secondary);
        assert_eq!(Degree::from_type_code("XYZ"), Degree::Undetermined);
        assert_eq!(Degree::from_type_code(""), Degree::Undetermined);
    }

    #[test]
    fn test_degree_labels() {
        assert_eq!(Degree::Primary.label(), "1er degré");
        assert_eq!(Degree::Secondary.label(), "2nd degré");
        assert_eq!(Degree::Undetermined.label(), "Indéterminé");
    }

    #[test]
    fn test_sanitize_clears_artifacts() {
        let mut record = UlisRecord {
            uai: "0751234A".into(),
            nom: "nan nan".into(),
            ville: "NaN".into(),
            adresse: "12 rue de la Paix".into(),
            degre: "1er degré".into(),
            spec_type: String::new(),
            circo: "nan".into(),
            lat: 48.85,
            lng: 2.35,
            coordo: "Non renseigné".into(),
            capa: 12,
            erseh: "Mme Martin".into(),
        };
        record.sanitize();

        assert_eq!(record.nom, "");
        assert_eq!(record.ville, "");
        assert_eq!(record.circo, "");
        assert_eq!(record.adresse, "12 rue de la Paix");
        assert_eq!(record.coordo, "Non renseigné");
    }

    #[test]
    fn test_record_serialization_field_order() {
        let record = UlisRecord {
            uai: "0751234A".into(),
            nom: "École Jules Ferry".into(),
            ville: "Paris".into(),
            adresse: String::new(),
            degre: "1er degré".into(),
            spec_type: String::new(),
            circo: String::new(),
            lat: 48.85,
            lng: 2.35,
            coordo: "Non renseigné".into(),
            capa: 0,
            erseh: "Non renseigné".into(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let uai_pos = json.find("\"uai\"").unwrap();
        let lat_pos = json.find("\"lat\"").unwrap();
        let erseh_pos = json.find("\"erseh\"").unwrap();
        assert!(uai_pos < lat_pos && lat_pos < erseh_pos);
        assert!(json.contains("École Jules Ferry"));
    }
}
