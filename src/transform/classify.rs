//! Degree classification and specialized-device detection.

use crate::models::{Degree, MergedRow};

/// Specialization tag of a merged row, if any.
///
/// The tag is "present" unless the source cell was blank or a
/// stringified-null artifact (already folded to `None` when the typed
/// row was built). A present tag marks the row as a specialized
/// device.
pub fn specialization(row: &MergedRow) -> Option<&str> {
    row.details.spec_device.as_deref()
}

/// Classify the schooling degree of a merged row.
///
/// The geo table's degree takes unconditional priority when present
/// and is returned verbatim; otherwise the details table's `Type` code
/// is looked up in the fixed vocabularies.
pub fn classify_degree(row: &MergedRow) -> String {
    if let Some(geo_degree) = row.geo.as_ref().and_then(|g| g.degree.as_deref()) {
        return geo_degree.to_string();
    }

    Degree::from_type_code(row.details.type_code.as_deref().unwrap_or(""))
        .label()
        .to_string()
}

/// Final `degre` output value.
///
/// A specialized row overrides whatever the degree classifier computed
/// with a synthesized label carrying the device tag, so the front end
/// can give these units their own color and filter.
pub fn final_degree(row: &MergedRow) -> String {
    match specialization(row) {
        Some(tag) => format!("Dispositif Spécialisé ({})", tag),
        None => classify_degree(row),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DetailsRow, GeoRow};

    fn details(type_code: Option<&str>, spec: Option<&str>) -> DetailsRow {
        DetailsRow {
            uai: "0751234A".into(),
            ulis: Some(true),
            capacity: None,
            spec_device: spec.map(String::from),
            name_main: None,
            name_extra: None,
            city: None,
            address: None,
            type_code: type_code.map(String::from),
            district: None,
            coordinator: None,
            support_staff: None,
        }
    }

    fn geo(degree: Option<&str>) -> GeoRow {
        GeoRow {
            uai: "0751234A".into(),
            lat: Some("48.85".into()),
            lng: Some("2.35".into()),
            degree: degree.map(String::from),
            district: None,
        }
    }

    #[test]
    fn test_geo_degree_has_priority() {
        let row = MergedRow {
            details: details(Some("CLG"), None),
            geo: Some(geo(Some("1er degré"))),
        };
        // Geo says primary even though the Type code says secondary.
        assert_eq!(classify_degree(&row), "1er degré");
    }

    #[test]
    fn test_type_code_fallback() {
        let row = MergedRow {
            details: details(Some("CLG"), None),
            geo: Some(geo(None)),
        };
        assert_eq!(classify_degree(&row), "2nd degré");

        let row = MergedRow {
            details: details(Some("EMPU"), None),
            geo: None,
        };
        assert_eq!(classify_degree(&row), "1er degré");
    }

    #[test]
    fn test_unknown_type_code_undetermined() {
        let row = MergedRow {
            details: details(Some("SEGPA"), None),
            geo: None,
        };
        assert_eq!(classify_degree(&row), "Indéterminé");

        let row = MergedRow {
            details: details(None, None),
            geo: None,
        };
        assert_eq!(classify_degree(&row), "Indéterminé");
    }

    #[test]
    fn test_specialization_overrides_degree() {
        let row = MergedRow {
            details: details(Some("CLG"), Some("DAR")),
            geo: Some(geo(Some("1er degré"))),
        };
        assert_eq!(specialization(&row), Some("DAR"));
        assert_eq!(final_degree(&row), "Dispositif Spécialisé (DAR)");
    }

    #[test]
    fn test_not_specialized_keeps_classification() {
        let row = MergedRow {
            details: details(Some("LPO"), None),
            geo: None,
        };
        assert_eq!(specialization(&row), None);
        assert_eq!(final_degree(&row), "2nd degré");
    }
}
