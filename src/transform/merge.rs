//! Join-key normalization and the details/geo left join.
//!
//! Both tables are keyed by the facility identifier (UAI). The raw
//! cell arrives in whatever shape the source office typed it - mixed
//! case, padded with whitespace, occasionally numeric - so both sides
//! are normalized before the join.
//!
//! Duplicate keys on the geo side are resolved deterministically: the
//! first occurrence in geo-table order wins and later duplicates are
//! ignored. Duplicate details rows are not deduplicated; each one
//! merges and flows through the filters independently.

use serde_json::Value;
use std::collections::HashMap;

use crate::models::{DetailsRow, GeoRow, MergedRow};
use crate::report::log_warning;
use crate::transform::fields::RowView;

// Details table columns.
const COL_UAI: &str = "UAI";
const COL_ULIS: &str = "ULIS";
const COL_CAPACITY: &str = "Capacité d'accueil";
const COL_SPEC_DEVICE: &str = "Dispositif spécifique";
const COL_NAME_MAIN: &str = "Dénomination principale";
const COL_NAME_EXTRA: &str = "Dénomination complémentaire";
const COL_CITY: &str = "Ville";
const COL_ADDRESS: &str = "Adresse";
const COL_TYPE: &str = "Type";
const COL_DISTRICT: &str = "Circonscription";
const COL_COORDINATOR: &str = "Coordonnateur ULIS";
const COL_SUPPORT_STAFF: &str = "ERSEH";

// Geo table columns.
const COL_LAT: &str = "PAS.1.Latitude";
const COL_LNG: &str = "PAS.1.Longitude";
const COL_DEGREE: &str = "Degré";

/// Map any representation of the join key to its canonical form:
/// trimmed, uppercased.
pub fn normalize_uai(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Build typed details rows from parsed table rows.
///
/// Rows whose identifier cell is blank or a stringified-null artifact
/// cannot join and could never satisfy the non-empty-`uai` output
/// invariant; they are dropped here with a warning.
pub fn read_details(rows: &[Value]) -> Vec<DetailsRow> {
    let mut details = Vec::with_capacity(rows.len());

    for row in rows {
        let view = RowView::new(row);
        let uai = match view.text(COL_UAI) {
            Some(raw) => normalize_uai(&raw),
            None => {
                log_warning(format!(
                    "Details row without UAI ({}) ignored",
                    view.text(COL_NAME_MAIN).as_deref().unwrap_or("Unknown")
                ));
                continue;
            }
        };

        details.push(DetailsRow {
            uai,
            ulis: view.flag(COL_ULIS),
            capacity: view.count(COL_CAPACITY),
            spec_device: view.text(COL_SPEC_DEVICE),
            name_main: view.text(COL_NAME_MAIN),
            name_extra: view.text(COL_NAME_EXTRA),
            city: view.text(COL_CITY),
            address: view.text(COL_ADDRESS),
            type_code: view.text(COL_TYPE),
            district: view.text(COL_DISTRICT),
            coordinator: view.text(COL_COORDINATOR),
            support_staff: view.text(COL_SUPPORT_STAFF),
        });
    }

    details
}

/// Geo rows indexed by normalized identifier.
#[derive(Debug, Default)]
pub struct GeoIndex {
    by_uai: HashMap<String, GeoRow>,
}

impl GeoIndex {
    /// Index parsed geo rows. First occurrence of a duplicate key wins;
    /// rows without a usable identifier are skipped.
    pub fn build(rows: &[Value]) -> Self {
        let mut by_uai = HashMap::with_capacity(rows.len());

        for row in rows {
            let view = RowView::new(row);
            let uai = match view.text(COL_UAI) {
                Some(raw) => normalize_uai(&raw),
                None => continue,
            };

            by_uai.entry(uai.clone()).or_insert_with(|| GeoRow {
                uai,
                lat: view.text(COL_LAT),
                lng: view.text(COL_LNG),
                degree: view.text(COL_DEGREE),
                district: view.text(COL_DISTRICT),
            });
        }

        Self { by_uai }
    }

    pub fn get(&self, uai: &str) -> Option<&GeoRow> {
        self.by_uai.get(uai)
    }

    pub fn len(&self) -> usize {
        self.by_uai.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uai.is_empty()
    }
}

/// Left-join details rows against the geo index.
///
/// Every details row is kept, with geo fields absent when nothing
/// matches; output order follows the details table. Unmatched geo rows
/// are dropped.
pub fn merge(details: Vec<DetailsRow>, geo: &GeoIndex) -> Vec<MergedRow> {
    details
        .into_iter()
        .map(|row| {
            let matched = geo.get(&row.uai).cloned();
            MergedRow {
                details: row,
                geo: matched,
            }
        })
        .collect()
}
