//! Normalization pass over the loaded table: fill missing cells with the
//! empty string, rewrite known category labels to their canonical
//! identifiers, and coerce every cell to text.

use std::collections::HashMap;

use calamine::DataType;
use chrono::{Duration, NaiveDate, NaiveTime};
use log::debug;
use once_cell::sync::Lazy;

use crate::etl::{NormalizedTable, SourceTable};

/// The human-readable category labels used in the spreadsheet and the
/// identifiers the frontend keys on. Applied to column headers and to cell
/// values alike: some data rows reuse the category labels as values.
pub static RENAMES: &[(&str, &str)] = &[
    ("Administrative (District)", "admin_district"),
    ("Administrative (Taluk)", "admin_taluk"),
    ("BBMP (Ward)", "bbmp_wards"),
    ("BBMP (Zone)", "bbmp_zone"),
    ("BESCOM (Division)", "bescom_division"),
    ("BESCOM (Subdivision)", "bescom_subdivision"),
    ("BWSSB (Division)", "bwssb_division"),
    ("Elections (Assembly Constituency)", "election_ac"),
    ("Elections (Parliamentary Constituency)", "election_pc"),
    ("Pincode", "pincode"),
    ("City Police", "police_city"),
    ("Traffic Police", "police_traffic"),
    ("Stamps (SRO)", "stamps_sro"),
    ("Stamps (DRO)", "stamps_dro"),
];

static RENAME_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| RENAMES.iter().copied().collect());

/// Replaces a label with its canonical identifier, if it is one of the known
/// category labels. Exact match only: anything else passes through unchanged.
pub fn canonical(label: String) -> String {
    match RENAME_INDEX.get(label.as_str()) {
        Some(id) => id.to_string(),
        None => label,
    }
}

/// The textual form of a cell. Missing cells become the empty string, every
/// other type gets a deterministic rendering.
pub fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => float_text(*f),
        DataType::Bool(b) => b.to_string(),
        DataType::DateTime(serial) => datetime_text(*serial),
        // Error cells behave like blanks, same as the missing-value fill.
        DataType::Error(_) => String::new(),
    }
}

// Numeric columns with blanks come back from the reader as floats. A pincode
// stored as 560001.0 must render as "560001".
fn float_text(f: f64) -> String {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_EXACT {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

// Excel datetime serials count days from 1899-12-30, fractional part is the
// time of day. Dates at midnight render without a time component.
fn datetime_text(serial: f64) -> String {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();
    let dt = base + Duration::seconds((serial * 86_400.0).round() as i64);
    if dt.time() == NaiveTime::MIN {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Produces the [NormalizedTable]: every header and every cell coerced to
/// text and passed through the rename table. Pure and idempotent, since
/// canonical identifiers never appear as rename keys.
pub fn normalize_table(table: SourceTable) -> NormalizedTable {
    let headers: Vec<String> = table.headers.into_iter().map(canonical).collect();
    debug!("normalize_table: headers: {:?}", headers);

    let rows: Vec<Vec<String>> = table
        .rows
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|cell| canonical(cell_text(cell)))
                .collect()
        })
        .collect();

    NormalizedTable { headers, rows }
}
