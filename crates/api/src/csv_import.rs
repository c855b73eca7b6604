// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Itinerary import from the scheduling system's CSV export.
//!
//! Headers are matched case-insensitively with spaces treated as
//! underscores, so both the export's `Dept Sta` and the record field name
//! `departure_station` are understood. Rows without a day, a departure time
//! or both stations are skipped, as the export pads sheets with blank and
//! summary rows.

use crate::error::ApiError;
use crate::request_response::FlightLegRecord;
use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, info};

/// Accepted spellings for each itinerary column.
const COLUMNS: &[(&str, &[&str])] = &[
    ("date", &["day", "date"]),
    ("departure_station", &["dept_sta", "departure_station"]),
    ("arrival_station", &["arvl_sta", "arrival_station"]),
    ("departure_time", &["dept_time", "departure_time"]),
    ("arrival_time", &["arvl_time", "arrival_time"]),
    ("arrival_date", &["arvl_day", "arrival_date"]),
    ("flight_designator", &["flt_desg", "flight_designator"]),
    ("tail", &["tail"]),
];

/// Columns a file must carry.
const REQUIRED_COLUMNS: &[&str] = &[
    "date",
    "departure_station",
    "arrival_station",
    "departure_time",
    "arrival_time",
];

/// Legs read from an itinerary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryImport {
    /// Usable rows, in file order.
    pub legs: Vec<FlightLegRecord>,
    /// 1-based row numbers (excluding the header) that were skipped.
    pub skipped_rows: Vec<usize>,
}

/// Normalizes a CSV header string for case-insensitive, whitespace-tolerant matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Maps each known column to its index in the file.
fn map_headers(headers: &StringRecord) -> Result<HashMap<&'static str, usize>, ApiError> {
    let mut columns: HashMap<&'static str, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        let normalized: String = normalize_header(header);
        if let Some((name, _)) = COLUMNS
            .iter()
            .find(|(_, spellings)| spellings.contains(&normalized.as_str()))
        {
            columns.entry(*name).or_insert(idx);
        }
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name: &&str| !columns.contains_key(name))
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::InvalidCsvFormat {
            reason: format!("Missing required headers: {}", missing.join(", ")),
        });
    }

    Ok(columns)
}

/// Reads an itinerary CSV into leg records.
///
/// # Errors
///
/// Returns `ApiError::InvalidCsvFormat` if the file cannot be read as CSV or
/// lacks a required column.
pub fn import_itinerary_csv<R: Read>(reader: R) -> Result<ItineraryImport, ApiError> {
    let mut csv_reader: csv::Reader<R> = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers: StringRecord = csv_reader
        .headers()
        .map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("Failed to read headers: {e}"),
        })?
        .clone();
    let columns: HashMap<&'static str, usize> = map_headers(&headers)?;

    let mut import: ItineraryImport = ItineraryImport {
        legs: Vec::new(),
        skipped_rows: Vec::new(),
    };
    for (idx, record) in csv_reader.records().enumerate() {
        let row_number: usize = idx + 1;
        let record: StringRecord = record.map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("Row {row_number}: {e}"),
        })?;
        let field = |name: &str| -> String {
            columns
                .get(name)
                .and_then(|&col| record.get(col))
                .unwrap_or_default()
                .to_string()
        };

        let leg: FlightLegRecord = FlightLegRecord {
            tail: field("tail"),
            departure_station: field("departure_station"),
            arrival_station: field("arrival_station"),
            date: field("date"),
            departure_time: field("departure_time"),
            arrival_time: field("arrival_time"),
            arrival_date: Some(field("arrival_date")).filter(|date: &String| !date.is_empty()),
            flight_designator: field("flight_designator"),
        };
        if leg.date.is_empty()
            || leg.departure_time.is_empty()
            || leg.departure_station.is_empty()
            || leg.arrival_station.is_empty()
        {
            debug!(row = row_number, "Skipping incomplete itinerary row");
            import.skipped_rows.push(row_number);
            continue;
        }
        import.legs.push(leg);
    }

    info!(
        legs = import.legs.len(),
        skipped = import.skipped_rows.len(),
        "Imported itinerary"
    );
    Ok(import)
}
