//! CSV trip-request loader.
//!
//! # CSV format
//!
//! One row per trip.  `start_time` may be left blank to mean "now";
//! `current_cycle_used_hours` may be blank for zero.
//!
//! ```csv
//! distance_miles,start_time,current_cycle_used_hours
//! 100,2024-03-04T06:00:00,0
//! 1200,2024-03-04 08:30:00,20.5
//! 2000,,
//! ```
//!
//! Accepted time formats: `%Y-%m-%dT%H:%M:%S` and `%Y-%m-%d %H:%M:%S`.
//! Values are only parsed here; range checks happen at planning time.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;

use hos_core::{HosError, HosResult};

use crate::TripRequest;

const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TripRecord {
    distance_miles:           f64,
    start_time:               Option<String>,
    current_cycle_used_hours: Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load trip requests from a CSV file.
pub fn load_trips_csv(path: &Path) -> HosResult<Vec<TripRequest>> {
    let file = std::fs::File::open(path)?;
    load_trips_reader(file)
}

/// Like [`load_trips_csv`] but accepts any `Read` source.
pub fn load_trips_reader<R: Read>(reader: R) -> HosResult<Vec<TripRequest>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut trips = Vec::new();
    for (idx, result) in csv_reader.deserialize::<TripRecord>().enumerate() {
        let row = result.map_err(|e| HosError::Parse(e.to_string()))?;
        // Header is line 1.
        let line = idx + 2;

        let start_time = match row.start_time.as_deref() {
            None | Some("") => None,
            Some(s) => Some(parse_start_time(s).ok_or_else(|| {
                HosError::Parse(format!("line {line}: unrecognised start_time {s:?}"))
            })?),
        };

        trips.push(TripRequest {
            distance_miles:           row.distance_miles,
            start_time,
            current_cycle_used_hours: row.current_cycle_used_hours.unwrap_or(0.0),
        });
    }
    Ok(trips)
}

/// Parse a departure time in either accepted format.
pub fn parse_start_time(s: &str) -> Option<NaiveDateTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
