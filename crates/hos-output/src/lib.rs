//! `hos-output` — trip plan and daily log writers.
//!
//! | File               | Contents                                    | Written by                 |
//! |--------------------|---------------------------------------------|----------------------------|
//! | `daily_logs.csv`   | One row per log sheet: date and hour totals | always                     |
//! | `timeline.csv`     | One row per timeline entry, grid-ready      | always                     |
//! | `log_header.csv`   | Driver, carrier, vehicle, route             | only when a header is given|
//!
//! Writers implement [`OutputWriter`]; [`write_trip_plan`] drives one from a
//! finished `TripPlan`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hos_output::{CsvWriter, LogSheetHeader, write_trip_plan};
//!
//! let mut writer = CsvWriter::new(Path::new("./logs"))?;
//! write_trip_plan(&mut writer, &plan, Some(&LogSheetHeader::default()))?;
//! ```

pub mod csv;
pub mod error;
pub mod export;
pub mod header;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use export::write_trip_plan;
pub use header::LogSheetHeader;
pub use row::{DailyLogRow, TimelineRow};
pub use writer::OutputWriter;
