//! Plain data row types written by output backends.

use chrono::{NaiveDate, NaiveDateTime};
use hos_log::{DailyLog, TimelineEntry};

/// Totals for one log sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyLogRow {
    pub date:           NaiveDate,
    pub total_miles:    f64,
    pub driving_hours:  f64,
    /// Includes driving.
    pub on_duty_hours:  f64,
    pub off_duty_hours: f64,
    pub sleeper_hours:  f64,
}

impl From<&DailyLog> for DailyLogRow {
    fn from(log: &DailyLog) -> Self {
        Self {
            date:           log.date,
            total_miles:    log.total_miles,
            driving_hours:  log.driving_hours,
            on_duty_hours:  log.on_duty_hours,
            off_duty_hours: log.off_duty_hours,
            sleeper_hours:  log.sleeper_hours,
        }
    }
}

/// One grid bar, flattened for export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineRow {
    /// Date of the sheet the entry is drawn on.
    pub date:           NaiveDate,
    pub start_time:     NaiveDateTime,
    /// Hour of day in `[0, 24)`.
    pub start_hour:     f64,
    pub duration_hours: f64,
    /// Duty status code, 1–4.
    pub status:         u8,
    pub activity:       &'static str,
    pub distance_miles: f64,
}

impl TimelineRow {
    pub fn new(date: NaiveDate, entry: &TimelineEntry) -> Self {
        Self {
            date,
            start_time:     entry.start_time,
            start_hour:     entry.start_hour(),
            duration_hours: entry.duration_hours,
            status:         entry.status.code(),
            activity:       entry.activity.label(),
            distance_miles: entry.distance_miles,
        }
    }

    /// All rows for one sheet, in timeline order.
    pub fn for_log(log: &DailyLog) -> Vec<Self> {
        log.timeline.iter().map(|e| Self::new(log.date, e)).collect()
    }
}
