//! Per-day log sheet data: `DailyLog` and `TimelineEntry`.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use hos_core::DutyStatus;
use hos_plan::Activity;
use serde::{Deserialize, Serialize};

/// Hours on one log sheet.
pub const HOURS_PER_DAY: f64 = 24.0;

// ── TimelineEntry ─────────────────────────────────────────────────────────────

/// One bar on the log grid: a segment, or the part of it that falls on this
/// sheet's date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub start_time:     NaiveDateTime,
    pub duration_hours: f64,
    pub status:         DutyStatus,
    pub activity:       Activity,
    /// Miles driven during this entry (prorated when a segment is split).
    pub distance_miles: f64,
}

impl TimelineEntry {
    /// Hour of day the entry starts, in `[0, 24)`.
    pub fn start_hour(&self) -> f64 {
        let t = self.start_time;
        (t.num_seconds_from_midnight() as f64 + t.nanosecond() as f64 / 1e9) / 3_600.0
    }

    /// Hour of day the entry ends, at most 24 for an entry on its own sheet.
    pub fn end_hour(&self) -> f64 {
        self.start_hour() + self.duration_hours
    }
}

// ── DailyLog ──────────────────────────────────────────────────────────────────

/// Record of duty status for one calendar date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date:           NaiveDate,
    pub total_miles:    f64,
    pub driving_hours:  f64,
    /// All on-duty time, driving included.
    pub on_duty_hours:  f64,
    pub off_duty_hours: f64,
    /// Always zero: sleeper-berth time is never planned.
    pub sleeper_hours:  f64,
    pub timeline:       Vec<TimelineEntry>,
}

impl DailyLog {
    /// An empty sheet for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            total_miles:    0.0,
            driving_hours:  0.0,
            on_duty_hours:  0.0,
            off_duty_hours: 0.0,
            sleeper_hours:  0.0,
            timeline:       Vec::new(),
        }
    }

    /// Append `entry` and add it to the totals.
    pub fn record(&mut self, entry: TimelineEntry) {
        let hours = entry.duration_hours;
        match entry.status {
            DutyStatus::Driving => {
                self.driving_hours += hours;
                self.on_duty_hours += hours;
            }
            DutyStatus::OnDutyNotDriving => self.on_duty_hours += hours,
            DutyStatus::OffDuty          => self.off_duty_hours += hours,
            DutyStatus::SleeperBerth     => self.sleeper_hours += hours,
        }
        self.total_miles += entry.distance_miles;
        self.timeline.push(entry);
    }

    /// On-duty time spent not driving (grid line 4).
    pub fn not_driving_hours(&self) -> f64 {
        (self.on_duty_hours - self.driving_hours).max(0.0)
    }

    /// Hours of the day accounted for so far.
    pub fn recorded_hours(&self) -> f64 {
        self.on_duty_hours + self.off_duty_hours + self.sleeper_hours
    }

    /// Totals per grid line, in [`DutyStatus::ALL`] order.
    pub fn status_hours(&self) -> [f64; 4] {
        [
            self.off_duty_hours,
            self.sleeper_hours,
            self.driving_hours,
            self.not_driving_hours(),
        ]
    }

    pub fn hours_for(&self, status: DutyStatus) -> f64 {
        self.status_hours()[status.line()]
    }

    /// Count any unrecorded part of the day as off duty.  Returns the hours
    /// added.
    pub fn fill_off_duty(&mut self) -> f64 {
        let shortfall = HOURS_PER_DAY - self.recorded_hours();
        if shortfall > 0.0 {
            self.off_duty_hours += shortfall;
            shortfall
        } else {
            0.0
        }
    }
}
