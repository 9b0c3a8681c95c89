//! Calendar bucketing: which sheet a stretch of time belongs to.

use chrono::{NaiveDate, NaiveDateTime};
use hos_core::time::{self, hours_between};
use tracing::warn;

/// Remainders shorter than this after a midnight cut (about 3.6 µs) are
/// rounding noise and are discarded.
const SPLIT_EPSILON_HOURS: f64 = 1e-9;

/// Upper bound on the up-front allocation for one split.
const MAX_PIECES_HINT: f64 = 366.0;

/// A stretch of time that lies within a single calendar date.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct DayPiece {
    pub date:  NaiveDate,
    pub start: NaiveDateTime,
    pub hours: f64,
}

/// Cut `[start, start + hours)` at every midnight it crosses.
///
/// Always returns at least one piece.  A stretch that would continue past
/// the representable calendar is kept whole in its last in-range day.  A
/// non-finite `hours` yields one piece running to the next midnight.
pub fn split_at_midnight(start: NaiveDateTime, hours: f64) -> Vec<DayPiece> {
    if !hours.is_finite() {
        let hours = next_midnight(start).map_or(0.0, |m| hours_between(start, m));
        return vec![DayPiece { date: start.date(), start, hours }];
    }

    let mut pieces = Vec::with_capacity(1 + (hours / 24.0).clamp(0.0, MAX_PIECES_HINT) as usize);
    let mut cursor = start;
    let mut left = hours;

    loop {
        let date = cursor.date();
        let Some(midnight) = next_midnight(cursor) else {
            pieces.push(DayPiece { date, start: cursor, hours: left });
            break;
        };
        let to_midnight = hours_between(cursor, midnight);
        if left <= to_midnight + SPLIT_EPSILON_HOURS {
            pieces.push(DayPiece { date, start: cursor, hours: left });
            break;
        }

        pieces.push(DayPiece { date, start: cursor, hours: to_midnight });
        left -= to_midnight;
        cursor = midnight;
        if left <= SPLIT_EPSILON_HOURS {
            break;
        }
    }
    pieces
}

/// The midnight ending `t`'s day, if it is still representable.
fn next_midnight(t: NaiveDateTime) -> Option<NaiveDateTime> {
    t.date()
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .filter(time::in_range)
}

/// Tracks the date of the open sheet and resolves segments onto sheets.
///
/// Separate from the planner's `DutyCycle`: this clock turns over at
/// midnight and nowhere else.
#[derive(Clone, Debug)]
pub struct CalendarBucketer {
    open:      NaiveDate,
    fallbacks: u32,
}

impl CalendarBucketer {
    /// Start with `first` as the open date (the trip's start date).
    pub fn new(first: NaiveDate) -> Self {
        Self { open: first, fallbacks: 0 }
    }

    pub fn open_date(&self) -> NaiveDate {
        self.open
    }

    /// Segments whose date could not be determined.
    pub fn fallbacks(&self) -> u32 {
        self.fallbacks
    }

    /// Make `date` the open sheet.
    pub fn open(&mut self, date: NaiveDate) {
        self.open = date;
    }

    /// The day pieces for a segment starting at `start`.
    ///
    /// A start outside the representable calendar, or dated before a sheet
    /// that is already open, cannot be placed; the whole segment is then put
    /// on the open sheet and counted as a fallback.  So is a non-finite
    /// duration, which is cut off at the next midnight.
    pub fn pieces(&mut self, start: NaiveDateTime, hours: f64) -> Vec<DayPiece> {
        let datable = time::in_range(&start) && start.date() >= self.open;
        if !hours.is_finite() {
            warn!(%start, hours, "segment duration is not finite; cutting it at midnight");
            self.fallbacks += 1;
            if datable {
                return split_at_midnight(start, hours);
            }
            return vec![DayPiece { date: self.open, start, hours: 0.0 }];
        }
        if datable {
            return split_at_midnight(start, hours);
        }
        warn!(%start, open = %self.open, "segment start cannot be dated; using open sheet");
        self.fallbacks += 1;
        vec![DayPiece { date: self.open, start, hours }]
    }
}
