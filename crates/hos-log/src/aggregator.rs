//! The `DailyLogAggregator`: segments in, one `DailyLog` per date out.

use chrono::NaiveDateTime;
use hos_core::{PlannerLimits, time};
use hos_plan::Segment;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{CalendarBucketer, DailyLog, TimelineEntry};

// ── LogBook ───────────────────────────────────────────────────────────────────

/// Output of [`DailyLogAggregator::aggregate`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LogBook {
    /// Chronological, one per distinct date, each padded to 24 hours.
    pub logs:             Vec<DailyLog>,
    /// Segments that could not be dated and went on the open sheet.
    pub date_fallbacks:   u32,
    /// Segments not recorded because the log cap was reached (a segment cut
    /// off partway counts as dropped).
    pub segments_dropped: usize,
}

impl LogBook {
    pub fn num_days(&self) -> usize {
        self.logs.len()
    }

    pub fn total_miles(&self) -> f64 {
        self.logs.iter().map(|l| l.total_miles).sum()
    }
}

// ── DailyLogAggregator ────────────────────────────────────────────────────────

/// Folds a chronological segment list into per-date logs.
#[derive(Copy, Clone, Debug)]
pub struct DailyLogAggregator {
    max_daily_logs: usize,
}

impl Default for DailyLogAggregator {
    fn default() -> Self {
        Self::from_limits(&PlannerLimits::default())
    }
}

impl DailyLogAggregator {
    /// An aggregator that stops after `max_daily_logs` sheets.
    pub fn new(max_daily_logs: usize) -> Self {
        Self { max_daily_logs }
    }

    pub fn from_limits(limits: &PlannerLimits) -> Self {
        Self::new(limits.max_daily_logs)
    }

    pub fn max_daily_logs(&self) -> usize {
        self.max_daily_logs
    }

    /// Build the log book for `segments`.
    ///
    /// The first sheet is dated by the first segment's start; `start_time`
    /// only stands in when that start cannot be dated.
    ///
    /// Segments are split at midnight so every entry falls within its sheet.
    /// Each sheet's unrecorded hours are filled as off duty when it closes.
    pub fn aggregate(&self, segments: &[Segment], start_time: NaiveDateTime) -> LogBook {
        let mut book = LogBook::default();
        if segments.is_empty() || self.max_daily_logs == 0 {
            book.segments_dropped = segments.len();
            return book;
        }

        let first_date = segments
            .first()
            .map(|s| s.start_time)
            .filter(time::in_range)
            .unwrap_or(start_time)
            .date();
        let mut bucketer = CalendarBucketer::new(first_date);
        let mut open = DailyLog::new(bucketer.open_date());

        'segments: for (idx, segment) in segments.iter().enumerate() {
            let pieces = bucketer.pieces(segment.start_time, segment.duration_hours);
            for piece in pieces {
                if piece.date != open.date {
                    if book.logs.len() + 1 >= self.max_daily_logs {
                        book.segments_dropped = segments.len() - idx;
                        warn!(
                            max_daily_logs = self.max_daily_logs,
                            dropped = book.segments_dropped,
                            "daily log cap reached; remaining segments not logged"
                        );
                        break 'segments;
                    }
                    bucketer.open(piece.date);
                    let next = DailyLog::new(piece.date);
                    close(&mut book, std::mem::replace(&mut open, next));
                }

                let share = if segment.duration_hours > 0.0 {
                    piece.hours / segment.duration_hours
                } else {
                    1.0
                };
                open.record(TimelineEntry {
                    start_time:     piece.start,
                    duration_hours: piece.hours,
                    status:         segment.kind.duty_status(),
                    activity:       segment.activity,
                    distance_miles: segment.distance_miles * share,
                });
            }
        }
        close(&mut book, open);

        book.date_fallbacks = bucketer.fallbacks();
        debug!(
            days = book.logs.len(),
            date_fallbacks = book.date_fallbacks,
            "daily logs built"
        );
        book
    }
}

/// Pad `log` to a full day and append it.
fn close(book: &mut LogBook, mut log: DailyLog) {
    let padded = log.fill_off_duty();
    if padded > 0.0 {
        debug!(date = %log.date, padded_hours = padded, "log padded with off-duty time");
    }
    book.logs.push(log);
}
