//! Overflow-safe time arithmetic.
//!
//! # Design
//!
//! The segment planner advances its clock once per emitted segment.  A date
//! library edge case must never abort a trip plan, so [`add_hours`] always
//! returns a usable timestamp.  When it cannot return the exact sum it says
//! so through [`TimeStep::fallback`], and the caller counts it.
//!
//! The representable range is calendar years `MIN_YEAR..=MAX_YEAR`, the
//! four-digit year range of a paper or ELD log sheet.  chrono itself can go
//! much further, but a log dated year 10 000 cannot be recorded.
//!
//! Hours are converted to `chrono::Duration` at microsecond resolution, so a
//! segment's end time computed here is bit-identical to the next segment's
//! start time computed by the planner.

use chrono::{Datelike, Duration, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Earliest calendar year a timestamp may carry.
pub const MIN_YEAR: i32 = 1;

/// Latest calendar year a timestamp may carry.
pub const MAX_YEAR: i32 = 9999;

/// Largest single jump [`add_hours`] will make (10 days).
pub const MAX_STEP_HOURS: f64 = 240.0;

const MICROS_PER_HOUR: f64 = 3_600_000_000.0;

// ── TimeFallback ──────────────────────────────────────────────────────────────

/// Why [`add_hours`] returned something other than `timestamp + hours`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFallback {
    /// The input timestamp was outside the representable range and was
    /// replaced with the current time before adding.
    StartOutOfRange,
    /// The sum would leave the representable range; `timestamp + 1h` was
    /// returned instead.
    ResultOutOfRange,
    /// `hours` was NaN or infinite; `timestamp + 1h` was returned instead.
    NonFiniteHours,
}

impl TimeFallback {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeFallback::StartOutOfRange  => "start_out_of_range",
            TimeFallback::ResultOutOfRange => "result_out_of_range",
            TimeFallback::NonFiniteHours   => "non_finite_hours",
        }
    }
}

impl std::fmt::Display for TimeFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TimeStep ──────────────────────────────────────────────────────────────────

/// Result of a bounded time addition.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TimeStep {
    /// Always a valid, in-range timestamp.
    pub time:     NaiveDateTime,
    /// `None` when `time` is the exact requested sum.
    pub fallback: Option<TimeFallback>,
}

impl TimeStep {
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.fallback.is_none()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// `true` if `ts` lies within `MIN_YEAR..=MAX_YEAR`.
#[inline]
pub fn in_range(ts: &NaiveDateTime) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&ts.year())
}

/// Current local wall-clock time without a zone.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Convert fractional hours to a `Duration`, rounded to the microsecond.
///
/// Non-finite input saturates (`as` casts), so callers that care must check
/// `is_finite` first.
#[inline]
pub fn hours_to_duration(hours: f64) -> Duration {
    Duration::microseconds((hours * MICROS_PER_HOUR).round() as i64)
}

/// Fractional hours from `from` to `to` (negative if `to` is earlier).
pub fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    let delta = to - from;
    match delta.num_microseconds() {
        Some(us) => us as f64 / MICROS_PER_HOUR,
        None     => delta.num_seconds() as f64 / 3_600.0,
    }
}

/// Add `hours` to `timestamp` with the default 240-hour step clamp.
///
/// See [`add_hours_capped`].
pub fn add_hours(timestamp: NaiveDateTime, hours: f64) -> TimeStep {
    add_hours_capped(timestamp, hours, MAX_STEP_HOURS)
}

/// Add `hours` to `timestamp`, never failing.
///
/// - `hours` is clamped to `min(|hours|, |max_step_hours|)`.
/// - An out-of-range `timestamp` is replaced with [`now`] first.
/// - An out-of-range result degrades to `timestamp + 1h`.
///
/// Every degradation is logged at `warn` and reported in the returned
/// [`TimeStep`].  When two apply, the first one encountered is reported.
pub fn add_hours_capped(timestamp: NaiveDateTime, hours: f64, max_step_hours: f64) -> TimeStep {
    let (base, mut fallback) = if in_range(&timestamp) {
        (timestamp, None)
    } else {
        warn!(%timestamp, "timestamp outside representable range; using current time");
        (now(), Some(TimeFallback::StartOutOfRange))
    };

    if !hours.is_finite() {
        warn!(%base, hours, "non-finite hour offset; advancing one hour");
        return TimeStep {
            time:     one_hour_after(base),
            fallback: fallback.or(Some(TimeFallback::NonFiniteHours)),
        };
    }

    let step = hours.abs().min(max_step_hours.abs());
    match base.checked_add_signed(hours_to_duration(step)).filter(in_range) {
        Some(time) => TimeStep { time, fallback },
        None => {
            warn!(%base, hours = step, "time addition leaves representable range; advancing one hour");
            fallback = fallback.or(Some(TimeFallback::ResultOutOfRange));
            TimeStep { time: one_hour_after(base), fallback }
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `base + 1h`, or `base` itself at the very end of the range.
fn one_hour_after(base: NaiveDateTime) -> NaiveDateTime {
    base.checked_add_signed(Duration::hours(1))
        .filter(in_range)
        .unwrap_or(base)
}
