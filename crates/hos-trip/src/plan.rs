//! Trip request and result types.

use chrono::NaiveDateTime;
use hos_log::DailyLog;
use hos_plan::Segment;
use serde::{Deserialize, Serialize};

// ── TripRequest ───────────────────────────────────────────────────────────────

/// Inputs for one trip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub distance_miles:           f64,
    /// `None` means "now" (local time) at planning.
    #[serde(default)]
    pub start_time:               Option<NaiveDateTime>,
    /// Hours already used in the current cycle.
    #[serde(default)]
    pub current_cycle_used_hours: f64,
}

impl TripRequest {
    pub fn new(distance_miles: f64, current_cycle_used_hours: f64) -> Self {
        Self { distance_miles, start_time: None, current_cycle_used_hours }
    }

    /// Fix the departure time.
    pub fn starting_at(mut self, start_time: NaiveDateTime) -> Self {
        self.start_time = Some(start_time);
        self
    }
}

// ── PlanDiagnostics ───────────────────────────────────────────────────────────

/// Degradations that happened while planning.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanDiagnostics {
    /// The iteration cap stopped the planner before arrival.
    pub truncated:            bool,
    /// Distance not covered by any driving segment.
    pub unplanned_miles:      f64,
    /// Clock advances that fell back to a substitute value.
    pub time_fallbacks:       u32,
    /// Segments placed on the open log because their date was unusable.
    pub date_fallbacks:       u32,
    /// Segments left off the daily logs by the log cap.
    pub logs_dropped:         usize,
    /// Cycle hours used plus this trip's on-duty time exceed the cycle limit.
    /// Reported only; the planner does not enforce the cycle.
    pub cycle_limit_exceeded: bool,
}

impl PlanDiagnostics {
    /// `true` if no cap was hit, no fallback was needed, and the cycle holds.
    ///
    /// `unplanned_miles` is not considered: a residual under the arrival
    /// tolerance is part of a normal finish.
    pub fn is_clean(&self) -> bool {
        !self.truncated
            && self.time_fallbacks == 0
            && self.date_fallbacks == 0
            && self.logs_dropped == 0
            && !self.cycle_limit_exceeded
    }
}

// ── TripPlan ──────────────────────────────────────────────────────────────────

/// The full result of planning one trip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub start_time:               NaiveDateTime,
    pub total_distance:           f64,
    /// `distance / average speed`.
    pub total_driving_time:       f64,
    /// Driving plus pickup, dropoff, and fuel stops.  Rest is not included.
    pub total_on_duty_time:       f64,
    /// Sum of all segment durations, rests included.
    pub estimated_duration_hours: f64,
    pub num_rest_breaks:          usize,
    pub num_fuel_stops:           u32,
    pub num_days:                 usize,
    pub segments:                 Vec<Segment>,
    pub daily_logs:               Vec<DailyLog>,
    pub cycle_hours_used:         f64,
    /// `max_cycle_hours − cycle_hours_used`; may be negative.
    pub cycle_hours_available:    f64,
    pub diagnostics:              PlanDiagnostics,
}

impl TripPlan {
    /// End of the Dropoff segment.
    pub fn end_time(&self) -> NaiveDateTime {
        self.segments
            .last()
            .map(Segment::end_time)
            .unwrap_or(self.start_time)
    }

    /// Cycle hours left after this trip's on-duty time, floored at zero.
    pub fn cycle_hours_remaining(&self) -> f64 {
        (self.cycle_hours_available - self.total_on_duty_time).max(0.0)
    }
}
